pub mod curve_fit;
pub mod equation;

pub use curve_fit::CurveFitProblem;
pub use equation::EquationProblem;
