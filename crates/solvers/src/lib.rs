//! Numerical solvers for darkfit problems.
//!
//! - [`equation`]: root finding for [`EquationProblem`]s
//! - [`least_squares`]: parameter fitting for [`CurveFitProblem`]s
//!
//! [`EquationProblem`]: darkfit_core::EquationProblem
//! [`CurveFitProblem`]: darkfit_core::CurveFitProblem

pub mod equation;
pub mod least_squares;
