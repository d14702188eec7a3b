/// Indicates how a Levenberg–Marquardt fit finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A convergence criterion was met.
    Converged,

    /// Reached the iteration limit without converging.
    MaxIters,

    /// Stalled with a numerically rank-deficient Jacobian.
    Singular,

    /// The optimizer encountered non-finite values or an unusable problem.
    Failed,
}

/// The specific reason a fit stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// The residual vector is orthogonal to the Jacobian columns within
    /// `gradient_tolerance`.
    SmallGradient,

    /// The relative change in the parameters fell below `parameter_tolerance`.
    SmallParameterStep,

    /// The relative reduction in the sum of squares fell below
    /// `residual_tolerance`.
    SmallResidualReduction,

    /// The residuals are exactly zero.
    ZeroResidual,

    /// The iteration limit was reached.
    IterationLimit,

    /// No further reduction is possible at machine precision.
    Stagnation,

    /// No further reduction is possible and the Jacobian is rank-deficient.
    SingularJacobian,

    /// Non-finite values, or a problem the optimizer cannot work with.
    InvalidValues,
}

/// The result of a Levenberg–Marquardt fit.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<const N: usize> {
    /// Final solver status.
    pub status: Status,

    /// Specific stopping reason.
    pub termination: Termination,

    /// Final parameters.
    pub params: [f64; N],

    /// Number of outer iterations completed.
    pub iters: usize,

    /// Number of predictions made, including finite-difference evaluations.
    pub evaluations: usize,

    /// Number of Jacobians computed.
    pub jacobian_evaluations: usize,

    /// Sum of squared residuals at the initial parameters.
    pub initial_sum_of_squares: f64,

    /// Sum of squared residuals at the final parameters.
    pub sum_of_squares: f64,

    /// Condition number of the column-normalized Jacobian at the final
    /// parameters, or NaN if it could not be computed.
    pub condition: f64,
}
