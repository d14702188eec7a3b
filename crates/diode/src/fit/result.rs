use darkfit_solvers::least_squares::levenberg_marquardt as lm;

use crate::Params;

/// Terminal state of a fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitStatus {
    Converged,
    StoppedByIterationLimit,

    /// Stopped with a rank-deficient Jacobian; some parameters are not
    /// determined by the data.
    StoppedBySingularity,

    /// Non-finite residuals, an objective failure, or no sample solved.
    Failed,
}

impl From<lm::Status> for FitStatus {
    fn from(status: lm::Status) -> Self {
        match status {
            lm::Status::Converged => Self::Converged,
            lm::Status::MaxIters => Self::StoppedByIterationLimit,
            lm::Status::Singular => Self::StoppedBySingularity,
            lm::Status::Failed => Self::Failed,
        }
    }
}

/// The outcome of one fit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitResult {
    /// Final parameters, the best found.
    pub params: Params,

    pub status: FitStatus,

    /// Specific reason the optimizer stopped.
    pub termination: lm::Termination,

    /// Outer iterations completed.
    pub iterations: usize,

    /// Objective evaluations, each one root solve per sample.
    pub evaluations: usize,

    pub jacobian_evaluations: usize,

    pub initial_sum_of_squares: f64,
    pub sum_of_squares: f64,

    /// Condition number of the column-normalized Jacobian at `params`.
    ///
    /// Large values mean the data barely constrain some parameter
    /// combination. NaN if it could not be computed.
    pub condition: f64,

    /// Samples whose root solve did not converge at `params`.
    pub degraded_samples: usize,
}
