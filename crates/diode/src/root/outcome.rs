use thiserror::Error;

/// How a per-sample root solve finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootStatus {
    /// The bracket met the width tolerance, or the residual vanished.
    Converged,

    /// The iteration cap was reached first.
    MaxIterationsReached,

    /// The solve could not proceed.
    NumericalFailure(RootFailure),
}

/// Cause of a [`RootStatus::NumericalFailure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootFailure {
    /// The initial bracket had no sign change.
    BracketInvalid,

    /// The equation evaluated to a non-finite value.
    NonFiniteResidual,
}

/// Result of one root solve.
///
/// `root` is always the best available estimate. After a numerical failure
/// it is the bracket endpoint with the smaller finite residual, or NaN if
/// neither endpoint is finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOutcome {
    pub root: f64,

    /// Final bracket as `[lower, upper]`.
    pub bracket: [f64; 2],

    pub iters: usize,
    pub status: RootStatus,
}

/// A root solve that did not converge, for callers that want `?`.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum RootError {
    #[error("no sign change across bracket [{lo}, {hi}]")]
    BracketInvalid { lo: f64, hi: f64 },

    #[error("root not converged after {iters} iterations (estimate {estimate})")]
    RootNotConverged { iters: usize, estimate: f64 },

    #[error("non-finite residual after {iters} iterations")]
    NonFiniteResidual { iters: usize },
}

impl SolverOutcome {
    /// Returns the width of the final bracket.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.bracket[1] - self.bracket[0]
    }

    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == RootStatus::Converged
    }

    /// Returns the root if the solve converged.
    ///
    /// # Errors
    ///
    /// Returns the matching [`RootError`] for any other status.
    pub fn into_result(self) -> Result<f64, RootError> {
        let [lo, hi] = self.bracket;
        match self.status {
            RootStatus::Converged => Ok(self.root),
            RootStatus::MaxIterationsReached => Err(RootError::RootNotConverged {
                iters: self.iters,
                estimate: self.root,
            }),
            RootStatus::NumericalFailure(RootFailure::BracketInvalid) => {
                Err(RootError::BracketInvalid { lo, hi })
            }
            RootStatus::NumericalFailure(RootFailure::NonFiniteResidual) => {
                Err(RootError::NonFiniteResidual { iters: self.iters })
            }
        }
    }
}
