use std::error::Error as StdError;

use darkfit_solvers::least_squares::levenberg_marquardt as lm;
use thiserror::Error;

use crate::{DatasetError, ParamsError};

/// Errors that stop a fit from producing a [`FitResult`](super::FitResult).
#[derive(Debug, Error)]
pub enum FitError {
    #[error("invalid initial parameters: {0}")]
    InvalidParams(#[from] ParamsError),

    /// `predicted` counts the inputs to predict at, `observed` the outputs
    /// they are compared with.
    #[error("{predicted} predictions for {observed} observations")]
    DatasetLengthMismatch { predicted: usize, observed: usize },

    #[error("invalid dataset: {0}")]
    Dataset(#[from] DatasetError),

    /// The objective could not be evaluated at the initial or final
    /// parameters.
    #[error("objective evaluation failed")]
    Objective(#[source] Box<dyn StdError + Send + Sync>),
}

impl FitError {
    pub(super) fn from_optimizer(err: lm::Error) -> Self {
        match err {
            lm::Error::LengthMismatch {
                predicted,
                observed,
            } => Self::DatasetLengthMismatch {
                predicted,
                observed,
            },
            lm::Error::Problem(err) => Self::Objective(err),
        }
    }
}
