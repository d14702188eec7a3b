use std::error::Error as StdError;

use thiserror::Error;

/// Errors that can occur during a Levenberg–Marquardt fit.
#[derive(Debug, Error)]
pub enum Error {
    #[error("problem predicted {predicted} values for {observed} observations")]
    LengthMismatch { predicted: usize, observed: usize },

    #[error("problem error")]
    Problem(#[source] Box<dyn StdError + Send + Sync>),
}
