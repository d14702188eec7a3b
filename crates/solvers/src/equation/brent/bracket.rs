use thiserror::Error;

/// Errors that can occur when constructing a bracket.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BracketError {
    #[error("bracket bounds must be finite")]
    NonFinite,

    #[error("bracket bounds must have non-zero width")]
    ZeroWidth,

    #[error("residuals at the bracket bounds must have opposite signs")]
    NoSignChange,
}

/// The sign of a non-zero residual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// Returns the sign of `value`, or `None` for zero and NaN.
    #[must_use]
    pub fn of(value: f64) -> Option<Self> {
        if value > 0.0 {
            Some(Self::Positive)
        } else if value < 0.0 {
            Some(Self::Negative)
        } else {
            None
        }
    }
}

/// Validated, ordered bracket bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Bounds {
    pub(super) left: f64,
    pub(super) right: f64,
}

impl Bounds {
    /// Orders the bounds so that `left < right`.
    pub(super) fn new(bracket: [f64; 2]) -> Result<Self, BracketError> {
        let [a, b] = bracket;
        if !a.is_finite() || !b.is_finite() {
            return Err(BracketError::NonFinite);
        }
        if a == b {
            return Err(BracketError::ZeroWidth);
        }

        let (left, right) = if a < b { (a, b) } else { (b, a) };
        Ok(Self { left, right })
    }
}

/// Checks that two endpoint residuals bracket a root.
///
/// An exact zero at either endpoint counts as a bracketed root.
pub(super) fn check_sign_change(left: f64, right: f64) -> Result<(), BracketError> {
    match (Sign::of(left), Sign::of(right)) {
        (Some(l), Some(r)) if l == r => Err(BracketError::NoSignChange),
        _ => Ok(()),
    }
}
