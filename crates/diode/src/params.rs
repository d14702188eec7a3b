use thiserror::Error;

/// Parameters of the single-diode model.
///
/// `b` and `d` divide the voltage-like term `x − c·y`, so both must be
/// non-zero. All four must be finite.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Params {
    /// Saturation term multiplying the exponential.
    pub a: f64,

    /// Exponential slope, scaled by 100.
    pub b: f64,

    /// Series coefficient applied to the output.
    pub c: f64,

    /// Shunt coefficient, scaled by 10000.
    pub d: f64,
}

/// Errors for parameters the model cannot be evaluated at.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParamsError {
    #[error("parameters must be finite")]
    NonFinite,

    #[error("parameter b must be non-zero")]
    ZeroB,

    #[error("parameter d must be non-zero")]
    ZeroD,
}

impl Params {
    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// Checks that the model can be evaluated at these parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is non-finite or `b` or `d` is zero.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !self.to_array().iter().all(|p| p.is_finite()) {
            return Err(ParamsError::NonFinite);
        }
        if self.b == 0.0 {
            return Err(ParamsError::ZeroB);
        }
        if self.d == 0.0 {
            return Err(ParamsError::ZeroD);
        }
        Ok(())
    }

    /// Returns the parameters as `[a, b, c, d]`.
    #[must_use]
    pub const fn to_array(self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }
}

impl From<[f64; 4]> for Params {
    fn from([a, b, c, d]: [f64; 4]) -> Self {
        Self { a, b, c, d }
    }
}

impl From<Params> for [f64; 4] {
    fn from(params: Params) -> Self {
        params.to_array()
    }
}
