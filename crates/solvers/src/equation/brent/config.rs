use thiserror::Error;

/// Configuration for the Brent solver.
///
/// Zero tolerances are allowed. With both x tolerances at zero the solver
/// runs until the bracket collapses at machine precision or `max_iters` is hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_iters: usize,
    x_abs_tol: f64,
    x_rel_tol: f64,
    residual_tol: f64,
}

/// Errors that can occur when validating a Brent solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("x_abs_tol must be finite and non-negative")]
    XAbs,

    #[error("x_rel_tol must be finite and non-negative")]
    XRel,

    #[error("residual_tol must be finite and non-negative")]
    Residual,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 100,
            x_abs_tol: 1e-12,
            x_rel_tol: 1e-12,
            residual_tol: 0.0,
        }
    }
}

impl Config {
    /// Creates a new config with validated tolerances.
    ///
    /// The solver stops once the bracket is within
    /// `x_abs_tol + x_rel_tol * |x|`, or the residual magnitude is within
    /// `residual_tol`.
    ///
    /// # Errors
    ///
    /// Returns an error if any tolerance is negative or non-finite.
    pub fn new(
        max_iters: usize,
        x_abs_tol: f64,
        x_rel_tol: f64,
        residual_tol: f64,
    ) -> Result<Self, ConfigError> {
        if !is_tolerance(x_abs_tol) {
            return Err(ConfigError::XAbs);
        }
        if !is_tolerance(x_rel_tol) {
            return Err(ConfigError::XRel);
        }
        if !is_tolerance(residual_tol) {
            return Err(ConfigError::Residual);
        }

        Ok(Self {
            max_iters,
            x_abs_tol,
            x_rel_tol,
            residual_tol,
        })
    }

    /// Returns a copy with a different iteration limit.
    #[must_use]
    pub fn with_max_iters(self, max_iters: usize) -> Self {
        Self { max_iters, ..self }
    }

    /// Returns the maximum number of iterations after the endpoint evaluations.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    #[must_use]
    pub fn x_abs_tol(&self) -> f64 {
        self.x_abs_tol
    }

    #[must_use]
    pub fn x_rel_tol(&self) -> f64 {
        self.x_rel_tol
    }

    /// Returns the residual magnitude at or below which the solver stops.
    #[must_use]
    pub fn residual_tol(&self) -> f64 {
        self.residual_tol
    }

    /// Returns the width tolerance at `x`.
    #[must_use]
    pub fn x_tolerance(&self, x: f64) -> f64 {
        self.x_abs_tol + self.x_rel_tol * x.abs()
    }
}

fn is_tolerance(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
