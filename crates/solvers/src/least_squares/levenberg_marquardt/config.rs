use thiserror::Error;

/// Configuration for the Levenberg–Marquardt solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_iterations: usize,
    gradient_tolerance: f64,
    parameter_tolerance: f64,
    residual_tolerance: f64,
    finite_difference_step: f64,
    step_bound: f64,
}

/// Errors that can occur when validating a Levenberg–Marquardt config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("gradient_tolerance must be finite and non-negative")]
    GradientTolerance,

    #[error("parameter_tolerance must be finite and non-negative")]
    ParameterTolerance,

    #[error("residual_tolerance must be finite and non-negative")]
    ResidualTolerance,

    #[error("finite_difference_step must be finite and positive")]
    FiniteDifferenceStep,

    #[error("step_bound must be finite and positive")]
    StepBound,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            gradient_tolerance: 1e-15,
            parameter_tolerance: 1e-12,
            residual_tolerance: 1e-12,
            finite_difference_step: 1e-6,
            step_bound: 100.0,
        }
    }
}

impl Config {
    /// Creates a new config with validated tolerances and step sizes.
    ///
    /// # Errors
    ///
    /// Returns the first argument that is out of range. Tolerances must be
    /// finite and non-negative, step sizes finite and positive.
    pub fn new(
        max_iterations: usize,
        gradient_tolerance: f64,
        parameter_tolerance: f64,
        residual_tolerance: f64,
        finite_difference_step: f64,
        step_bound: f64,
    ) -> Result<Self, ConfigError> {
        let non_negative = |v: f64| v.is_finite() && v >= 0.0;
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if !non_negative(gradient_tolerance) {
            return Err(ConfigError::GradientTolerance);
        }
        if !non_negative(parameter_tolerance) {
            return Err(ConfigError::ParameterTolerance);
        }
        if !non_negative(residual_tolerance) {
            return Err(ConfigError::ResidualTolerance);
        }
        if !positive(finite_difference_step) {
            return Err(ConfigError::FiniteDifferenceStep);
        }
        if !positive(step_bound) {
            return Err(ConfigError::StepBound);
        }

        Ok(Self {
            max_iterations,
            gradient_tolerance,
            parameter_tolerance,
            residual_tolerance,
            finite_difference_step,
            step_bound,
        })
    }

    /// Returns a copy with a different iteration limit.
    #[must_use]
    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }

    /// Returns the maximum number of outer iterations (Jacobian evaluations).
    #[must_use]
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Returns the tolerance on the cosine between the residual vector and
    /// every Jacobian column.
    #[must_use]
    pub fn gradient_tolerance(&self) -> f64 {
        self.gradient_tolerance
    }

    /// Returns the tolerance on the relative change in the scaled parameters.
    #[must_use]
    pub fn parameter_tolerance(&self) -> f64 {
        self.parameter_tolerance
    }

    /// Returns the tolerance on the relative reduction in the sum of squares,
    /// both actual and predicted.
    #[must_use]
    pub fn residual_tolerance(&self) -> f64 {
        self.residual_tolerance
    }

    /// Returns the relative step for forward-difference Jacobians.
    ///
    /// Parameter `p_j` is perturbed by `step * |p_j|`, or by `step` when
    /// `p_j` is zero.
    #[must_use]
    pub fn finite_difference_step(&self) -> f64 {
        self.finite_difference_step
    }

    /// Returns the factor for the initial trust-region radius, relative to the
    /// scaled norm of the initial parameters.
    #[must_use]
    pub fn step_bound(&self) -> f64 {
        self.step_bound
    }

    /// Evaluation budget handed to the optimizer.
    ///
    /// The optimizer caps residual evaluations at `patience * (n + 1)`. The
    /// budget is generous so the exact iteration limit is what stops a fit.
    pub(super) fn patience(&self) -> usize {
        self.max_iterations.saturating_mul(10).max(1)
    }
}
