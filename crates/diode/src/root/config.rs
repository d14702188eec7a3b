use darkfit_solvers::equation::brent;
use thiserror::Error;

/// Settings for each per-sample root solve.
///
/// The default bracket `[0, 1000]` covers outputs of the model at physically
/// meaningful parameters. The default solver runs at most 100 iterations and
/// stops once the bracket is within `1e-12·|y|`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootConfig {
    bracket: [f64; 2],
    solver: brent::Config,
}

/// Errors that can occur when validating a [`RootConfig`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum RootConfigError {
    #[error("bracket [{0}, {1}] must be finite with distinct endpoints")]
    Bracket(f64, f64),
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            bracket: [0.0, 1000.0],
            solver: brent::Config::new(100, 0.0, 1e-12, 0.0).unwrap_or_default(),
        }
    }
}

impl RootConfig {
    /// Creates a config from a bracket and already validated solver settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the bracket is non-finite or has zero width.
    pub fn new(bracket: [f64; 2], solver: brent::Config) -> Result<Self, RootConfigError> {
        let [lo, hi] = bracket;
        if !lo.is_finite() || !hi.is_finite() || lo == hi {
            return Err(RootConfigError::Bracket(lo, hi));
        }
        Ok(Self { bracket, solver })
    }

    /// Returns a copy with different solver settings and the same bracket.
    #[must_use]
    pub fn with_solver(self, solver: brent::Config) -> Self {
        Self { solver, ..self }
    }

    /// Initial bracket, used unchanged for every sample.
    #[must_use]
    pub fn bracket(&self) -> [f64; 2] {
        self.bracket
    }

    /// Brent solver settings.
    #[must_use]
    pub fn solver(&self) -> &brent::Config {
        &self.solver
    }
}
