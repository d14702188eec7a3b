//! Fitting the implicit single-diode model to measurements.
//!
//! The model relates an input `x` to an output `y` through
//!
//! ```text
//! g(y; p, x) = a·exp((x − c·y) / (100·b)) + (x − c·y) / (10000·d) − y = 0
//! ```
//!
//! with parameters `p = (a, b, c, d)`. There is no closed form for `y`, so
//! every prediction is a root solve. A fit nests two solvers: Levenberg–Marquardt
//! adjusts `p`, and each of its objective evaluations runs one Brent solve per
//! sample.
//!
//! - [`equation`]: the implicit equation and its partial derivatives
//! - [`root`]: the per-sample root solve and its [`SolverOutcome`]
//! - [`evaluate()`]: predictions for every sample at fixed parameters
//! - [`DiodeObjective`]: the predictions as a [`CurveFitProblem`]
//! - [`Fit`]: the driver that runs one fit and reports a [`FitResult`]
//!
//! ```no_run
//! use darkfit_diode::{Dataset, Fit, FitConfig, Params};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dataset = Dataset::new(vec![0.1, 0.2, 0.3, 0.4, 0.5], vec![1e-3, 2.8e-3, 2.5e-2, 0.62, 16.4])?;
//! let initial = Params::new(1e-4, 2.59e-4, 2e-4, 1e-3);
//!
//! let result = Fit::new(&dataset, initial, FitConfig::default())?.run()?;
//! println!("{:?} after {} iterations", result.status, result.iterations);
//! # Ok(())
//! # }
//! ```
//!
//! [`CurveFitProblem`]: darkfit_core::CurveFitProblem

mod dataset;
mod objective;
mod params;

pub mod equation;
pub mod evaluate;
pub mod fit;
pub mod root;

pub use dataset::{Dataset, DatasetError, Sample};
pub use evaluate::{EvaluateError, Predictions, evaluate};
pub use fit::{Fit, FitConfig, FitError, FitResult, FitStatus};
pub use objective::{DiodeObjective, JacobianMode};
pub use params::{Params, ParamsError};
pub use root::{RootConfig, RootConfigError, RootError, RootFailure, RootStatus, SolverOutcome};
