//! Running one fit of the model to a dataset.
//!
//! A [`Fit`] is created from a dataset, an initial parameter guess, and a
//! [`FitConfig`]. [`Fit::new`] checks everything that can be checked up front.
//! [`Fit::run`] consumes the fit, so a finished fit cannot be resumed or
//! retried.
//!
//! How the optimizer stopped is reported in [`FitResult::status`], not as an
//! error. An objective that fails partway through ends the fit as
//! [`FitStatus::Failed`] at the best parameters found. Errors are reserved for
//! inputs the fit cannot start from.

mod config;
mod error;
mod result;

pub use config::FitConfig;
pub use error::FitError;
pub use result::{FitResult, FitStatus};

use darkfit_solvers::least_squares::levenberg_marquardt as lm;
use tracing::{debug, info, info_span};

use crate::{Dataset, DatasetError, DiodeObjective, Params, evaluate};

/// A validated fit, ready to run.
#[derive(Debug, Clone, Copy)]
pub struct Fit<'a> {
    dataset: &'a Dataset,
    initial: Params,
    config: FitConfig,
}

impl<'a> Fit<'a> {
    /// Prepares a fit of `dataset` starting from `initial`.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial parameters are invalid.
    pub fn new(dataset: &'a Dataset, initial: Params, config: FitConfig) -> Result<Self, FitError> {
        initial.validate()?;
        Ok(Self {
            dataset,
            initial,
            config,
        })
    }

    /// Runs the fit to completion.
    ///
    /// A fit whose final parameters leave every sample degraded is reported
    /// as [`FitStatus::Failed`], whatever the optimizer concluded.
    ///
    /// # Errors
    ///
    /// Returns an error if the objective produced a different number of
    /// predictions than there are samples, or if it could not be evaluated at
    /// the initial parameters.
    pub fn run(self) -> Result<FitResult, FitError> {
        let span = info_span!(
            "fit",
            samples = self.dataset.len(),
            jacobian = ?self.config.jacobian,
        );
        let _guard = span.enter();

        let objective = DiodeObjective::new(self.dataset.x(), self.config.root)
            .with_jacobian(self.config.jacobian);

        debug!(
            initial = ?self.initial,
            max_iterations = self.config.optimizer.max_iterations(),
            "starting fit"
        );

        let solution = lm::fit(
            &objective,
            self.initial.to_array(),
            self.dataset.y(),
            &self.config.optimizer,
        )
        .map_err(FitError::from_optimizer)?;

        let params = Params::from(solution.params);
        let final_predictions = evaluate(&params, self.dataset.x(), &self.config.root)
            .map_err(|err| FitError::Objective(Box::new(err)))?;

        let degraded_samples = final_predictions.degraded_count();
        let status = if degraded_samples == self.dataset.len() {
            debug!(degraded_samples, "every sample is degraded at the final parameters");
            FitStatus::Failed
        } else {
            FitStatus::from(solution.status)
        };

        let result = FitResult {
            params,
            status,
            termination: solution.termination,
            iterations: solution.iters,
            evaluations: solution.evaluations,
            jacobian_evaluations: solution.jacobian_evaluations,
            initial_sum_of_squares: solution.initial_sum_of_squares,
            sum_of_squares: solution.sum_of_squares,
            condition: solution.condition,
            degraded_samples,
        };

        info!(
            status = ?result.status,
            termination = ?result.termination,
            iterations = result.iterations,
            sum_of_squares = result.sum_of_squares,
            degraded_samples = result.degraded_samples,
            "fit finished"
        );

        Ok(result)
    }
}

/// Fits parallel input and output columns in one call.
///
/// # Errors
///
/// Returns [`FitError::DatasetLengthMismatch`] if the columns differ in
/// length, and otherwise the errors of [`Dataset::new`], [`Fit::new`], and
/// [`Fit::run`].
pub fn fit(
    x: Vec<f64>,
    y: Vec<f64>,
    initial: Params,
    config: FitConfig,
) -> Result<FitResult, FitError> {
    let dataset = Dataset::new(x, y).map_err(|err| match err {
        DatasetError::LengthMismatch { x, y } => FitError::DatasetLengthMismatch {
            predicted: x,
            observed: y,
        },
        other => FitError::Dataset(other),
    })?;
    Fit::new(&dataset, initial, config)?.run()
}
