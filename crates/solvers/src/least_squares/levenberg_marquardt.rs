//! Levenberg–Marquardt fitting of curve-fit problems.
//!
//! # Algorithm
//!
//! The solver minimizes `Σ (predicted_i - observed_i)²` with the MINPACK-style
//! trust-region Levenberg–Marquardt method of the `levenberg-marquardt` crate.
//! Each iteration linearizes the predictions through the Jacobian and takes the
//! step that minimizes the linearized residual inside a trust region, growing
//! or shrinking the region depending on how well the linear model predicted
//! the actual reduction.
//!
//! The Jacobian comes from [`CurveFitProblem::jacobian`] when the problem
//! provides one. Otherwise it is approximated by forward differences with a
//! relative step of [`Config::finite_difference_step`].
//!
//! # Iterations
//!
//! One iteration is one Jacobian evaluation. The iteration limit is exact: the
//! solver stops as soon as a step would need the Jacobian for iteration
//! `max_iterations + 1`. With `max_iterations = 0` the optimizer never starts
//! and the initial parameters are returned unchanged.
//!
//! # Diagnostics
//!
//! Every [`Solution`] carries the initial and final sum of squares, evaluation
//! counts, and the condition number of the column-normalized Jacobian at the
//! final parameters. A numerically rank-deficient Jacobian turns a converged
//! fit with nonzero residuals into [`Termination::SingularJacobian`].
//!
//! # Failures
//!
//! A problem error at the initial parameters is returned as an [`Error`].
//! Once the optimizer has started, a problem error or a non-finite residual
//! ends the fit with [`Status::Failed`] at the best parameters seen so far.
//!
//! [`CurveFitProblem`]: darkfit_core::CurveFitProblem
//! [`CurveFitProblem::jacobian`]: darkfit_core::CurveFitProblem::jacobian

mod condition;
mod config;
mod error;
mod finite_diff;
mod problem;
mod solution;


pub use config::{Config, ConfigError};
pub use error::Error;
pub use solution::{Solution, Status, Termination};

use ::levenberg_marquardt::{LevenbergMarquardt, TerminationReason};
use tracing::debug;

use darkfit_core::CurveFitProblem;

use problem::{Adapter, Failure};

/// Fits the problem's parameters to `observed`, starting from `initial`.
///
/// # Errors
///
/// Returns an error if:
/// - the number of predictions differs from the number of observations,
///   checked on the initial prediction before any optimizer step
/// - the problem fails to predict at `initial`
pub fn fit<P, const N: usize>(
    problem: &P,
    initial: [f64; N],
    observed: &[f64],
    config: &Config,
) -> Result<Solution<N>, Error>
where
    P: CurveFitProblem<N>,
{
    let adapter = Adapter::new(problem, observed, config, initial)?;
    let initial_sum_of_squares = adapter.sum_of_squares();
    debug!(
        observations = observed.len(),
        initial_sum_of_squares, "starting levenberg-marquardt fit"
    );

    if config.max_iterations() == 0 {
        return Ok(adapter.finish(
            Status::MaxIters,
            Termination::IterationLimit,
            initial_sum_of_squares,
        ));
    }

    if !initial_sum_of_squares.is_finite() {
        debug!("initial residuals are not finite");
        return Ok(adapter.finish(
            Status::Failed,
            Termination::InvalidValues,
            initial_sum_of_squares,
        ));
    }

    let (mut adapter, report) = LevenbergMarquardt::new()
        .with_ftol(config.residual_tolerance())
        .with_xtol(config.parameter_tolerance())
        .with_gtol(config.gradient_tolerance())
        .with_stepbound(config.step_bound())
        .with_patience(config.patience())
        .minimize(adapter);

    debug!(reason = ?report.termination, "levenberg-marquardt returned");

    match adapter.take_failure() {
        Some(Failure::Problem(source)) => {
            debug!(error = %source, "problem failed during the fit");
            adapter.restore_best();
            return Ok(adapter.finish(
                Status::Failed,
                Termination::InvalidValues,
                initial_sum_of_squares,
            ));
        }
        Some(failure) => return Err(failure.into()),
        None => {}
    }

    let (status, termination) = if adapter.hit_iteration_limit() {
        (Status::MaxIters, Termination::IterationLimit)
    } else {
        classify(&report.termination)
    };

    Ok(adapter.finish(status, termination, initial_sum_of_squares))
}

/// Maps the optimizer's termination reason to a status and termination.
fn classify(reason: &TerminationReason) -> (Status, Termination) {
    match reason {
        TerminationReason::ResidualsZero => (Status::Converged, Termination::ZeroResidual),
        TerminationReason::Orthogonal => (Status::Converged, Termination::SmallGradient),
        TerminationReason::Converged { ftol: true, .. } => {
            (Status::Converged, Termination::SmallResidualReduction)
        }
        TerminationReason::Converged { .. } => {
            (Status::Converged, Termination::SmallParameterStep)
        }
        TerminationReason::NoImprovementPossible(_) => {
            (Status::Converged, Termination::Stagnation)
        }
        TerminationReason::LostPatience => (Status::MaxIters, Termination::IterationLimit),
        _ => (Status::Failed, Termination::InvalidValues),
    }
}
