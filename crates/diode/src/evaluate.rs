//! Predictions for every sample at fixed parameters.

use thiserror::Error;
use tracing::trace;

use crate::{
    Params, ParamsError,
    root::{RootConfig, RootStatus, SolverOutcome, solve_root},
};

/// Predicted outputs, one per sample in dataset order.
///
/// Each value sits beside the [`SolverOutcome`] that produced it, so samples
/// whose root solve did not converge can be told apart from the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct Predictions {
    values: Vec<f64>,
    outcomes: Vec<SolverOutcome>,
}

/// Errors that prevent evaluating the model at all.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum EvaluateError {
    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] ParamsError),
}

/// Solves the implicit equation at each `x` in order.
///
/// A sample whose solve does not converge still gets a value:
/// - after [`RootStatus::MaxIterationsReached`], the solver's best estimate
/// - after a numerical failure, the last converged root earlier in this call,
///   or the solver's best endpoint if no sample has converged yet
///
/// Nothing is cached, so identical arguments give bit-identical predictions.
///
/// # Errors
///
/// Returns an error if the parameters are invalid, checked before any solve
/// runs.
pub fn evaluate(
    params: &Params,
    xs: &[f64],
    root_config: &RootConfig,
) -> Result<Predictions, EvaluateError> {
    params.validate()?;

    let mut values = Vec::with_capacity(xs.len());
    let mut outcomes = Vec::with_capacity(xs.len());
    let mut last_converged = None;

    for (index, &x) in xs.iter().enumerate() {
        let outcome = solve_root(params, x, root_config);
        let value = match outcome.status {
            RootStatus::Converged => {
                last_converged = Some(outcome.root);
                outcome.root
            }
            RootStatus::MaxIterationsReached => outcome.root,
            RootStatus::NumericalFailure(_) => last_converged.unwrap_or(outcome.root),
        };

        if !outcome.is_converged() {
            trace!(
                index,
                x,
                status = ?outcome.status,
                iters = outcome.iters,
                value,
                "degraded sample"
            );
        }

        values.push(value);
        outcomes.push(outcome);
    }

    Ok(Predictions { values, outcomes })
}

impl Predictions {
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn outcomes(&self) -> &[SolverOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the indices of samples whose root solve did not converge.
    pub fn degraded(&self) -> impl Iterator<Item = usize> + '_ {
        self.outcomes
            .iter()
            .enumerate()
            .filter(|(_, outcome)| !outcome.is_converged())
            .map(|(index, _)| index)
    }

    #[must_use]
    pub fn degraded_count(&self) -> usize {
        self.degraded().count()
    }

    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

impl AsRef<[f64]> for Predictions {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{RootFailure, equation};

    const TRUE: Params = Params::new(1e-6, 3e-4, 1e-4, 1e-2);

    fn xs() -> Vec<f64> {
        (1..=10).map(|i| 0.05 * f64::from(i)).collect()
    }

    #[test]
    fn predictions_satisfy_the_equation() {
        let xs = xs();
        let predictions = evaluate(&TRUE, &xs, &RootConfig::default()).expect("valid inputs");

        assert_eq!(predictions.len(), xs.len());
        assert_eq!(predictions.degraded_count(), 0);
        for (&y, &x) in predictions.values().iter().zip(&xs) {
            assert!(equation::residual(y, &TRUE, x).abs() < 1e-8);
        }

        // Outputs grow with the input.
        assert!(predictions.values().windows(2).all(|w| w[0] < w[1]));
        assert_relative_eq!(predictions.values()[9], 16.392_416, max_relative = 1e-5);
    }

    #[test]
    fn identical_inputs_are_bit_identical() {
        let xs = xs();
        let config = RootConfig::default();
        let first = evaluate(&TRUE, &xs, &config).expect("valid inputs");
        let second = evaluate(&TRUE, &xs, &config).expect("valid inputs");

        let bits = |p: &Predictions| p.values().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&first), bits(&second));
        assert_eq!(first, second);
    }

    #[test]
    fn invalid_params_fail_before_solving() {
        let params = Params { d: 0.0, ..TRUE };
        assert_eq!(
            evaluate(&params, &xs(), &RootConfig::default()),
            Err(EvaluateError::InvalidParams(ParamsError::ZeroD))
        );
    }

    #[test]
    fn failed_sample_reuses_last_converged_root() {
        // Roots at x = 0.05 and 0.1 lie below 1e-3; at x = 0.5 the root is
        // about 16, so the bracket [0, 1] loses its sign change there.
        let config = RootConfig::new([0.0, 1.0], *RootConfig::default().solver())
            .expect("valid bracket");
        let xs = [0.05, 0.1, 0.5];
        let predictions = evaluate(&TRUE, &xs, &config).expect("valid inputs");

        assert_eq!(predictions.degraded().collect::<Vec<_>>(), vec![2]);
        assert_eq!(
            predictions.outcomes()[2].status,
            RootStatus::NumericalFailure(RootFailure::BracketInvalid)
        );
        assert_eq!(
            predictions.values()[2].to_bits(),
            predictions.values()[1].to_bits()
        );
    }

    #[test]
    fn failed_first_sample_uses_best_endpoint() {
        let config = RootConfig::new([500.0, 1000.0], *RootConfig::default().solver())
            .expect("valid bracket");
        let predictions = evaluate(&TRUE, &[0.5], &config).expect("valid inputs");

        assert_eq!(predictions.degraded_count(), 1);
        assert_relative_eq!(predictions.values()[0], 500.0);
    }

    #[test]
    fn iteration_cap_keeps_best_estimate() {
        let config = RootConfig::default();
        let config = config.with_solver(config.solver().with_max_iters(3));
        let xs = xs();
        let predictions = evaluate(&TRUE, &xs, &config).expect("valid inputs");

        for (value, outcome) in predictions.values().iter().zip(predictions.outcomes()) {
            assert_eq!(value.to_bits(), outcome.root.to_bits());
            assert!(outcome.bracket[0] <= *value && *value <= outcome.bracket[1]);
        }
        assert!(predictions.degraded_count() > 0);
    }
}
