use darkfit_core::CurveFitProblem;

use crate::{
    Params,
    equation::Partials,
    evaluate::{EvaluateError, Predictions, evaluate},
    root::RootConfig,
};

/// How the optimizer gets the Jacobian of the predictions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JacobianMode {
    /// Forward differences computed by the optimizer.
    #[default]
    FiniteDifference,

    /// Implicit differentiation of `g(y(p), p) = 0` at the predicted roots.
    Analytic,
}

/// The single-diode model over a fixed set of inputs, as a curve-fit problem.
///
/// Predictions are solved from scratch on every call. In analytic mode the
/// Jacobian reuses the roots stored in the [`Predictions`] it is given, and
/// samples whose solve degraded get a zero row.
#[derive(Debug, Clone, Copy)]
pub struct DiodeObjective<'a> {
    x: &'a [f64],
    root: RootConfig,
    jacobian: JacobianMode,
}

impl<'a> DiodeObjective<'a> {
    /// Creates an objective that leaves differentiation to the optimizer.
    #[must_use]
    pub fn new(x: &'a [f64], root: RootConfig) -> Self {
        Self {
            x,
            root,
            jacobian: JacobianMode::FiniteDifference,
        }
    }

    #[must_use]
    pub fn with_jacobian(self, jacobian: JacobianMode) -> Self {
        Self { jacobian, ..self }
    }

    #[must_use]
    pub fn x(&self) -> &'a [f64] {
        self.x
    }
}

impl CurveFitProblem<4> for DiodeObjective<'_> {
    type Prediction = Predictions;
    type Error = EvaluateError;

    fn predict(&self, p: &[f64; 4]) -> Result<Predictions, EvaluateError> {
        evaluate(&Params::from(*p), self.x, &self.root)
    }

    fn jacobian(
        &self,
        p: &[f64; 4],
        prediction: &Predictions,
    ) -> Option<Result<Vec<[f64; 4]>, EvaluateError>> {
        match self.jacobian {
            JacobianMode::FiniteDifference => None,
            JacobianMode::Analytic => Some(Ok(sensitivities(&Params::from(*p), self.x, prediction))),
        }
    }
}

fn sensitivities(params: &Params, xs: &[f64], prediction: &Predictions) -> Vec<[f64; 4]> {
    xs.iter()
        .zip(prediction.values())
        .zip(prediction.outcomes())
        .map(|((&x, &y), outcome)| {
            if outcome.is_converged() {
                Partials::at(y, params, x).sensitivity()
            } else {
                [0.0; 4]
            }
        })
        .collect()
}
