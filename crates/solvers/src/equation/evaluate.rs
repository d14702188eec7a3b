use thiserror::Error;

use darkfit_core::{EquationProblem, Model, Snapshot};

/// Residuals of an equation problem at solver variables `x`, with the model
/// call that produced them.
#[derive(Debug, Clone)]
pub struct Evaluation<I, O, const N: usize> {
    pub x: [f64; N],
    pub residuals: [f64; N],
    pub snapshot: Snapshot<I, O>,
}

impl<I, O, const N: usize> Evaluation<I, O, N> {
    /// Returns true if every residual is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.residuals.iter().all(|r| r.is_finite())
    }
}

impl<I, O> Evaluation<I, O, 1> {
    #[must_use]
    pub fn residual(&self) -> f64 {
        self.residuals[0]
    }
}

/// The stage of an evaluation that failed.
#[derive(Debug, Error)]
pub enum EvalError<ME, PE> {
    #[error("could not map solver variables to a model input")]
    Input(#[source] PE),

    #[error("model call failed")]
    Model(#[source] ME),

    #[error("could not compute residuals")]
    Residuals(#[source] PE),
}

/// Result of [`evaluate`] for a given model and problem.
pub type EvaluateResult<M, P, const N: usize> = Result<
    Evaluation<<M as Model>::Input, <M as Model>::Output, N>,
    EvalError<<M as Model>::Error, <P as EquationProblem<N>>::Error>,
>;

/// Runs one pass of problem input, model call, and residuals at `x`.
///
/// # Errors
///
/// Returns the stage that failed.
pub fn evaluate<M, P, const N: usize>(
    model: &M,
    problem: &P,
    x: [f64; N],
) -> EvaluateResult<M, P, N>
where
    M: Model,
    P: EquationProblem<N, Input = M::Input, Output = M::Output>,
{
    let input = problem.input(&x).map_err(EvalError::Input)?;
    let output = model.call(&input).map_err(EvalError::Model)?;
    let residuals = problem
        .residuals(&input, &output)
        .map_err(EvalError::Residuals)?;

    Ok(Evaluation {
        x,
        residuals,
        snapshot: Snapshot::new(input, output),
    })
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use thiserror::Error;

    use super::*;

    #[derive(Debug, Error)]
    #[error("negative input")]
    struct Negative;

    /// Doubles its input.
    struct Double;

    impl Model for Double {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, x: &f64) -> Result<f64, Self::Error> {
            Ok(2.0 * x)
        }
    }

    /// Solves `2x = target` for non-negative `x`.
    struct Target(f64);

    impl EquationProblem<1> for Target {
        type Input = f64;
        type Output = f64;
        type Error = Negative;

        fn input(&self, x: &[f64; 1]) -> Result<f64, Negative> {
            if x[0] < 0.0 { Err(Negative) } else { Ok(x[0]) }
        }

        fn residuals(&self, _input: &f64, output: &f64) -> Result<[f64; 1], Negative> {
            Ok([output - self.0])
        }
    }

    #[test]
    fn keeps_input_and_output() {
        let eval = evaluate(&Double, &Target(3.0), [2.0]).expect("valid input");

        assert_eq!(eval.residual(), 1.0);
        assert_eq!(eval.snapshot.into_parts(), (2.0, 4.0));
    }

    #[test]
    fn reports_failing_stage() {
        let err = evaluate(&Double, &Target(3.0), [-1.0]).expect_err("negative input");
        assert!(matches!(err, EvalError::Input(Negative)));
    }

    #[test]
    fn detects_non_finite_residuals() {
        let eval = evaluate(&Double, &Target(f64::INFINITY), [1.0]).expect("valid input");
        assert!(!eval.is_finite());
    }
}
