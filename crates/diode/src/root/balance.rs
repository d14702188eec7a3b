use std::convert::Infallible;

use darkfit_core::{EquationProblem, Model};

use crate::{Params, equation};

/// The implicit equation at one sample, as a model from `y` to `g(y)`.
pub(super) struct Balance<'a> {
    pub(super) params: &'a Params,
    pub(super) x: f64,
}

impl Model for Balance<'_> {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, y: &f64) -> Result<f64, Self::Error> {
        Ok(equation::residual(*y, self.params, self.x))
    }
}

/// Drives the balance output to zero.
pub(super) struct Zero;

impl EquationProblem<1> for Zero {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, y: &[f64; 1]) -> Result<f64, Self::Error> {
        Ok(y[0])
    }

    fn residuals(&self, _input: &f64, g: &f64) -> Result<[f64; 1], Self::Error> {
        Ok([*g])
    }
}
