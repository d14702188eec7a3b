use std::cell::{Cell, RefCell};
use std::error::Error as StdError;

use ::levenberg_marquardt::LeastSquaresProblem;
use nalgebra::{DMatrix, DVector, Dyn, storage::Owned};
use tracing::trace;

use darkfit_core::CurveFitProblem;

use super::{Config, Error, Solution, Status, Termination, condition, finite_diff};

/// Why the adapter could not hand the optimizer residuals or a Jacobian.
pub(super) enum Failure {
    LengthMismatch { predicted: usize, observed: usize },
    Problem(Box<dyn StdError + Send + Sync>),
}

impl From<Failure> for Error {
    fn from(failure: Failure) -> Self {
        match failure {
            Failure::LengthMismatch {
                predicted,
                observed,
            } => Self::LengthMismatch {
                predicted,
                observed,
            },
            Failure::Problem(source) => Self::Problem(source),
        }
    }
}

/// Presents a [`CurveFitProblem`] to the optimizer as a least-squares problem.
///
/// The adapter owns the current parameters and the prediction made at them,
/// so the Jacobian requested for those parameters can reuse the prediction.
/// Failures are recorded and reported after the optimizer returns, since the
/// optimizer only sees `None`. The best parameters seen so far are kept so a
/// fit interrupted by a failure can still report them.
pub(super) struct Adapter<'a, P, const N: usize>
where
    P: CurveFitProblem<N>,
{
    problem: &'a P,
    observed: &'a [f64],
    config: &'a Config,
    params: [f64; N],
    prediction: Option<P::Prediction>,
    best: ([f64; N], f64),
    failure: RefCell<Option<Failure>>,
    evaluations: Cell<usize>,
    jacobians: Cell<usize>,
    capped: Cell<bool>,
}

impl<'a, P, const N: usize> Adapter<'a, P, N>
where
    P: CurveFitProblem<N>,
{
    /// Creates an adapter holding the prediction at `initial`.
    pub(super) fn new(
        problem: &'a P,
        observed: &'a [f64],
        config: &'a Config,
        initial: [f64; N],
    ) -> Result<Self, Error> {
        let mut adapter = Self {
            problem,
            observed,
            config,
            params: initial,
            prediction: None,
            best: (initial, f64::INFINITY),
            failure: RefCell::new(None),
            evaluations: Cell::new(0),
            jacobians: Cell::new(0),
            capped: Cell::new(false),
        };

        let prediction = adapter.predict(&initial)?;
        adapter.best.1 = sum_of_squares(prediction.as_ref(), observed);
        adapter.prediction = Some(prediction);
        Ok(adapter)
    }

    /// Predicts at `params`, checking the prediction length.
    fn predict(&self, params: &[f64; N]) -> Result<P::Prediction, Failure> {
        self.evaluations.set(self.evaluations.get() + 1);

        let prediction = self
            .problem
            .predict(params)
            .map_err(|e| Failure::Problem(Box::new(e)))?;

        let predicted = prediction.as_ref().len();
        if predicted != self.observed.len() {
            return Err(Failure::LengthMismatch {
                predicted,
                observed: self.observed.len(),
            });
        }
        Ok(prediction)
    }

    /// Keeps the first failure; later ones are consequences of it.
    fn record(&self, failure: Failure) {
        let mut slot = self.failure.borrow_mut();
        if slot.is_none() {
            *slot = Some(failure);
        }
    }

    pub(super) fn take_failure(&self) -> Option<Failure> {
        self.failure.borrow_mut().take()
    }

    /// Moves back to the parameters with the smallest sum of squares seen.
    pub(super) fn restore_best(&mut self) {
        self.params = self.best.0;
    }

    /// Returns true if the optimizer asked for more iterations than allowed.
    pub(super) fn hit_iteration_limit(&self) -> bool {
        self.capped.get()
    }

    /// Sum of squared residuals at the current parameters.
    pub(super) fn sum_of_squares(&self) -> f64 {
        self.prediction
            .as_ref()
            .map_or(f64::NAN, |p| sum_of_squares(p.as_ref(), self.observed))
    }

    /// Computes Jacobian rows at the current parameters.
    fn jacobian_rows(&self, prediction: &P::Prediction) -> Result<Vec<[f64; N]>, Failure> {
        let rows = match self.problem.jacobian(&self.params, prediction) {
            Some(rows) => rows.map_err(|e| Failure::Problem(Box::new(e)))?,
            None => finite_diff::forward(
                |p| self.predict(p),
                &self.params,
                prediction.as_ref(),
                self.config.finite_difference_step(),
            )?,
        };

        if rows.len() != self.observed.len() {
            return Err(Failure::LengthMismatch {
                predicted: rows.len(),
                observed: self.observed.len(),
            });
        }
        Ok(rows)
    }

    /// Packages the current parameters into a solution.
    ///
    /// The final prediction and Jacobian are computed afresh at the returned
    /// parameters so the reported sum of squares and condition number match
    /// them exactly. Both are NaN if the problem cannot predict there.
    ///
    /// A converged status is downgraded to [`Status::Singular`] when the final
    /// Jacobian is numerically rank-deficient, unless the residuals are zero.
    pub(super) fn finish(
        self,
        status: Status,
        termination: Termination,
        initial_sum_of_squares: f64,
    ) -> Solution<N> {
        let params = self.params;
        let (sum_of_squares, condition) = match self.predict(&params) {
            Ok(prediction) => (
                sum_of_squares(prediction.as_ref(), self.observed),
                self.jacobian_rows(&prediction)
                    .map_or(f64::NAN, |rows| condition::condition_number(&rows)),
            ),
            Err(_) => (f64::NAN, f64::NAN),
        };

        let singular = status == Status::Converged
            && termination != Termination::ZeroResidual
            && condition::is_rank_deficient(condition, self.observed.len(), N);
        let (status, termination) = if singular {
            (Status::Singular, Termination::SingularJacobian)
        } else {
            (status, termination)
        };

        Solution {
            status,
            termination,
            params,
            iters: self.jacobians.get(),
            evaluations: self.evaluations.get(),
            jacobian_evaluations: self.jacobians.get(),
            initial_sum_of_squares,
            sum_of_squares,
            condition,
        }
    }
}

impl<P, const N: usize> LeastSquaresProblem<f64, Dyn, Dyn> for Adapter<'_, P, N>
where
    P: CurveFitProblem<N>,
{
    type ResidualStorage = Owned<f64, Dyn>;
    type JacobianStorage = Owned<f64, Dyn, Dyn>;
    type ParameterStorage = Owned<f64, Dyn>;

    fn set_params(&mut self, x: &DVector<f64>) {
        self.params = std::array::from_fn(|j| x[j]);
        self.prediction = match self.predict(&self.params) {
            Ok(prediction) => {
                let ssq = sum_of_squares(prediction.as_ref(), self.observed);
                if ssq < self.best.1 {
                    self.best = (self.params, ssq);
                }
                Some(prediction)
            }
            Err(failure) => {
                self.record(failure);
                None
            }
        };
    }

    fn params(&self) -> DVector<f64> {
        DVector::from_column_slice(&self.params)
    }

    fn residuals(&self) -> Option<DVector<f64>> {
        let prediction = self.prediction.as_ref()?;
        let residuals = prediction
            .as_ref()
            .iter()
            .zip(self.observed)
            .map(|(predicted, observed)| predicted - observed);
        Some(DVector::from_iterator(self.observed.len(), residuals))
    }

    fn jacobian(&self) -> Option<DMatrix<f64>> {
        let prediction = self.prediction.as_ref()?;

        if self.jacobians.get() >= self.config.max_iterations() {
            self.capped.set(true);
            return None;
        }
        let iteration = self.jacobians.get() + 1;
        self.jacobians.set(iteration);

        trace!(
            iteration,
            params = ?self.params,
            sum_of_squares = sum_of_squares(prediction.as_ref(), self.observed),
            "levenberg-marquardt iteration"
        );

        match self.jacobian_rows(prediction) {
            Ok(rows) => Some(DMatrix::from_fn(rows.len(), N, |i, j| rows[i][j])),
            Err(failure) => {
                self.record(failure);
                None
            }
        }
    }
}

fn sum_of_squares(predicted: &[f64], observed: &[f64]) -> f64 {
    predicted
        .iter()
        .zip(observed)
        .map(|(p, o)| (p - o).powi(2))
        .sum()
}
