/// Defines a curve-fit problem to be solved by least squares.
///
/// A curve-fit problem maps a parameter vector `p: [f64; N]` to one predicted
/// value per observation. Solvers compare predictions against the observed
/// values and adjust `p` to minimize the sum of squared differences.
///
/// Predictions are returned as [`Self::Prediction`] so a problem can carry
/// per-observation detail (for example, how each value was obtained) alongside
/// the values themselves. The same prediction is handed back to
/// [`jacobian`](Self::jacobian), which lets an analytic Jacobian reuse whatever
/// the prediction already computed.
pub trait CurveFitProblem<const N: usize> {
    type Prediction: AsRef<[f64]>;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Computes predictions at parameters `p`.
    ///
    /// Must be a pure function of `p`: calling it twice with the same
    /// parameters yields identical predictions.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if no prediction can be made at `p`.
    fn predict(&self, p: &[f64; N]) -> Result<Self::Prediction, Self::Error>;

    /// Computes the Jacobian of the predictions with respect to `p`.
    ///
    /// Row `i` holds the partial derivatives of prediction `i`, evaluated at the
    /// same `p` that produced `prediction`.
    ///
    /// Returns `None` when the problem has no analytic Jacobian, in which case
    /// solvers fall back to finite differences. This is the default.
    fn jacobian(
        &self,
        _p: &[f64; N],
        _prediction: &Self::Prediction,
    ) -> Option<Result<Vec<[f64; N]>, Self::Error>> {
        None
    }
}
