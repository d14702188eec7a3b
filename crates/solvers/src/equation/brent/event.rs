use darkfit_core::Snapshot;

/// Event emitted by the Brent solver after each iteration.
#[derive(Debug)]
pub struct Event<'a, I, O> {
    /// Iteration number, starting at 1.
    pub iter: usize,

    /// The point evaluated this iteration.
    pub x: f64,

    /// Residual at `x`.
    pub residual: f64,

    /// Bracket after the update, as `[lower, upper]`.
    pub bracket: [f64; 2],

    /// Model input and output at `x`.
    pub snapshot: &'a Snapshot<I, O>,
}

impl<I, O> Event<'_, I, O> {
    /// Returns the width of the bracket after this iteration.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.bracket[1] - self.bracket[0]
    }
}
