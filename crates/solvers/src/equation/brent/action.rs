/// Control actions supported by the Brent solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver early and return the current best estimate.
    StopEarly,
}
