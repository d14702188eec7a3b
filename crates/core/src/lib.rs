//! Core traits and types for darkfit.
//!
//! This crate defines the abstractions shared by the numerical services in
//! `darkfit-solvers` and the device model in `darkfit-diode`:
//!
//! - [`Model`]: a deterministic callable from a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`EquationProblem`]: adapts solver variables to model inputs and computes
//!   residuals for root finding
//! - [`CurveFitProblem`]: maps a parameter vector to predictions that a
//!   least-squares solver compares against observations

mod model;
mod observer;
mod problems;

pub use model::{Model, Snapshot};
pub use observer::Observer;
pub use problems::{CurveFitProblem, EquationProblem};
