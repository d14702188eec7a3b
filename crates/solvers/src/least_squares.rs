//! Solvers for curve-fit problems: least-squares parameter estimation.
//!
//! A [`CurveFitProblem`] maps a parameter vector `p: [f64; N]` to predictions.
//! Solvers in this module adjust `p` to minimize the sum of squared
//! differences between predictions and observations.
//!
//! # Solvers
//!
//! - [`levenberg_marquardt`]: trust-region Levenberg–Marquardt with an
//!   analytic or finite-difference Jacobian
//!
//! [`CurveFitProblem`]: darkfit_core::CurveFitProblem

pub mod levenberg_marquardt;
