//! Brent's method for bracketed scalar root finding.
//!
//! # Algorithm
//!
//! Brent's method keeps a bracket `[b, c]` whose endpoints have residuals of
//! opposite sign, with `b` the endpoint of smaller residual magnitude. Each
//! iteration proposes a new point by inverse quadratic interpolation through
//! the last three iterates, or by the secant rule when only two are distinct.
//! Whenever the interpolated step would leave the safe part of the bracket, or
//! the previous steps failed to shrink it fast enough, the solver falls back to
//! bisection.
//!
//! Every new bracket is nested inside the previous one and the sign change is
//! preserved at every step, so convergence is as certain as with bisection
//! while smooth residuals converge superlinearly.
//!
//! # When to Use
//!
//! Brent's method is appropriate when:
//! - A bracket with a sign change is known
//! - Derivatives are unavailable or expensive
//! - The same kind of solve runs many times and evaluation count matters
//!
//! # Convergence
//!
//! The solver reports [`Status::Converged`] when any of the following holds:
//! - The bracket width is within `x_abs_tol + x_rel_tol * |x|`
//! - The residual magnitude is within `residual_tol` (an exact zero always is)
//! - The bracket cannot shrink further at machine precision
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per iteration, after the new point has been
//! evaluated and the bracket updated. The initial endpoint evaluations emit no
//! events. Observers can return [`Action::StopEarly`] to halt and receive the
//! current best estimate.

mod action;
mod bracket;
mod config;
mod error;
mod event;
mod solution;
mod state;


pub use action::Action;
pub use bracket::{BracketError, Sign};
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use darkfit_core::{EquationProblem, Model, Observer};

use crate::equation::{Evaluation, evaluate};

use bracket::Bounds;
use state::{Point, State};

/// Finds a root of the residual inside `bracket` using Brent's method.
///
/// The bracket endpoints may be given in either order.
/// The observer receives an [`Event`] after each iteration.
///
/// # Errors
///
/// Returns an error if:
/// - the bracket is invalid
/// - the residuals at the bracket endpoints have the same sign
/// - any residual is not finite
/// - the model or problem fails during evaluation
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M::Input, M::Output>, Action>,
{
    let bounds = Bounds::new(bracket)?;

    let left = finite(evaluate(model, problem, [bounds.left])?)?;
    let right = finite(evaluate(model, problem, [bounds.right])?)?;
    bracket::check_sign_change(left.0.residual, right.0.residual)?;

    let mut state = State::new(left, right);
    state.orient();
    if state.is_exact_root() {
        return Ok(state.into_solution(Status::Converged, 0));
    }

    for iter in 1..=config.max_iters() {
        if state.is_converged(config) {
            return Ok(state.into_solution(Status::Converged, iter - 1));
        }

        let x = state.propose(config);
        let (point, snapshot) = finite(evaluate(model, problem, [x])?)?;
        state.accept(point, snapshot);

        let action = observer.observe(&state.event(iter));
        state.orient();

        if let Some(Action::StopEarly) = action {
            return Ok(state.into_solution(Status::StoppedByObserver, iter));
        }
    }

    let status = if config.max_iters() > 0 && state.is_converged(config) {
        Status::Converged
    } else {
        Status::MaxIters
    };
    Ok(state.into_solution(status, config.max_iters()))
}

/// Finds a root using Brent's method without observer support.
///
/// This is a convenience wrapper around [`solve`] that uses a no-op observer.
///
/// # Errors
///
/// Returns an error under the same conditions as [`solve`].
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    solve(model, problem, bracket, config, ())
}

/// Splits an evaluation into a point, rejecting non-finite residuals.
fn finite<I, O>(
    eval: Evaluation<I, O, 1>,
) -> Result<(Point, darkfit_core::Snapshot<I, O>), Error> {
    if !eval.is_finite() {
        return Err(Error::NonFiniteResidual {
            x: eval.x[0],
            residual: eval.residual(),
        });
    }
    let point = Point {
        x: eval.x[0],
        residual: eval.residual(),
    };
    Ok((point, eval.snapshot))
}
