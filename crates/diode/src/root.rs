//! Solving the implicit equation for one sample.
//!
//! [`solve_root`] runs Brent's method on `g(y; p, x)` over a fixed bracket and
//! condenses the result into a [`SolverOutcome`]. Nothing is carried from one
//! call to the next: each solve starts from the configured bracket.
//!
//! Non-convergence is data, not an error. A bracket without a sign change, or
//! a residual that overflows, produces [`RootStatus::NumericalFailure`] with a
//! best-effort estimate rather than an `Err`. Callers that prefer `?` can use
//! [`SolverOutcome::into_result`].

mod balance;
mod config;
mod outcome;

pub use config::{RootConfig, RootConfigError};
pub use outcome::{RootError, RootFailure, RootStatus, SolverOutcome};

use darkfit_solvers::equation::brent;

use crate::{Params, equation};

use balance::{Balance, Zero};

/// Finds the output `y` satisfying `g(y; p, x) = 0` inside `config.bracket()`.
#[must_use]
pub fn solve_root(params: &Params, x: f64, config: &RootConfig) -> SolverOutcome {
    let model = Balance { params, x };

    // Last bracket seen, for reporting a solve that fails partway through.
    let mut progress: Option<(usize, [f64; 2])> = None;
    let observer = |event: &brent::Event<'_, f64, f64>| -> Option<brent::Action> {
        progress = Some((event.iter, event.bracket));
        None
    };

    match brent::solve(&model, &Zero, config.bracket(), config.solver(), observer) {
        Ok(solution) => SolverOutcome {
            root: solution.x,
            bracket: solution.bracket,
            iters: solution.iters,
            status: match solution.status {
                brent::Status::Converged => RootStatus::Converged,
                brent::Status::MaxIters | brent::Status::StoppedByObserver => {
                    RootStatus::MaxIterationsReached
                }
            },
        },
        Err(brent::Error::NonFiniteResidual { .. }) => {
            // A failed iteration counts even though it emitted no event.
            let (iters, bracket) =
                progress.map_or((0, config.bracket()), |(iter, bracket)| (iter + 1, bracket));
            failure(params, x, bracket, iters, RootFailure::NonFiniteResidual)
        }
        Err(_) => failure(params, x, config.bracket(), 0, RootFailure::BracketInvalid),
    }
}

/// Builds a failed outcome around the better finite endpoint of `bracket`.
fn failure(
    params: &Params,
    x: f64,
    bracket: [f64; 2],
    iters: usize,
    cause: RootFailure,
) -> SolverOutcome {
    let [lo, hi] = ordered(bracket);
    let root = [lo, hi]
        .into_iter()
        .map(|y| (y, equation::residual(y, params, x).abs()))
        .filter(|(_, g)| g.is_finite())
        .min_by(|(_, g1), (_, g2)| g1.total_cmp(g2))
        .map_or(f64::NAN, |(y, _)| y);

    SolverOutcome {
        root,
        bracket: [lo, hi],
        iters,
        status: RootStatus::NumericalFailure(cause),
    }
}

fn ordered([a, b]: [f64; 2]) -> [f64; 2] {
    if a <= b { [a, b] } else { [b, a] }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const TRUE: Params = Params::new(1e-6, 3e-4, 1e-4, 1e-2);

    #[test]
    fn converges_inside_default_bracket() {
        let config = RootConfig::default();
        let outcome = solve_root(&TRUE, 0.5, &config);

        assert_eq!(outcome.status, RootStatus::Converged);
        assert!(outcome.root > 0.0 && outcome.root < 1000.0);
        assert!(outcome.width() <= config.solver().x_tolerance(outcome.root));
        assert!(equation::residual(outcome.root, &TRUE, 0.5).abs() < 1e-8);
    }

    #[test]
    fn loose_tolerance_matches_interval_test() {
        let solver = brent::Config::new(100, 0.0, 1e-3, 0.0).expect("valid tolerances");
        let config = RootConfig::default().with_solver(solver);
        let tight = solve_root(&TRUE, 0.4, &RootConfig::default());
        let loose = solve_root(&TRUE, 0.4, &config);

        assert_eq!(loose.status, RootStatus::Converged);
        assert!(loose.width() <= 1e-3 * loose.root.abs());
        assert_relative_eq!(loose.root, tight.root, max_relative = 1e-3);
    }

    #[test]
    fn bracket_above_root_is_invalid() {
        // The root at x = 0.5 is about 16, well below the bracket.
        let config =
            RootConfig::new([500.0, 1000.0], brent::Config::default()).expect("valid bracket");
        let outcome = solve_root(&TRUE, 0.5, &config);

        assert_eq!(
            outcome.status,
            RootStatus::NumericalFailure(RootFailure::BracketInvalid)
        );
        assert_eq!(outcome.iters, 0);
        assert_eq!(outcome.bracket, [500.0, 1000.0]);
        assert_relative_eq!(outcome.root, 500.0);
        assert!(matches!(
            outcome.into_result(),
            Err(RootError::BracketInvalid { .. })
        ));
    }

    #[test]
    fn overflowing_endpoint_is_a_numerical_failure() {
        // x / (100·b) = 5000 overflows the exponential at y = 0.
        let steep = Params::new(1e-6, 1e-6, 1e-3, 1e-2);
        let outcome = solve_root(&steep, 0.5, &RootConfig::default());

        assert_eq!(
            outcome.status,
            RootStatus::NumericalFailure(RootFailure::NonFiniteResidual)
        );
        assert_eq!(outcome.iters, 0);
        assert_relative_eq!(outcome.root, 1000.0);
    }

    #[test]
    fn zero_iterations_returns_best_endpoint() {
        let config = RootConfig::default();
        let config = config.with_solver(config.solver().with_max_iters(0));
        let outcome = solve_root(&TRUE, 0.5, &config);

        assert_eq!(outcome.status, RootStatus::MaxIterationsReached);
        assert_eq!(outcome.iters, 0);
        assert_eq!(outcome.bracket, [0.0, 1000.0]);
        // |g(0)| ≈ 17 is far smaller than |g(1000)| ≈ 1000.
        assert_relative_eq!(outcome.root, 0.0);
        assert!(matches!(
            outcome.into_result(),
            Err(RootError::RootNotConverged { iters: 0, .. })
        ));
    }
}
