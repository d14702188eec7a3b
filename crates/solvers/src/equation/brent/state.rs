use darkfit_core::Snapshot;

use super::bracket::Sign;
use super::{Config, Event, Solution, Status};

/// An evaluated point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Point {
    pub(super) x: f64,
    pub(super) residual: f64,
}

/// Iteration state of Brent's method.
///
/// `best` and `contra` are the bracket endpoints, with residuals of opposite
/// sign. After [`State::orient`], `best` has the smaller residual magnitude.
/// `prev` is the previous `best`, used as the third interpolation point.
pub(super) struct State<I, O> {
    prev: Point,
    best: Point,
    best_snapshot: Snapshot<I, O>,
    contra: Point,
    contra_snapshot: Snapshot<I, O>,

    /// Most recent step taken from `best`.
    step: f64,

    /// The step before `step`.
    prev_step: f64,
}

impl<I, O> State<I, O> {
    pub(super) fn new(left: (Point, Snapshot<I, O>), right: (Point, Snapshot<I, O>)) -> Self {
        let (left, left_snapshot) = left;
        let (right, right_snapshot) = right;
        let width = right.x - left.x;

        Self {
            prev: left,
            best: right,
            best_snapshot: right_snapshot,
            contra: left,
            contra_snapshot: left_snapshot,
            step: width,
            prev_step: width,
        }
    }

    /// Swaps the endpoints if `contra` has the smaller residual.
    pub(super) fn orient(&mut self) {
        if self.contra.residual.abs() < self.best.residual.abs() {
            self.prev = self.best;
            std::mem::swap(&mut self.best, &mut self.contra);
            std::mem::swap(&mut self.best_snapshot, &mut self.contra_snapshot);
        }
    }

    pub(super) fn is_exact_root(&self) -> bool {
        self.best.residual == 0.0
    }

    pub(super) fn bracket(&self) -> [f64; 2] {
        if self.is_exact_root() {
            return [self.best.x, self.best.x];
        }
        let (b, c) = (self.best.x, self.contra.x);
        if b < c { [b, c] } else { [c, b] }
    }

    /// Checks convergence. Call after [`State::orient`].
    pub(super) fn is_converged(&self, config: &Config) -> bool {
        let width = (self.contra.x - self.best.x).abs();

        self.best.residual.abs() <= config.residual_tol()
            || width <= config.x_tolerance(self.best.x)
            || 0.5 * width <= self.step_tolerance(config)
    }

    /// Smallest step the solver will take from `best`.
    ///
    /// The machine-precision term keeps steps resolvable when the configured
    /// tolerances are zero.
    fn step_tolerance(&self, config: &Config) -> f64 {
        2.0 * f64::EPSILON * self.best.x.abs() + 0.25 * config.x_tolerance(self.best.x)
    }

    /// Chooses the next point to evaluate. Call after [`State::orient`].
    pub(super) fn propose(&mut self, config: &Config) -> f64 {
        let tol = self.step_tolerance(config);
        let (a, b, c) = (self.prev, self.best, self.contra);
        let m = 0.5 * (c.x - b.x);

        if self.prev_step.abs() < tol || a.residual.abs() <= b.residual.abs() {
            self.bisect(m);
        } else {
            let s = b.residual / a.residual;
            let (mut p, mut q) = if a.x == c.x {
                // Secant through `a` and `b`.
                (2.0 * m * s, 1.0 - s)
            } else {
                // Inverse quadratic interpolation through `a`, `b`, and `c`.
                let q = a.residual / c.residual;
                let r = b.residual / c.residual;
                (
                    s * (2.0 * m * q * (q - r) - (b.x - a.x) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };

            if p > 0.0 {
                q = -q;
            } else {
                p = -p;
            }

            // Accept the interpolated step only if it lands well inside the
            // bracket and shrinks faster than the step before last.
            let inside = 3.0 * m * q - (tol * q).abs();
            let shrinking = (self.prev_step * q).abs();
            if 2.0 * p < inside.min(shrinking) {
                self.prev_step = self.step;
                self.step = p / q;
            } else {
                self.bisect(m);
            }
        }

        if self.step.abs() > tol {
            b.x + self.step
        } else {
            b.x + tol.copysign(m)
        }
    }

    fn bisect(&mut self, m: f64) {
        self.step = m;
        self.prev_step = m;
    }

    /// Replaces `best` with a newly evaluated point and restores the bracket.
    pub(super) fn accept(&mut self, point: Point, snapshot: Snapshot<I, O>) {
        self.prev = self.best;
        let prev_snapshot = std::mem::replace(&mut self.best_snapshot, snapshot);
        self.best = point;

        let same_sign = matches!(
            (Sign::of(point.residual), Sign::of(self.contra.residual)),
            (Some(new), Some(contra)) if new == contra
        );
        if same_sign {
            self.contra = self.prev;
            self.contra_snapshot = prev_snapshot;
            self.step = point.x - self.prev.x;
            self.prev_step = self.step;
        }
    }

    /// Builds the event for the point accepted this iteration.
    pub(super) fn event(&self, iter: usize) -> Event<'_, I, O> {
        Event {
            iter,
            x: self.best.x,
            residual: self.best.residual,
            bracket: self.bracket(),
            snapshot: &self.best_snapshot,
        }
    }

    pub(super) fn into_solution(self, status: Status, iters: usize) -> Solution<I, O> {
        let bracket = self.bracket();
        Solution {
            status,
            x: self.best.x,
            residual: self.best.residual,
            bracket,
            snapshot: self.best_snapshot,
            iters,
        }
    }
}
