//! The implicit single-diode equation.
//!
//! For parameters `p = (a, b, c, d)` and input `x`, the predicted output is
//! the `y` that satisfies `g(y; p, x) = 0`, where
//!
//! ```text
//! u = x − c·y
//! g(y; p, x) = a·exp(u / (100·b)) + u / (10000·d) − y
//! ```

use crate::Params;

/// Scale applied to `b` in the exponent.
pub const EXPONENT_SCALE: f64 = 100.0;

/// Scale applied to `d` in the shunt term.
pub const SHUNT_SCALE: f64 = 10_000.0;

/// Evaluates `g(y; p, x)`.
///
/// The result may be very large or non-finite when the exponent overflows.
#[must_use]
pub fn residual(y: f64, params: &Params, x: f64) -> f64 {
    let u = x - params.c * y;
    params.a * (u / (EXPONENT_SCALE * params.b)).exp() + u / (SHUNT_SCALE * params.d) - y
}

/// Partial derivatives of `g` at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Partials {
    /// ∂g/∂y
    pub y: f64,

    /// ∂g/∂a, ∂g/∂b, ∂g/∂c, ∂g/∂d
    pub params: [f64; 4],
}

impl Partials {
    /// Computes the partial derivatives of `g` at `(y; p, x)`.
    #[must_use]
    pub fn at(y: f64, params: &Params, x: f64) -> Self {
        let Params { a, b, c, d } = *params;
        let u = x - c * y;
        let growth = (u / (EXPONENT_SCALE * b)).exp();
        let diode = a * growth;

        let dg_du = diode / (EXPONENT_SCALE * b) + 1.0 / (SHUNT_SCALE * d);

        Self {
            y: -c * dg_du - 1.0,
            params: [
                growth,
                -diode * u / (EXPONENT_SCALE * b * b),
                -y * dg_du,
                -u / (SHUNT_SCALE * d * d),
            ],
        }
    }

    /// Sensitivity of the root to each parameter, `∂y/∂p_j`.
    ///
    /// Follows from differentiating `g(y(p), p) = 0`, which gives
    /// `∂y/∂p_j = −(∂g/∂p_j) / (∂g/∂y)`. Only meaningful at a root of `g`.
    #[must_use]
    pub fn sensitivity(&self) -> [f64; 4] {
        self.params.map(|dg_dp| -dg_dp / self.y)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const PARAMS: Params = Params::new(1e-6, 3e-4, 1e-4, 1e-2);

    #[test]
    fn residual_at_zero_output() {
        // With y = 0 the series term vanishes: g = a·exp(x/(100b)) + x/(10000d).
        let x = 0.3;
        let expected = 1e-6 * (0.3_f64 / 0.03).exp() + 0.3 / 100.0;
        assert_relative_eq!(residual(0.0, &PARAMS, x), expected, max_relative = 1e-14);
    }

    #[test]
    fn residual_decreases_in_y() {
        let x = 0.5;
        let values: Vec<f64> = [0.0, 1.0, 10.0, 100.0, 1000.0]
            .iter()
            .map(|y| residual(*y, &PARAMS, x))
            .collect();

        assert!(values.windows(2).all(|w| w[1] < w[0]));
        assert!(values[0] > 0.0 && values[4] < 0.0);
    }

    #[test]
    fn partials_match_finite_differences() {
        let (y, x) = (3.0, 0.45);
        let partials = Partials::at(y, &PARAMS, x);

        let h = 1e-7 * y;
        let dg_dy = (residual(y + h, &PARAMS, x) - residual(y - h, &PARAMS, x)) / (2.0 * h);
        assert_relative_eq!(partials.y, dg_dy, max_relative = 1e-6);

        for j in 0..4 {
            let mut plus = PARAMS.to_array();
            let mut minus = PARAMS.to_array();
            let h = 1e-6 * plus[j];
            plus[j] += h;
            minus[j] -= h;
            let numeric = (residual(y, &plus.into(), x) - residual(y, &minus.into(), x)) / (2.0 * h);
            assert_relative_eq!(partials.params[j], numeric, max_relative = 1e-5);
        }
    }
}
