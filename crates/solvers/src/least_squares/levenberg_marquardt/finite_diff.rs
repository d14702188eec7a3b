/// Approximates the Jacobian of `predict` at `params` by forward differences.
///
/// `base` is the prediction at `params`. Each parameter is perturbed by
/// [`perturbation`], so one Jacobian costs `N` extra predictions.
pub(super) fn forward<const N: usize, T, E>(
    mut predict: impl FnMut(&[f64; N]) -> Result<T, E>,
    params: &[f64; N],
    base: &[f64],
    step: f64,
) -> Result<Vec<[f64; N]>, E>
where
    T: AsRef<[f64]>,
{
    let mut rows = vec![[0.0; N]; base.len()];

    for j in 0..N {
        let mut shifted = *params;
        shifted[j] += perturbation(params[j], step);
        // The representable step, not the requested one.
        let h = shifted[j] - params[j];

        let prediction = predict(&shifted)?;
        for (row, (y, y0)) in rows.iter_mut().zip(prediction.as_ref().iter().zip(base)) {
            row[j] = (y - y0) / h;
        }
    }

    Ok(rows)
}

/// Step for a parameter: relative to its magnitude, absolute at zero.
pub(super) fn perturbation(value: f64, step: f64) -> f64 {
    if value == 0.0 {
        step
    } else {
        step * value.abs()
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn perturbation_scales_with_magnitude() {
        assert_relative_eq!(perturbation(-2e-4, 1e-6), 2e-10);
        assert_relative_eq!(perturbation(0.0, 1e-6), 1e-6);
    }

    #[test]
    fn matches_analytic_derivatives() {
        // y_i = p0 * t_i² + exp(p1 * t_i)
        let t = [0.5, 1.0, 2.0];
        let predict = |p: &[f64; 2]| -> Result<Vec<f64>, Infallible> {
            Ok(t.iter().map(|t| p[0] * t * t + (p[1] * t).exp()).collect())
        };

        let params = [1.5, 0.3];
        let base = predict(&params).expect("infallible");
        let rows = forward(predict, &params, &base, 1e-7).expect("infallible");

        for (row, t) in rows.iter().zip(t) {
            assert_relative_eq!(row[0], t * t, max_relative = 1e-6);
            assert_relative_eq!(row[1], t * (params[1] * t).exp(), max_relative = 1e-6);
        }
    }
}
