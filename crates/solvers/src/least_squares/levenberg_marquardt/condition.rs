use nalgebra::DMatrix;

/// Iteration cap for the singular value decomposition.
const SVD_MAX_ITERS: usize = 1000;

/// Condition number of the Jacobian after scaling each column to unit norm.
///
/// Column scaling removes the effect of parameter units, so the result
/// reflects how independent the parameters are rather than how large they
/// happen to be. Returns infinity for a rank-deficient Jacobian and NaN when
/// the Jacobian has non-finite entries.
pub(super) fn condition_number<const N: usize>(rows: &[[f64; N]]) -> f64 {
    if rows.iter().flatten().any(|v| !v.is_finite()) {
        return f64::NAN;
    }
    if rows.len() < N {
        return f64::INFINITY;
    }

    let mut jacobian = DMatrix::from_fn(rows.len(), N, |i, j| rows[i][j]);
    for mut column in jacobian.column_iter_mut() {
        let norm = column.norm();
        if norm == 0.0 {
            return f64::INFINITY;
        }
        column /= norm;
    }

    let Some(svd) = jacobian.try_svd(false, false, f64::EPSILON, SVD_MAX_ITERS) else {
        return f64::NAN;
    };
    let max = svd.singular_values.max();
    let min = svd.singular_values.min();

    if min == 0.0 { f64::INFINITY } else { max / min }
}

/// True when `condition` marks the Jacobian as numerically rank-deficient.
///
/// Uses the usual rank threshold: singular values below
/// `max(rows, cols) * ε * σ_max` are treated as zero.
pub(super) fn is_rank_deficient(condition: f64, rows: usize, cols: usize) -> bool {
    #[allow(clippy::cast_precision_loss)]
    let threshold = 1.0 / (rows.max(cols) as f64 * f64::EPSILON);
    condition >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn independent_columns_are_well_conditioned() {
        let rows = [[1.0, 0.0], [0.0, 1e-8], [0.0, 0.0]];

        // Scaling removes the 1e-8 magnitude difference.
        let condition = condition_number(&rows);
        assert!((condition - 1.0).abs() < 1e-9, "condition = {condition}");
        assert!(!is_rank_deficient(condition, 3, 2));
    }

    #[test]
    fn collinear_columns_are_rank_deficient() {
        let rows = [[2.0, 3.0], [0.0, 0.0], [0.0, 0.0]];

        let condition = condition_number(&rows);
        assert!(is_rank_deficient(condition, 3, 2), "condition = {condition}");
    }

    #[test]
    fn zero_column_is_infinitely_conditioned() {
        let rows = [[1.0, 0.0], [2.0, 0.0]];
        assert!(condition_number(&rows).is_infinite());
    }

    #[test]
    fn non_finite_entries_yield_nan() {
        let rows = [[1.0, f64::NAN], [2.0, 1.0]];
        assert!(condition_number(&rows).is_nan());
    }
}
