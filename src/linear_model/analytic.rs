use crate::{Matrix, RegressionError, Result, Vector};

/// Diagonal term added to `XᵗX` so the normal equations stay invertible.
pub const RIDGE_PENALTY: f64 = 1e-4;

/// Closed-form solution `w = (XᵗX + λI)⁻¹ Xᵗy`.
///
/// `I` is an identity of size `min(n_points, n_features)` placed in the
/// top-left corner of the `n_features × n_features` normal matrix, so with
/// fewer points than features the trailing diagonal stays unregularised.
pub fn solve_analytically(x: &Matrix, y: &Vector) -> Result<Vector> {
    if x.nrows() != y.len() {
        return Err(RegressionError::mismatch("solver targets", x.nrows(), y.len()));
    }
    if x.ncols() == 0 {
        return Err(RegressionError::InvalidParameter(
            "solver needs at least one feature".to_string(),
        ));
    }

    let xt = x.t();
    let mut regularized_xtx = xt.dot(x);
    for i in 0..x.nrows().min(x.ncols()) {
        regularized_xtx[(i, i)] += RIDGE_PENALTY;
    }
    let xty = xt.dot(y);

    let w = solve_linear_system(&regularized_xtx, &xty)?;
    if w.iter().any(|v| !v.is_finite()) {
        return Err(RegressionError::SingularMatrix);
    }

    log::debug!("closed-form solution over {} points: {:?}", x.nrows(), w);
    Ok(w)
}

/// Euclidean norm of `a - b`.
pub fn distance(a: &Vector, b: &Vector) -> Result<f64> {
    if a.len() != b.len() {
        return Err(RegressionError::mismatch("distance", a.len(), b.len()));
    }
    let diff = a - b;
    Ok(diff.dot(&diff).sqrt())
}

/// Gaussian elimination with partial pivoting on the augmented system `[a | b]`.
fn solve_linear_system(a: &Matrix, b: &Vector) -> Result<Vector> {
    let n = a.nrows();
    let mut aug = Matrix::zeros((n, n + 1));
    aug.slice_mut(ndarray::s![.., ..n]).assign(a);
    aug.column_mut(n).assign(b);

    let scale = a.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let tolerance = f64::EPSILON * scale * n as f64;

    for i in 0..n {
        let mut max_row = i;
        for k in (i + 1)..n {
            if aug[(k, i)].abs() > aug[(max_row, i)].abs() {
                max_row = k;
            }
        }

        let pivot = aug[(max_row, i)];
        if !pivot.is_finite() || pivot.abs() <= tolerance {
            return Err(RegressionError::SingularMatrix);
        }

        if max_row != i {
            for j in 0..=n {
                aug.swap((i, j), (max_row, j));
            }
        }

        for k in (i + 1)..n {
            let factor = aug[(k, i)] / aug[(i, i)];
            for j in i..=n {
                aug[(k, j)] -= factor * aug[(i, j)];
            }
        }
    }

    let mut x = Vector::zeros(n);
    for i in (0..n).rev() {
        x[i] = aug[(i, n)];
        for j in (i + 1)..n {
            x[i] -= aug[(i, j)] * x[j];
        }
        x[i] /= aug[(i, i)];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_bias_and_slope_recovered() {
        let x = array![[1.0, 1.0], [1.0, 2.0], [1.0, 3.0]];
        let y = array![2.0, 4.0, 6.0];

        let w = solve_analytically(&x, &y).unwrap();

        assert!(w[0].abs() < 1e-3);
        assert!((w[1] - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_solution_satisfies_normal_equations() {
        let x = array![
            [1.0, 0.5, -1.2],
            [1.0, 1.5, 0.3],
            [1.0, -0.7, 2.2],
            [1.0, 2.1, 0.9],
            [1.0, 0.0, -0.4]
        ];
        let y = array![0.3, 2.9, -1.4, 3.3, 0.8];

        let w = solve_analytically(&x, &y).unwrap();

        let mut lhs = x.t().dot(&x);
        for i in 0..3 {
            lhs[(i, i)] += RIDGE_PENALTY;
        }
        let residual = lhs.dot(&w) - x.t().dot(&y);
        for r in residual.iter() {
            assert!(r.abs() < 1e-9);
        }
    }

    #[test]
    fn test_deterministic() {
        let x = array![[1.0, 2.0], [3.0, 5.0], [4.0, 1.0]];
        let y = array![1.0, 2.0, 3.0];

        let first = solve_analytically(&x, &y).unwrap();
        let second = solve_analytically(&x, &y).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_ridge_rescues_duplicate_columns() {
        // XᵗX is exactly singular; the ridge term makes it invertible.
        let x = array![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]];
        let y = array![2.0, 4.0, 6.0];

        let w = solve_analytically(&x, &y).unwrap();
        assert!((w[0] + w[1] - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_unregularized_block_can_be_singular() {
        // One point, three features: only the first diagonal entry gets λ.
        let x = array![[0.0, 1.0, 1.0]];
        let y = array![1.0];

        assert!(matches!(
            solve_analytically(&x, &y),
            Err(RegressionError::SingularMatrix)
        ));
    }

    #[test]
    fn test_dimension_mismatch() {
        let x = array![[1.0], [2.0]];
        let y = array![1.0, 2.0, 3.0];

        assert!(matches!(
            solve_analytically(&x, &y),
            Err(RegressionError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_distance() {
        let a = array![0.0, 3.0];
        let b = array![4.0, 0.0];
        assert!((distance(&a, &b).unwrap() - 5.0).abs() < 1e-12);
        assert!(distance(&a, &array![1.0]).is_err());
    }
}
