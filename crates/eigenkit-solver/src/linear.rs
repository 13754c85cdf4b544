//! Direct linear system solver and shared input validation.

use nalgebra::{DMatrix, DVector};

use crate::error::{Error, Result};

/// Check that `a` is a non-empty square matrix of finite values.
///
/// Returns the dimension on success.
pub fn check_square(a: &DMatrix<f64>) -> Result<usize> {
    if a.nrows() != a.ncols() {
        return Err(Error::NotSquare {
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    if a.nrows() == 0 {
        return Err(Error::EmptyMatrix);
    }

    // Storage is column-major
    let n = a.nrows();
    if let Some(idx) = a.iter().position(|v| !v.is_finite()) {
        return Err(Error::NonFinite {
            row: idx % n,
            col: idx / n,
        });
    }

    Ok(n)
}

/// Check that a right-hand side matches dimension `n` and is finite.
pub fn check_rhs(n: usize, f: &DVector<f64>) -> Result<()> {
    if f.len() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            actual: f.len(),
        });
    }
    if let Some(row) = f.iter().position(|v| !v.is_finite()) {
        return Err(Error::NonFinite { row, col: 0 });
    }
    Ok(())
}

/// Solve a linear system Ax = f by Gaussian elimination with partial pivoting.
///
/// For each column the entry of largest magnitude on or below the diagonal is
/// moved into the pivot position (first occurrence wins on ties). A zero pivot
/// means every remaining entry of the column is zero, and the system is
/// reported as singular. Neither input is modified.
pub fn solve_gaussian(a: &DMatrix<f64>, f: &DVector<f64>) -> Result<DVector<f64>> {
    let n = check_square(a)?;
    check_rhs(n, f)?;

    let mut a = a.clone();
    let mut f = f.clone();

    for i in 0..n {
        let pivot_row = i + a.column(i).rows_range(i..).iamax();
        if a[(pivot_row, i)] == 0.0 {
            return Err(Error::SingularMatrix { column: i });
        }
        if pivot_row != i {
            a.swap_rows(i, pivot_row);
            f.swap_rows(i, pivot_row);
        }

        // Zero out the column below the pivot
        for j in (i + 1)..n {
            let coef = -a[(j, i)] / a[(i, i)];
            for c in i..n {
                let pivot_val = a[(i, c)];
                a[(j, c)] += coef * pivot_val;
            }
            let pivot_rhs = f[i];
            f[j] += coef * pivot_rhs;
        }
    }

    // Back substitution
    let mut x = DVector::zeros(n);
    for i in (0..n).rev() {
        let known: f64 = ((i + 1)..n).map(|j| a[(i, j)] * x[j]).sum();
        x[i] = (f[i] - known) / a[(i, i)];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{dmatrix, dvector};

    #[test]
    fn test_solve_simple() {
        // 2x + y = 5
        // x + 3y = 6
        // Solution: x = 1.8, y = 1.4
        let a = dmatrix![2.0, 1.0; 1.0, 3.0];
        let b = dvector![5.0, 6.0];

        let x = solve_gaussian(&a, &b).unwrap();

        assert!((x[0] - 1.8).abs() < 1e-10);
        assert!((x[1] - 1.4).abs() < 1e-10);
    }

    #[test]
    fn test_requires_row_swap() {
        // Zero in the (0, 0) position forces a pivot swap
        let a = dmatrix![0.0, 1.0; 2.0, 1.0];
        let b = dvector![1.0, 4.0];

        let x = solve_gaussian(&a, &b).unwrap();

        assert!((x[0] - 1.5).abs() < 1e-12, "x[0] = {}", x[0]);
        assert!((x[1] - 1.0).abs() < 1e-12, "x[1] = {}", x[1]);
    }

    #[test]
    fn test_inputs_untouched() {
        let a = dmatrix![0.0, 1.0; 2.0, 1.0];
        let b = dvector![1.0, 4.0];
        let a_before = a.clone();
        let b_before = b.clone();

        solve_gaussian(&a, &b).unwrap();

        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn test_matches_nalgebra_lu() {
        let a = dmatrix![
            1.00, 0.17, -0.25, 0.54;
            0.47, 1.00, 0.67, -0.32;
            -0.11, 0.35, 1.00, -0.74;
            0.55, 0.43, 0.36, 1.00
        ];
        let b = dvector![0.3, 0.5, 0.7, 0.9];

        let x = solve_gaussian(&a, &b).unwrap();
        let expected = a.clone().lu().solve(&b).unwrap();

        for i in 0..4 {
            assert!(
                (x[i] - expected[i]).abs() < 1e-12,
                "Mismatch at [{}]: gaussian={}, lu={}",
                i,
                x[i],
                expected[i]
            );
        }
    }

    #[test]
    fn test_singular_matrix() {
        let a = dmatrix![1.0, 2.0; 0.0, 0.0];
        let b = dvector![1.0, 2.0];

        let result = solve_gaussian(&a, &b);
        assert!(matches!(result, Err(Error::SingularMatrix { column: 1 })));
    }

    #[test]
    fn test_zero_column_is_singular() {
        let a = dmatrix![0.0, 1.0; 0.0, 3.0];
        let b = dvector![1.0, 2.0];

        let result = solve_gaussian(&a, &b);
        assert!(matches!(result, Err(Error::SingularMatrix { column: 0 })));
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = dmatrix![1.0, 2.0; 3.0, 4.0];
        let b = dvector![1.0, 2.0, 3.0];

        let result = solve_gaussian(&a, &b);
        assert!(matches!(result, Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn test_check_square_rejects_bad_shapes() {
        let rect = DMatrix::<f64>::zeros(2, 3);
        assert!(matches!(
            check_square(&rect),
            Err(Error::NotSquare { rows: 2, cols: 3 })
        ));

        let empty = DMatrix::<f64>::zeros(0, 0);
        assert!(matches!(check_square(&empty), Err(Error::EmptyMatrix)));

        let nan = dmatrix![1.0, 2.0; f64::NAN, 4.0];
        assert!(matches!(
            check_square(&nan),
            Err(Error::NonFinite { row: 1, col: 0 })
        ));
    }
}
