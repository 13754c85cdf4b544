//! QR decomposition by modified Gram-Schmidt orthogonalization.
//!
//! Each column is normalized and then immediately projected out of every
//! later column of the working copy, so later columns are orthogonalized
//! against the finished orthonormal vectors rather than against the original
//! ones. This is the same update order the Arnoldi process in GMRES uses.

use nalgebra::DMatrix;

use crate::error::{Error, Result};
use crate::linear::check_square;

/// Factors of a QR decomposition, A = Q * R.
#[derive(Debug, Clone, PartialEq)]
pub struct QrFactors {
    /// Orthogonal factor (orthonormal columns).
    pub q: DMatrix<f64>,
    /// Upper triangular factor.
    pub r: DMatrix<f64>,
    /// Columns whose working norm fell below the rank threshold.
    ///
    /// Q is not orthonormal at these columns. Empty for well-conditioned input.
    pub negligible_columns: Vec<usize>,
}

impl QrFactors {
    /// Dimension of the factored matrix.
    pub fn dim(&self) -> usize {
        self.q.nrows()
    }

    /// Multiply the factors back together.
    pub fn reconstruct(&self) -> DMatrix<f64> {
        &self.q * &self.r
    }

    /// Largest absolute entry of QᵀQ - I.
    pub fn orthogonality_error(&self) -> f64 {
        let n = self.dim();
        let gram = self.q.transpose() * &self.q;
        (gram - DMatrix::<f64>::identity(n, n)).amax()
    }

    /// True when no column was flagged as numerically negligible.
    pub fn is_full_rank(&self) -> bool {
        self.negligible_columns.is_empty()
    }

    /// True when every entry strictly below the diagonal of R is exactly zero.
    pub fn is_upper_triangular(&self) -> bool {
        let n = self.dim();
        (0..n).all(|j| ((j + 1)..n).all(|i| self.r[(i, j)] == 0.0))
    }
}

/// Factor a square matrix as A = QR using modified Gram-Schmidt.
///
/// For column k:
/// 1. `R[k,k]` is the norm of column k of the working copy.
/// 2. Column k of Q is that working column divided by `R[k,k]`.
/// 3. For every later column i, `R[k,i]` is its projection onto `Q[:,k]`, and
///    the projection is subtracted from the working column i.
///
/// Entries of R below the diagonal are never written and stay exactly zero.
/// The input is not modified.
///
/// A working norm at or below `n * EPSILON * |a_k|` (the norm of the input
/// column) is rounding noise: the column is still normalized, recorded in
/// [`QrFactors::negligible_columns`] and reported with `log::warn!`.
///
/// # Errors
///
/// Returns [`Error::RankDeficient`] as soon as a working column has exactly
/// zero norm, since it cannot be normalized.
pub fn qr_decompose(a: &DMatrix<f64>) -> Result<QrFactors> {
    let factors = gram_schmidt(a)?;
    if !factors.is_full_rank() {
        log::warn!(
            "QR decomposition is numerically rank deficient at columns {:?}; Q is not orthonormal there",
            factors.negligible_columns
        );
    }
    Ok(factors)
}

/// Modified Gram-Schmidt without logging; negligible columns are only recorded.
pub(crate) fn gram_schmidt(a: &DMatrix<f64>) -> Result<QrFactors> {
    let n = check_square(a)?;

    let mut work = a.clone();
    let mut q = DMatrix::zeros(n, n);
    let mut r = DMatrix::zeros(n, n);
    let mut negligible_columns = Vec::new();

    for k in 0..n {
        let norm = work.column(k).norm();
        if norm == 0.0 {
            return Err(Error::RankDeficient { column: k });
        }
        if norm <= rank_threshold(n, a.column(k).norm()) {
            negligible_columns.push(k);
        }
        r[(k, k)] = norm;
        q.set_column(k, &(work.column(k) / norm));

        // Orthogonalize the remaining columns against q_k
        for i in (k + 1)..n {
            let projection = work.column(i).dot(&q.column(k));
            r[(k, i)] = projection;
            work.column_mut(i).axpy(-projection, &q.column(k), 1.0);
        }
    }

    Ok(QrFactors {
        q,
        r,
        negligible_columns,
    })
}

fn rank_threshold(n: usize, input_norm: f64) -> f64 {
    n as f64 * f64::EPSILON * input_norm
}
