//! Steepest descent iterative solver for symmetric positive definite systems.

use nalgebra::{DMatrix, DVector};

use crate::error::{Error, Result};
use crate::linear::{check_rhs, check_square};

/// Relative tolerance used by [`is_symmetric`].
pub const SYMMETRY_RTOL: f64 = 1e-5;
/// Absolute tolerance used by [`is_symmetric`].
pub const SYMMETRY_ATOL: f64 = 1e-8;

/// Steepest descent configuration.
#[derive(Debug, Clone)]
pub struct SteepestDescentConfig {
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// Convergence tolerance (relative residual).
    pub tolerance: f64,
}

impl Default for SteepestDescentConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-12,
        }
    }
}

impl SteepestDescentConfig {
    /// Set the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the relative residual tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Result of a steepest descent solve.
#[derive(Debug, Clone)]
pub struct SteepestDescentResult {
    /// Solution vector.
    pub x: DVector<f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Final relative residual.
    pub residual: f64,
    /// Whether the residual dropped below the tolerance.
    pub converged: bool,
}

/// Check symmetry element-wise: |A - Aᵀ| <= atol + rtol * |Aᵀ|.
pub fn is_symmetric(a: &DMatrix<f64>) -> bool {
    let n = a.nrows();
    if n != a.ncols() {
        return false;
    }
    (0..n).all(|i| {
        (0..n).all(|j| {
            let (x, y) = (a[(i, j)], a[(j, i)]);
            (x - y).abs() <= SYMMETRY_ATOL + SYMMETRY_RTOL * y.abs()
        })
    })
}

/// Check positive definiteness via a Cholesky factorization attempt.
///
/// Only meaningful for symmetric matrices.
pub fn is_positive_definite(a: &DMatrix<f64>) -> bool {
    a.clone().cholesky().is_some()
}

/// Solve Ax = f by steepest descent, starting from x = 0.
///
/// Each iteration computes the residual r = f - Ax, the exact line-search step
/// α = (r·r) / ((Ar)·r), and updates x += αr. Iteration stops after
/// `max_iterations` or once ‖r‖ / ‖f‖ falls to the tolerance; an exactly zero
/// residual always stops, since the step would be 0/0.
///
/// # Errors
///
/// Shape errors as for every solver, then [`Error::NotSymmetric`] and
/// [`Error::NotPositiveDefinite`].
pub fn solve_steepest_descent(
    a: &DMatrix<f64>,
    f: &DVector<f64>,
    config: &SteepestDescentConfig,
) -> Result<SteepestDescentResult> {
    let n = check_square(a)?;
    check_rhs(n, f)?;
    if !is_symmetric(a) {
        return Err(Error::NotSymmetric);
    }
    if !is_positive_definite(a) {
        return Err(Error::NotPositiveDefinite);
    }

    let f_norm = f.norm();
    if f_norm == 0.0 {
        return Ok(SteepestDescentResult {
            x: DVector::zeros(n),
            iterations: 0,
            residual: 0.0,
            converged: true,
        });
    }

    let mut x = DVector::zeros(n);
    let mut iterations = 0;

    while iterations < config.max_iterations {
        let r = f - a * &x;
        let r_norm = r.norm();
        if r_norm == 0.0 || r_norm / f_norm <= config.tolerance {
            return Ok(SteepestDescentResult {
                x,
                iterations,
                residual: r_norm / f_norm,
                converged: true,
            });
        }

        let ar = a * &r;
        let alpha = r.dot(&r) / ar.dot(&r);
        x.axpy(alpha, &r, 1.0);
        iterations += 1;
    }

    let residual = (f - a * &x).norm() / f_norm;
    let converged = residual <= config.tolerance;
    if !converged {
        log::warn!(
            "Steepest descent did not converge after {} iterations (residual {:.3e})",
            iterations,
            residual
        );
    }

    Ok(SteepestDescentResult {
        x,
        iterations,
        residual,
        converged,
    })
}
