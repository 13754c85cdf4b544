//! Independent reference routines.
//!
//! Eigenvalues come from nalgebra's symmetric eigendecomposition; linear
//! solves from faer's partial-pivoting LU. Neither shares code with the
//! solvers under test.

use eigenkit_solver::{Error as SolverError, check_rhs, check_square, is_symmetric};
use faer::Mat;
use faer::prelude::*;
use nalgebra::{DMatrix, DVector};

use crate::error::{Result, ValidateError};

/// Reference eigenvalues of a symmetric matrix, in ascending order.
pub fn reference_eigenvalues(a: &DMatrix<f64>) -> Result<Vec<f64>> {
    check_square(a)?;
    if !is_symmetric(a) {
        return Err(SolverError::NotSymmetric.into());
    }

    let mut values: Vec<f64> = a.clone().symmetric_eigen().eigenvalues.iter().copied().collect();
    values.sort_by(f64::total_cmp);
    Ok(values)
}

/// Reference solution of Ax = f using faer's dense LU.
pub fn reference_solve(a: &DMatrix<f64>, f: &DVector<f64>) -> Result<DVector<f64>> {
    let n = check_square(a)?;
    check_rhs(n, f)?;

    // Convert nalgebra to faer
    let faer_a = Mat::<f64>::from_fn(n, n, |i, j| a[(i, j)]);
    let faer_rhs = Col::<f64>::from_fn(n, |i| f[i]);

    let lu = faer_a.partial_piv_lu();
    let faer_x = lu.solve(&faer_rhs);

    // Convert back to nalgebra DVector
    let x = DVector::from_fn(n, |i, _| faer_x[i]);
    if x.iter().any(|v| !v.is_finite()) {
        return Err(ValidateError::Reference(
            "LU solve produced non-finite values (singular matrix)".to_string(),
        ));
    }
    Ok(x)
}
