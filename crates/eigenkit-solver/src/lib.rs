//! Dense eigenvalue and linear system solvers.
//!
//! Provides:
//! - QR decomposition by modified Gram-Schmidt ([`qr_decompose`])
//! - Shifted QR iteration for eigenvalues ([`solve_eigenvalues`])
//! - Gaussian elimination with partial pivoting ([`solve_gaussian`])
//! - Steepest descent for SPD systems ([`solve_steepest_descent`])
//!
//! All solvers work on `nalgebra` dense matrices, copy their inputs, and
//! keep no state between calls.

pub mod batch;
pub mod descent;
pub mod eigen;
pub mod error;
pub mod linear;
pub mod qr;

pub use batch::solve_eigenvalues_batch;
pub use descent::{
    SteepestDescentConfig, SteepestDescentResult, is_positive_definite, is_symmetric,
    solve_steepest_descent,
};
pub use eigen::{
    EigenConfig, EigenSolution, EigenStatus, IterationPhase, ShiftedQrIteration,
    solve_eigenvalues, solve_eigenvalues_with_config,
};
pub use error::{Error, Result};
pub use linear::{check_rhs, check_square, solve_gaussian};
pub use qr::{QrFactors, qr_decompose};
