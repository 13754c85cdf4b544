//! Error types for validation.

use thiserror::Error;

/// Errors that can occur while validating a solver.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// The solver under test failed.
    #[error("Solver error: {0}")]
    Solver(#[from] eigenkit_solver::Error),

    /// The reference routine could not produce a result.
    #[error("Reference error: {0}")]
    Reference(String),

    /// Problem description is malformed.
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    /// Problem file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Problem file is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, ValidateError>;
