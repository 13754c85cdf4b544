//! Error types for eigenkit solvers.

use thiserror::Error;

/// Errors that can occur while factoring or solving.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Iteration cap below one.
    #[error("Number of iterations must be a positive number, got {value}")]
    InvalidIterations { value: i64 },

    /// Convergence tolerance that is not a positive finite number.
    #[error("Tolerance must be a positive finite number, got {value}")]
    InvalidTolerance { value: f64 },

    /// Matrix is not square.
    #[error("Matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// Matrix has no entries.
    #[error("Matrix must have at least one row and column")]
    EmptyMatrix,

    /// Vector length does not match the matrix dimension.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Input contains NaN or an infinity.
    #[error("Non-finite entry at ({row}, {col})")]
    NonFinite { row: usize, col: usize },

    /// A column collapsed to zero norm during orthogonalization.
    #[error("Rank deficient: column {column} is linearly dependent on the previous columns")]
    RankDeficient { column: usize },

    /// Every candidate pivot in a column is zero.
    #[error("Singular matrix: zero pivot in column {column}")]
    SingularMatrix { column: usize },

    /// Matrix is not symmetric.
    #[error("Matrix is not symmetric")]
    NotSymmetric,

    /// Matrix is not positive definite.
    #[error("Matrix is not positive definite")]
    NotPositiveDefinite,
}

impl Error {
    /// Returns true for errors caused by invalid call parameters rather than
    /// by the matrix itself.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::InvalidIterations { .. } | Error::InvalidTolerance { .. }
        )
    }
}

/// Result type for solver operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_are_classified() {
        assert!(Error::InvalidIterations { value: 0 }.is_configuration());
        assert!(Error::InvalidTolerance { value: -1.0 }.is_configuration());
        assert!(!Error::RankDeficient { column: 2 }.is_configuration());
        assert!(!Error::NotSymmetric.is_configuration());
    }

    #[test]
    fn messages_carry_context() {
        let err = Error::NotSquare { rows: 2, cols: 3 };
        assert_eq!(err.to_string(), "Matrix must be square, got 2x3");

        let err = Error::InvalidIterations { value: -5 };
        assert!(err.to_string().contains("-5"));
    }
}
