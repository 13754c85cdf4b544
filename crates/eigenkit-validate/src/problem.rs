//! Problem descriptions loaded from JSON.
//!
//! A problem file holds a row-major matrix and an optional right-hand side:
//!
//! ```json
//! {
//!   "name": "spd-4x4",
//!   "matrix": [[4.0, 1.0], [1.0, 3.0]],
//!   "rhs": [5.0, 4.0]
//! }
//! ```

use std::path::Path;

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidateError};

/// A matrix problem, optionally with a right-hand side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    /// Optional display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Matrix rows.
    pub matrix: Vec<Vec<f64>>,
    /// Right-hand side for linear solves.
    #[serde(default)]
    pub rhs: Option<Vec<f64>>,
}

impl Problem {
    /// Build a problem from row-major data.
    pub fn new(matrix: Vec<Vec<f64>>) -> Self {
        Self {
            name: None,
            matrix,
            rhs: None,
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the right-hand side.
    pub fn with_rhs(mut self, rhs: Vec<f64>) -> Self {
        self.rhs = Some(rhs);
        self
    }

    /// Parse a problem from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a problem from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Convert the rows to a dense matrix.
    ///
    /// Rows must all have the same length; squareness is left to the solvers.
    pub fn to_matrix(&self) -> Result<DMatrix<f64>> {
        let nrows = self.matrix.len();
        let ncols = self.matrix.first().map_or(0, Vec::len);

        if let Some((i, row)) = self
            .matrix
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != ncols)
        {
            return Err(ValidateError::InvalidProblem(format!(
                "row {} has {} entries, expected {}",
                i,
                row.len(),
                ncols
            )));
        }

        Ok(DMatrix::from_fn(nrows, ncols, |i, j| self.matrix[i][j]))
    }

    /// Convert the right-hand side to a vector.
    pub fn to_rhs(&self) -> Result<DVector<f64>> {
        self.rhs
            .as_ref()
            .map(|rhs| DVector::from_column_slice(rhs))
            .ok_or_else(|| ValidateError::InvalidProblem("missing right-hand side".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_problem_json() {
        let json = r#"{"name": "pair", "matrix": [[4.0, 1.0], [1.0, 3.0]], "rhs": [5.0, 4.0]}"#;

        let problem = Problem::from_json(json).unwrap();

        assert_eq!(problem.name.as_deref(), Some("pair"));
        let a = problem.to_matrix().unwrap();
        assert_eq!(a.nrows(), 2);
        assert_eq!(a[(0, 1)], 1.0);
        assert_eq!(a[(1, 0)], 1.0);
        assert_eq!(problem.to_rhs().unwrap()[1], 4.0);
    }

    #[test]
    fn matrix_is_row_major() {
        let problem = Problem::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);

        let a = problem.to_matrix().unwrap();

        assert_eq!(a[(0, 1)], 2.0);
        assert_eq!(a[(1, 0)], 3.0);
    }

    #[test]
    fn ragged_rows_rejected() {
        let problem = Problem::new(vec![vec![1.0, 2.0], vec![3.0]]);

        let result = problem.to_matrix();
        assert!(matches!(result, Err(ValidateError::InvalidProblem(_))));
    }

    #[test]
    fn missing_rhs_rejected() {
        let problem = Problem::new(vec![vec![1.0]]);

        assert!(matches!(
            problem.to_rhs(),
            Err(ValidateError::InvalidProblem(_))
        ));
    }

    #[test]
    fn optional_fields_default() {
        let problem = Problem::from_json(r#"{"matrix": [[2.0]]}"#).unwrap();

        assert!(problem.name.is_none());
        assert!(problem.rhs.is_none());
    }
}
