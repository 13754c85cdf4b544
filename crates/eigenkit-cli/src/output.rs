//! Plain-text and JSON formatting of solver results.

use nalgebra::{DMatrix, DVector};
use serde_json::{Value, json};

/// Format a matrix as aligned rows in scientific notation.
pub fn format_matrix(m: &DMatrix<f64>) -> String {
    let mut out = String::new();
    for row in m.row_iter() {
        let cells: Vec<String> = row.iter().map(|v| format!("{:>14.6e}", v)).collect();
        out.push_str("  ");
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
    out
}

/// Format a vector one labelled entry per line.
pub fn format_vector(label: &str, v: &[f64]) -> String {
    v.iter()
        .enumerate()
        .map(|(i, x)| format!("  {}[{}] = {:.12e}\n", label, i, x))
        .collect()
}

/// Row-major nested arrays, matching the problem file layout.
pub fn matrix_to_json(m: &DMatrix<f64>) -> Value {
    let rows: Vec<Vec<f64>> = m
        .row_iter()
        .map(|row| row.iter().copied().collect())
        .collect();
    json!(rows)
}

pub fn vector_to_json(v: &DVector<f64>) -> Value {
    json!(v.as_slice())
}
