//! Subcommand runners.
//!
//! Each runner loads a JSON problem file, calls one solver and prints either
//! a text summary or a JSON document on stdout.

mod decompose;
mod eigen;
mod linear;
mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use eigenkit_validate::Problem;
use nalgebra::{DMatrix, DVector};

pub use decompose::run_qr;
pub use eigen::run_eigen;
pub use linear::{run_descent, run_gauss};
pub use validate::run_validate;

/// Load a problem file and build its matrix.
fn load_matrix(path: &Path) -> Result<(Problem, DMatrix<f64>)> {
    let problem = Problem::load(path)
        .with_context(|| format!("Failed to read problem file: {}", path.display()))?;
    let a = problem
        .to_matrix()
        .with_context(|| format!("Invalid matrix in {}", path.display()))?;
    log::info!(
        "Loaded {}x{} matrix from {}",
        a.nrows(),
        a.ncols(),
        path.display()
    );
    Ok((problem, a))
}

/// Load a problem file that must carry a right-hand side.
fn load_system(path: &Path) -> Result<(Problem, DMatrix<f64>, DVector<f64>)> {
    let (problem, a) = load_matrix(path)?;
    let f = problem
        .to_rhs()
        .with_context(|| format!("Invalid right-hand side in {}", path.display()))?;
    Ok((problem, a, f))
}

fn display_name(problem: &Problem, path: &Path) -> String {
    problem
        .name
        .clone()
        .unwrap_or_else(|| path.display().to_string())
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}
