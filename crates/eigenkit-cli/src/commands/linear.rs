use std::path::Path;

use anyhow::{Context, Result};
use eigenkit_solver::{SteepestDescentConfig, solve_gaussian, solve_steepest_descent};
use nalgebra::{DMatrix, DVector};
use serde_json::json;

use super::{display_name, load_system, print_json};
use crate::output::{format_vector, vector_to_json};

fn residual_norm(a: &DMatrix<f64>, x: &DVector<f64>, f: &DVector<f64>) -> f64 {
    (f - a * x).norm()
}

/// Solve the system in `path` by Gaussian elimination.
pub fn run_gauss(path: &Path, json_output: bool) -> Result<()> {
    let (problem, a, f) = load_system(path)?;
    let x = solve_gaussian(&a, &f).context("Gaussian elimination failed")?;
    let residual = residual_norm(&a, &x, &f);

    if json_output {
        return print_json(&json!({
            "name": display_name(&problem, path),
            "x": vector_to_json(&x),
            "residual": residual,
        }));
    }

    println!("Gaussian elimination: {}", display_name(&problem, path));
    print!("{}", format_vector("x", x.as_slice()));
    println!("||f - Ax|| = {:.3e}", residual);
    Ok(())
}

/// Solve the SPD system in `path` by steepest descent.
pub fn run_descent(
    path: &Path,
    max_iterations: usize,
    tolerance: f64,
    json_output: bool,
) -> Result<()> {
    let (problem, a, f) = load_system(path)?;
    let config = SteepestDescentConfig::default()
        .with_max_iterations(max_iterations)
        .with_tolerance(tolerance);

    let result = solve_steepest_descent(&a, &f, &config).context("Steepest descent failed")?;

    if json_output {
        return print_json(&json!({
            "name": display_name(&problem, path),
            "x": vector_to_json(&result.x),
            "iterations": result.iterations,
            "residual": result.residual,
            "converged": result.converged,
        }));
    }

    println!("Steepest descent: {}", display_name(&problem, path));
    print!("{}", format_vector("x", result.x.as_slice()));
    println!(
        "iterations: {} / {}   relative residual: {:.3e}{}",
        result.iterations,
        max_iterations,
        result.residual,
        if result.converged { "" } else { "  (not converged)" }
    );
    Ok(())
}
