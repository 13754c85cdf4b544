use std::path::Path;

use anyhow::{Context, Result};
use eigenkit_solver::{EigenConfig, EigenStatus, is_symmetric, solve_eigenvalues_with_config};
use eigenkit_validate::{ComparisonConfig, compare_eigenvalues, reference_eigenvalues};
use serde_json::json;

use super::{display_name, load_matrix, print_json};
use crate::output::format_vector;

/// Compute eigenvalues of the matrix in `path` by shifted QR iteration.
///
/// Symmetric inputs are also checked against the reference eigensolver.
pub fn run_eigen(path: &Path, max_iterations: i64, tolerance: f64, json_output: bool) -> Result<()> {
    let config = EigenConfig::new(max_iterations, tolerance).context("Invalid solver settings")?;
    let (problem, a) = load_matrix(path)?;

    let solution = solve_eigenvalues_with_config(&a, &config).context("Eigenvalue solve failed")?;
    let eigenvalues = solution.sorted_eigenvalues();

    let reference = if is_symmetric(&a) {
        let expected = reference_eigenvalues(&a).context("Reference eigensolver failed")?;
        Some(compare_eigenvalues(
            display_name(&problem, path),
            &eigenvalues,
            &expected,
            ComparisonConfig::default().eigen,
        ))
    } else {
        log::info!("Matrix is not symmetric; skipping reference comparison");
        None
    };

    if json_output {
        return print_json(&json!({
            "name": display_name(&problem, path),
            "eigenvalues": eigenvalues,
            "iterations": solution.iterations,
            "max_iterations": config.max_iterations,
            "metric": solution.metric,
            "status": format!("{:?}", solution.status),
            "converged": solution.converged(),
            "reference": reference,
        }));
    }

    println!("Eigenvalues of {}", display_name(&problem, path));
    print!("{}", format_vector("lambda", &eigenvalues));
    println!();
    println!(
        "iterations: {} / {}   metric: {:.3e}",
        solution.iterations, config.max_iterations, solution.metric
    );
    match solution.status {
        EigenStatus::Converged => println!("status: converged"),
        EigenStatus::MaxIterations => println!("status: iteration cap reached"),
        EigenStatus::RankDeficient { column } => {
            println!("status: stopped, shifted matrix rank deficient at column {}", column)
        }
    }

    if let Some(report) = reference {
        println!();
        print!("{}", report.to_text());
    }
    Ok(())
}
