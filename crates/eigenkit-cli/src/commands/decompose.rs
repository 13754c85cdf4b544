use std::path::Path;

use anyhow::{Context, Result};
use eigenkit_solver::qr_decompose;
use serde_json::json;

use super::{display_name, load_matrix, print_json};
use crate::output::{format_matrix, matrix_to_json};

/// QR-decompose the matrix in `path`.
pub fn run_qr(path: &Path, json_output: bool) -> Result<()> {
    let (problem, a) = load_matrix(path)?;
    let factors = qr_decompose(&a).context("QR decomposition failed")?;

    let residual = (factors.reconstruct() - &a).amax();
    let orthogonality = factors.orthogonality_error();

    if json_output {
        return print_json(&json!({
            "name": display_name(&problem, path),
            "q": matrix_to_json(&factors.q),
            "r": matrix_to_json(&factors.r),
            "reconstruction_error": residual,
            "orthogonality_error": orthogonality,
            "negligible_columns": factors.negligible_columns,
        }));
    }

    println!("QR decomposition of {}", display_name(&problem, path));
    println!();
    println!("Q =");
    print!("{}", format_matrix(&factors.q));
    println!();
    println!("R =");
    print!("{}", format_matrix(&factors.r));
    println!();
    println!("max |QR - A|     = {:.3e}", residual);
    println!("max |QtQ - I|    = {:.3e}", orthogonality);
    if !factors.is_full_rank() {
        println!(
            "numerically rank deficient at columns {:?}",
            factors.negligible_columns
        );
    }
    Ok(())
}
