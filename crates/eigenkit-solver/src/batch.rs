//! Eigenvalue solves over a batch of independent matrices.
//!
//! Every solve owns its own working state, so matrices can be processed
//! concurrently. With the `parallel` feature the batch is spread over the
//! rayon thread pool; without it the matrices are solved in order. Results
//! are identical either way.

use nalgebra::DMatrix;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::eigen::{EigenConfig, EigenSolution, solve_eigenvalues_with_config};
use crate::error::Result;

/// Solve each matrix of the batch with the same configuration.
///
/// Returns one result per input, in input order. A failure for one matrix
/// does not affect the others.
pub fn solve_eigenvalues_batch(
    matrices: &[DMatrix<f64>],
    config: &EigenConfig,
) -> Vec<Result<EigenSolution>> {
    log::debug!(
        "Solving {} eigenvalue problems ({})",
        matrices.len(),
        if cfg!(feature = "parallel") {
            "parallel"
        } else {
            "sequential"
        }
    );

    #[cfg(feature = "parallel")]
    {
        matrices
            .par_iter()
            .map(|a| solve_eigenvalues_with_config(a, config))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        matrices
            .iter()
            .map(|a| solve_eigenvalues_with_config(a, config))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use nalgebra::dmatrix;

    #[test]
    fn batch_preserves_order() {
        let matrices: Vec<DMatrix<f64>> = (1..=6)
            .map(|k| {
                let d = k as f64;
                dmatrix![d + 1.0, 1.0; 1.0, d + 1.0]
            })
            .collect();
        let config = EigenConfig::default().with_tolerance(1e-12);

        let results = solve_eigenvalues_batch(&matrices, &config);

        assert_eq!(results.len(), 6);
        for (k, result) in results.iter().enumerate() {
            // Eigenvalues of [[c, 1], [1, c]] are c - 1 and c + 1
            let c = (k + 1) as f64 + 1.0;
            let values = result.as_ref().unwrap().sorted_eigenvalues();
            assert!((values[0] - (c - 1.0)).abs() < 1e-8, "batch {}: {:?}", k, values);
            assert!((values[1] - (c + 1.0)).abs() < 1e-8, "batch {}: {:?}", k, values);
        }
    }

    #[test]
    fn batch_isolates_failures() {
        let matrices = vec![
            dmatrix![2.0, 1.0; 1.0, 2.0],
            DMatrix::<f64>::zeros(2, 3),
            dmatrix![3.0, 0.5; 0.5, 1.0],
        ];
        let config = EigenConfig::default().with_tolerance(1e-12);

        let results = solve_eigenvalues_batch(&matrices, &config);

        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(Error::NotSquare { .. })));
        assert!(results[2].is_ok());
    }

    #[test]
    fn batch_empty_input() {
        let results = solve_eigenvalues_batch(&[], &EigenConfig::default());
        assert!(results.is_empty());
    }
}
