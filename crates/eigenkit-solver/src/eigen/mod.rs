//! Shifted QR eigenvalue solver.
//!
//! Repeatedly factors a shifted copy of the working matrix with
//! [`qr_decompose`](crate::qr::qr_decompose), recombines the factors in
//! reverse order and restores the shift. For symmetric matrices the iterate
//! converges toward diagonal form, whose entries are the eigenvalues.
//!
//! # Usage
//!
//! ```
//! use eigenkit_solver::{EigenStatus, solve_eigenvalues};
//! use nalgebra::dmatrix;
//!
//! let a = dmatrix![2.0, 1.0; 1.0, 2.0];
//! let solution = solve_eigenvalues(&a, 200, 1e-12).unwrap();
//!
//! assert_eq!(solution.status, EigenStatus::Converged);
//! let mut values = solution.sorted_eigenvalues();
//! assert!((values.remove(0) - 1.0).abs() < 1e-8);
//! assert!((values.remove(0) - 3.0).abs() < 1e-8);
//! ```
//!
//! # Module Structure
//!
//! - [`iteration`] - Single-step state machine, shift handling and history

pub mod iteration;

pub use iteration::{
    DiagonalHistory, IterationPhase, ShiftedQrIteration, restore_shift, subtract_shift,
};

use nalgebra::{DMatrix, DVector};

use crate::error::{Error, Result};

/// Eigenvalue solver configuration.
#[derive(Debug, Clone)]
pub struct EigenConfig {
    /// Maximum number of outer iterations.
    pub max_iterations: usize,
    /// Iteration stops once the change between consecutive diagonals is below this.
    pub tolerance: f64,
}

impl Default for EigenConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            tolerance: 1e-20,
        }
    }
}

impl EigenConfig {
    /// Create a configuration from a signed iteration count.
    ///
    /// Counts below one are rejected here, before any matrix is touched.
    pub fn new(max_iterations: i64, tolerance: f64) -> Result<Self> {
        let max_iterations = usize::try_from(max_iterations)
            .ok()
            .filter(|&m| m >= 1)
            .ok_or(Error::InvalidIterations {
                value: max_iterations,
            })?;
        let config = Self {
            max_iterations,
            tolerance,
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Check the parameters without running anything.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(Error::InvalidIterations { value: 0 });
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(Error::InvalidTolerance {
                value: self.tolerance,
            });
        }
        Ok(())
    }
}

/// How an eigenvalue solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EigenStatus {
    /// The diagonal changed by less than the tolerance between two iterations.
    Converged,
    /// The iteration cap was reached first.
    MaxIterations,
    /// The shifted matrix could not be factored because `column` collapsed.
    ///
    /// The shift matched an eigenvalue exactly while off-diagonal entries
    /// remained (or the input itself was singular on the first iteration).
    /// The returned diagonal is the last one reached. An exact shift hit on an
    /// already diagonal iterate is reported as [`EigenStatus::Converged`]
    /// instead, since that diagonal is exact.
    RankDeficient { column: usize },
}

impl EigenStatus {
    /// Returns true if the solve met its tolerance.
    pub fn is_converged(&self) -> bool {
        matches!(self, EigenStatus::Converged)
    }
}

/// Result of an eigenvalue solve.
#[derive(Debug, Clone)]
pub struct EigenSolution {
    /// Diagonal of the final iterate.
    pub eigenvalues: DVector<f64>,
    /// Number of outer iterations performed.
    pub iterations: usize,
    /// Last convergence metric.
    pub metric: f64,
    /// How the solve ended.
    pub status: EigenStatus,
}

impl EigenSolution {
    /// Returns true if the solve met its tolerance.
    pub fn converged(&self) -> bool {
        self.status.is_converged()
    }

    /// Eigenvalues in ascending order.
    pub fn sorted_eigenvalues(&self) -> Vec<f64> {
        let mut values: Vec<f64> = self.eigenvalues.iter().copied().collect();
        values.sort_by(f64::total_cmp);
        values
    }
}

/// Compute the eigenvalues of a square matrix by shifted QR iteration.
///
/// # Arguments
/// * `a` - Square matrix; it is copied, never modified
/// * `max_iterations` - Iteration cap, must be at least 1
/// * `tolerance` - Stop once consecutive diagonals differ by less than this
///
/// # Errors
///
/// Returns a configuration error for `max_iterations < 1` or a non-positive
/// tolerance, and a shape error for non-square or non-finite input. Reaching
/// the cap is not an error: check [`EigenSolution::status`] or compare
/// [`EigenSolution::iterations`] against the cap.
pub fn solve_eigenvalues(
    a: &DMatrix<f64>,
    max_iterations: i64,
    tolerance: f64,
) -> Result<EigenSolution> {
    let config = EigenConfig::new(max_iterations, tolerance)?;
    solve_eigenvalues_with_config(a, &config)
}

/// Compute eigenvalues using an explicit configuration.
///
/// Loops while `iterations < max_iterations` and `metric >= tolerance`. The
/// first iteration's metric equals the tolerance, so at least two iterations
/// run whenever the cap allows it, unless the second one hits an exact
/// eigenvalue of an already diagonal iterate.
pub fn solve_eigenvalues_with_config(
    a: &DMatrix<f64>,
    config: &EigenConfig,
) -> Result<EigenSolution> {
    config.validate()?;
    let mut iteration = ShiftedQrIteration::new(a, config.tolerance)?;
    let mut metric = config.tolerance;

    let status = loop {
        if metric < config.tolerance {
            break EigenStatus::Converged;
        }
        if iteration.iterations() >= config.max_iterations {
            break EigenStatus::MaxIterations;
        }
        match iteration.step() {
            Ok(d) => metric = d,
            Err(Error::RankDeficient { column }) if is_diagonal(iteration.iterate()) => {
                log::info!(
                    "QR iteration stopped after {} iterations: shift hit an eigenvalue of a diagonal iterate (column {})",
                    iteration.iterations(),
                    column
                );
                break EigenStatus::Converged;
            }
            Err(Error::RankDeficient { column }) => {
                log::warn!(
                    "QR iteration stopped after {} iterations: shifted matrix is rank deficient at column {}",
                    iteration.iterations(),
                    column
                );
                break EigenStatus::RankDeficient { column };
            }
            Err(e) => return Err(e),
        }
    };

    match status {
        EigenStatus::Converged if metric >= config.tolerance => {}
        EigenStatus::Converged => log::info!(
            "QR iteration converged in {} iterations (metric {:.3e})",
            iteration.iterations(),
            metric
        ),
        EigenStatus::MaxIterations => log::warn!(
            "QR iteration did not converge after {} iterations (metric {:.3e})",
            iteration.iterations(),
            metric
        ),
        EigenStatus::RankDeficient { .. } => {}
    }

    Ok(EigenSolution {
        eigenvalues: iteration.eigenvalues(),
        iterations: iteration.iterations(),
        metric,
        status,
    })
}

/// True when every off-diagonal entry is exactly zero.
fn is_diagonal(m: &DMatrix<f64>) -> bool {
    m.column_iter()
        .enumerate()
        .all(|(j, col)| col.iter().enumerate().all(|(i, &v)| i == j || v == 0.0))
}
