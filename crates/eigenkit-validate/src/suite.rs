//! Validation runners and the built-in validation suite.

use eigenkit_solver::{
    EigenConfig, SteepestDescentConfig, solve_eigenvalues_with_config, solve_gaussian,
    solve_steepest_descent,
};
use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::compare::{ComparisonConfig, ComparisonReport, compare_eigenvalues, compare_vectors};
use crate::error::Result;
use crate::problem::Problem;
use crate::reference::{reference_eigenvalues, reference_solve};

/// Which solver a case exercises.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Routine {
    /// Shifted QR eigenvalue solve.
    Eigenvalues { max_iterations: usize, tolerance: f64 },
    /// Gaussian elimination with partial pivoting.
    Gaussian,
    /// Steepest descent.
    SteepestDescent { max_iterations: usize },
}

/// A named problem paired with the routine that should solve it.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationCase {
    /// Case name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Problem data.
    pub problem: Problem,
    /// Routine under test.
    pub routine: Routine,
}

/// Run the eigensolver and compare against the reference eigenvalues.
pub fn validate_eigenvalues(
    name: &str,
    a: &DMatrix<f64>,
    eigen_config: &EigenConfig,
    config: &ComparisonConfig,
) -> Result<ComparisonReport> {
    let solution = solve_eigenvalues_with_config(a, eigen_config)?;
    let expected = reference_eigenvalues(a)?;
    let actual: Vec<f64> = solution.eigenvalues.iter().copied().collect();

    Ok(compare_eigenvalues(name, &actual, &expected, config.eigen)
        .with_note(format!(
            "iterations: {} / {}",
            solution.iterations, eigen_config.max_iterations
        ))
        .with_note(format!("status: {:?}", solution.status)))
}

/// Run Gaussian elimination and compare against the reference LU solve.
pub fn validate_gaussian(
    name: &str,
    a: &DMatrix<f64>,
    f: &DVector<f64>,
    config: &ComparisonConfig,
) -> Result<ComparisonReport> {
    let x = solve_gaussian(a, f)?;
    let expected = reference_solve(a, f)?;

    Ok(compare_vectors(
        name,
        x.as_slice(),
        expected.as_slice(),
        config.solution,
    ))
}

/// Run steepest descent and compare against the reference LU solve.
pub fn validate_steepest_descent(
    name: &str,
    a: &DMatrix<f64>,
    f: &DVector<f64>,
    descent_config: &SteepestDescentConfig,
    config: &ComparisonConfig,
) -> Result<ComparisonReport> {
    let result = solve_steepest_descent(a, f, descent_config)?;
    let expected = reference_solve(a, f)?;

    Ok(compare_vectors(
        name,
        result.x.as_slice(),
        expected.as_slice(),
        config.solution,
    )
    .with_note(format!(
        "iterations: {} / {}",
        result.iterations, descent_config.max_iterations
    ))
    .with_note(format!("relative residual: {:.3e}", result.residual)))
}

/// Run one case.
pub fn validate_case(case: &ValidationCase, config: &ComparisonConfig) -> Result<ComparisonReport> {
    let a = case.problem.to_matrix()?;

    match case.routine {
        Routine::Eigenvalues {
            max_iterations,
            tolerance,
        } => {
            let eigen_config = EigenConfig::default()
                .with_max_iterations(max_iterations)
                .with_tolerance(tolerance);
            validate_eigenvalues(&case.name, &a, &eigen_config, config)
        }
        Routine::Gaussian => {
            let f = case.problem.to_rhs()?;
            validate_gaussian(&case.name, &a, &f, config)
        }
        Routine::SteepestDescent { max_iterations } => {
            let f = case.problem.to_rhs()?;
            let descent_config =
                SteepestDescentConfig::default().with_max_iterations(max_iterations);
            validate_steepest_descent(&case.name, &a, &f, &descent_config, config)
        }
    }
}

fn spd_system() -> Problem {
    Problem::new(vec![
        vec![4.33, -1.12, -1.08, 1.14],
        vec![-1.12, 4.33, 0.24, -1.22],
        vec![-1.08, 0.24, 7.21, -3.22],
        vec![1.14, -1.22, -3.22, 5.43],
    ])
}

/// Cases covering every solver on the classic 4x4 test systems.
pub fn builtin_cases() -> Vec<ValidationCase> {
    let rhs = vec![0.3, 0.5, 0.7, 0.9];

    vec![
        ValidationCase {
            name: "qr_eigen_spd".to_string(),
            description: "Shifted QR eigenvalues of a 4x4 SPD matrix".to_string(),
            problem: spd_system().with_name("spd"),
            routine: Routine::Eigenvalues {
                max_iterations: 200,
                tolerance: 1e-20,
            },
        },
        ValidationCase {
            name: "qr_eigen_correlation".to_string(),
            description: "Shifted QR eigenvalues of a 4x4 correlation-like matrix".to_string(),
            problem: Problem::new(vec![
                vec![1.00, 0.42, 0.54, 0.66],
                vec![0.42, 1.00, 0.32, 0.44],
                vec![0.54, 0.32, 1.00, 0.22],
                vec![0.66, 0.44, 0.22, 1.00],
            ])
            .with_name("correlation"),
            routine: Routine::Eigenvalues {
                max_iterations: 200,
                tolerance: 1e-20,
            },
        },
        ValidationCase {
            name: "gaussian_pivoting".to_string(),
            description: "Gaussian elimination on a 4x4 non-symmetric system".to_string(),
            problem: Problem::new(vec![
                vec![1.00, 0.17, -0.25, 0.54],
                vec![0.47, 1.00, 0.67, -0.32],
                vec![-0.11, 0.35, 1.00, -0.74],
                vec![0.55, 0.43, 0.36, 1.00],
            ])
            .with_name("nonsymmetric")
            .with_rhs(rhs.clone()),
            routine: Routine::Gaussian,
        },
        ValidationCase {
            name: "steepest_descent_spd".to_string(),
            description: "Steepest descent on a 4x4 SPD system".to_string(),
            problem: spd_system().with_name("spd").with_rhs(rhs),
            routine: Routine::SteepestDescent {
                max_iterations: 100,
            },
        },
    ]
}

/// A case that failed or errored.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteFailure {
    /// Case name.
    pub name: String,
    /// Report text or error message.
    pub message: String,
}

/// Outcome of a suite run.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteSummary {
    /// Number of cases run.
    pub total: usize,
    /// Number of passing cases.
    pub passed: usize,
    /// Failing or erroring cases.
    pub failures: Vec<SuiteFailure>,
    /// Reports for cases that ran to completion.
    pub reports: Vec<ComparisonReport>,
}

impl SuiteSummary {
    /// True when no case failed.
    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run a set of cases, optionally keeping only names containing `filter`.
pub fn run_suite(
    cases: &[ValidationCase],
    filter: Option<&str>,
    config: &ComparisonConfig,
) -> SuiteSummary {
    let mut summary = SuiteSummary {
        total: 0,
        passed: 0,
        failures: Vec::new(),
        reports: Vec::new(),
    };

    for case in cases {
        if let Some(pattern) = filter {
            if !case.name.contains(pattern) {
                continue;
            }
        }

        summary.total += 1;

        match validate_case(case, config) {
            Ok(report) => {
                if report.passed {
                    summary.passed += 1;
                } else {
                    summary.failures.push(SuiteFailure {
                        name: case.name.clone(),
                        message: report.to_text(),
                    });
                }
                summary.reports.push(report);
            }
            Err(e) => {
                log::warn!("Validation case {} errored: {}", case.name, e);
                summary.failures.push(SuiteFailure {
                    name: case.name.clone(),
                    message: format!("Error: {}", e),
                });
            }
        }
    }

    summary
}

/// Run the built-in suite.
pub fn run_builtin_suite(filter: Option<&str>, config: &ComparisonConfig) -> SuiteSummary {
    run_suite(&builtin_cases(), filter, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_case_names_unique() {
        let cases = builtin_cases();
        let mut names: Vec<&str> = cases.iter().map(|c| c.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), cases.len());
    }

    #[test]
    fn filter_selects_subset() {
        let summary = run_builtin_suite(Some("qr_eigen"), &ComparisonConfig::default());

        assert_eq!(summary.total, 2);
        assert_eq!(summary.reports.len(), 2);
    }

    #[test]
    fn filter_without_match_runs_nothing() {
        let summary = run_builtin_suite(Some("no-such-case"), &ComparisonConfig::default());

        assert_eq!(summary.total, 0);
        assert!(summary.all_passed());
    }

    #[test]
    fn errors_are_recorded_as_failures() {
        let case = ValidationCase {
            name: "missing_rhs".to_string(),
            description: "Gaussian case without a right-hand side".to_string(),
            problem: Problem::new(vec![vec![1.0]]),
            routine: Routine::Gaussian,
        };

        let summary = run_suite(&[case], None, &ComparisonConfig::default());

        assert_eq!(summary.total, 1);
        assert_eq!(summary.passed, 0);
        assert!(summary.failures[0].message.starts_with("Error:"));
    }
}
