//! Validation of eigenkit solvers against independent reference routines.
//!
//! Each solver is run on a problem and its output compared value by value with
//! a reference implementation (nalgebra for eigenvalues, faer for linear
//! systems). Reports serialize to JSON for tooling.

pub mod compare;
pub mod error;
pub mod problem;
pub mod reference;
pub mod suite;

pub use compare::{
    Comparison, ComparisonConfig, ComparisonReport, Tolerances, compare_eigenvalues,
    compare_vectors, values_match,
};
pub use error::{Result, ValidateError};
pub use problem::Problem;
pub use reference::{reference_eigenvalues, reference_solve};
pub use suite::{
    Routine, SuiteFailure, SuiteSummary, ValidationCase, builtin_cases, run_builtin_suite,
    run_suite, validate_case, validate_eigenvalues, validate_gaussian, validate_steepest_descent,
};
