//! Property tests for the QR decomposition and shifted QR eigensolver.

use eigenkit_solver::{
    EigenStatus, Error, ShiftedQrIteration, qr_decompose, solve_eigenvalues,
};
use nalgebra::{DMatrix, dmatrix};

/// Deterministic pseudo-random matrix (64-bit LCG), entries in [-1, 1).
fn lcg_matrix(size: usize, seed: u64) -> DMatrix<f64> {
    let mut state = seed;
    DMatrix::from_fn(size, size, |_, _| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
    })
}

/// Symmetric positive definite matrix built as BᵀB + n*I.
fn spd_matrix(size: usize, seed: u64) -> DMatrix<f64> {
    let b = lcg_matrix(size, seed);
    b.transpose() * &b + DMatrix::identity(size, size) * size as f64
}

fn reference_eigenvalues(a: &DMatrix<f64>) -> Vec<f64> {
    let mut values: Vec<f64> = a.clone().symmetric_eigen().eigenvalues.iter().copied().collect();
    values.sort_by(f64::total_cmp);
    values
}

fn spd_matrix_4x4() -> DMatrix<f64> {
    dmatrix![
        4.33, -1.12, -1.08, 1.14;
        -1.12, 4.33, 0.24, -1.22;
        -1.08, 0.24, 7.21, -3.22;
        1.14, -1.22, -3.22, 5.43
    ]
}

fn correlation_matrix_4x4() -> DMatrix<f64> {
    dmatrix![
        1.00, 0.42, 0.54, 0.66;
        0.42, 1.00, 0.32, 0.44;
        0.54, 0.32, 1.00, 0.22;
        0.66, 0.44, 0.22, 1.00
    ]
}

#[test]
fn qr_reconstruction_on_random_matrices() {
    for (size, seed) in [(2, 1), (3, 7), (5, 42), (8, 1234), (12, 99)] {
        let a = lcg_matrix(size, seed);
        let factors = qr_decompose(&a).unwrap();

        let diff = (factors.reconstruct() - &a).amax();
        assert!(diff < 1e-8 * a.amax(), "size {}: |QR - A| = {}", size, diff);
        assert!(
            factors.orthogonality_error() < 1e-8,
            "size {}: |QtQ - I| = {}",
            size,
            factors.orthogonality_error()
        );
        assert!(factors.is_upper_triangular(), "size {}: R not triangular", size);
    }
}

#[test]
fn eigenvalues_of_first_validation_matrix() {
    let a = spd_matrix_4x4();

    let solution = solve_eigenvalues(&a, 200, 1e-20).unwrap();
    let expected = reference_eigenvalues(&a);

    assert!(solution.iterations <= 200);
    for (got, want) in solution.sorted_eigenvalues().iter().zip(expected.iter()) {
        assert!((got - want).abs() < 1e-6, "got {}, reference {}", got, want);
    }

    // Independently computed spectrum
    let known = [2.5317633443657597, 3.3389380550694794, 5.102519960085014, 10.326778640479757];
    for (got, want) in solution.sorted_eigenvalues().iter().zip(known.iter()) {
        assert!((got - want).abs() < 1e-6, "got {}, known {}", got, want);
    }
}

#[test]
fn eigenvalues_of_second_validation_matrix() {
    let a = correlation_matrix_4x4();

    let solution = solve_eigenvalues(&a, 200, 1e-20).unwrap();
    let expected = reference_eigenvalues(&a);

    for (got, want) in solution.sorted_eigenvalues().iter().zip(expected.iter()) {
        assert!((got - want).abs() < 1e-6, "got {}, reference {}", got, want);
    }
}

#[test]
fn eigenvalues_of_random_spd_matrices() {
    for (size, seed) in [(3, 5), (5, 17), (6, 2024)] {
        let a = spd_matrix(size, seed);

        let solution = solve_eigenvalues(&a, 500, 1e-14).unwrap();
        let expected = reference_eigenvalues(&a);

        for (got, want) in solution.sorted_eigenvalues().iter().zip(expected.iter()) {
            assert!(
                (got - want).abs() < 1e-6 * want.abs().max(1.0),
                "size {}: got {}, reference {}",
                size,
                got,
                want
            );
        }
    }
}

#[test]
fn converged_solution_stops_before_cap() {
    let a = spd_matrix_4x4();

    let solution = solve_eigenvalues(&a, 200, 1e-10).unwrap();

    assert_eq!(solution.status, EigenStatus::Converged);
    assert!(solution.iterations < 200);
    assert!(solution.metric < 1e-10);
}

#[test]
fn convergence_metric_trends_to_zero() {
    let a = spd_matrix_4x4();
    let mut iteration = ShiftedQrIteration::new(&a, 1e-20).unwrap();

    let metrics: Vec<f64> = (0..12).map(|_| iteration.step().unwrap()).collect();

    // Skip the first entry, it is the tolerance placeholder
    let early: f64 = metrics[1..4].iter().sum::<f64>() / 3.0;
    let late: f64 = metrics[9..12].iter().sum::<f64>() / 3.0;
    assert!(late < early * 1e-3, "early {:e}, late {:e}", early, late);
}

#[test]
fn configuration_rejected_before_iterating() {
    let a = spd_matrix_4x4();

    for cap in [0, -5] {
        let err = solve_eigenvalues(&a, cap, 1e-10).unwrap_err();
        assert!(err.is_configuration());
        assert!(matches!(err, Error::InvalidIterations { .. }));
    }
}
