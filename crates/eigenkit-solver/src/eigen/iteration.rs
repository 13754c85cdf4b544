//! One outer step of the shifted QR iteration.

use nalgebra::{DMatrix, DVector};

use crate::error::{Error, Result};
use crate::linear::check_square;
use crate::qr::{QrFactors, gram_schmidt};

/// Where the iteration is relative to its first step.
///
/// The first step has no earlier diagonal to compare against and never
/// restores a shift; every later step does both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IterationPhase {
    /// No step has completed yet.
    #[default]
    FirstIteration,
    /// At least one step has completed.
    SteadyState,
}

impl IterationPhase {
    /// Phase after completing a step in this phase.
    pub fn advance(self) -> Self {
        IterationPhase::SteadyState
    }

    /// Convergence metric for a step that just recorded its diagonal.
    ///
    /// In [`IterationPhase::FirstIteration`] the metric is exactly `tolerance`,
    /// which can never satisfy `metric < tolerance`.
    pub fn convergence_metric(self, history: &DiagonalHistory, tolerance: f64) -> f64 {
        match self {
            IterationPhase::FirstIteration => tolerance,
            IterationPhase::SteadyState => history.change().unwrap_or(tolerance),
        }
    }
}

/// Rolling buffer of the two most recent diagonal snapshots.
#[derive(Debug, Clone, Default)]
pub struct DiagonalHistory {
    previous: Option<DVector<f64>>,
    current: Option<DVector<f64>>,
}

impl DiagonalHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new snapshot; the oldest one is dropped.
    pub fn push(&mut self, snapshot: DVector<f64>) {
        self.previous = self.current.replace(snapshot);
    }

    /// Most recent snapshot.
    pub fn latest(&self) -> Option<&DVector<f64>> {
        self.current.as_ref()
    }

    /// Snapshot before the most recent one.
    pub fn previous(&self) -> Option<&DVector<f64>> {
        self.previous.as_ref()
    }

    /// Euclidean norm of (latest - previous), if two snapshots exist.
    pub fn change(&self) -> Option<f64> {
        match (&self.previous, &self.current) {
            (Some(prev), Some(curr)) => Some((curr - prev).norm()),
            _ => None,
        }
    }
}

/// Form `ak - shift * I` before factoring.
pub fn subtract_shift(ak: &DMatrix<f64>, shift: f64, identity: &DMatrix<f64>) -> DMatrix<f64> {
    ak - identity * shift
}

/// Add the shift back after recombining `R * Q`.
///
/// The first step skips the addition; its shift is always zero, so this only
/// keeps the same conditional as the subtraction side.
pub fn restore_shift(
    rq: DMatrix<f64>,
    shift: f64,
    identity: &DMatrix<f64>,
    phase: IterationPhase,
) -> DMatrix<f64> {
    match phase {
        IterationPhase::FirstIteration => rq,
        IterationPhase::SteadyState => rq + identity * shift,
    }
}

/// State of a single shifted QR eigenvalue solve.
///
/// Owns its working matrix, so the caller's matrix is never touched. Each call
/// to [`step`](Self::step) performs one outer iteration:
///
/// 1. factor `Ak - t*I` into Q, R
/// 2. `Ak = R*Q`, plus `t*I` after the first step
/// 3. `t = Ak[n-1, n-1]`
/// 4. record `diag(Ak)`
/// 5. return the convergence metric
#[derive(Debug, Clone)]
pub struct ShiftedQrIteration {
    ak: DMatrix<f64>,
    identity: DMatrix<f64>,
    shift: f64,
    tolerance: f64,
    phase: IterationPhase,
    history: DiagonalHistory,
    iterations: usize,
}

impl ShiftedQrIteration {
    /// Start an iteration on a copy of `a`.
    pub fn new(a: &DMatrix<f64>, tolerance: f64) -> Result<Self> {
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(Error::InvalidTolerance { value: tolerance });
        }
        let n = check_square(a)?;

        Ok(Self {
            ak: a.clone(),
            identity: DMatrix::identity(n, n),
            shift: 0.0,
            tolerance,
            phase: IterationPhase::FirstIteration,
            history: DiagonalHistory::new(),
            iterations: 0,
        })
    }

    /// Matrix dimension.
    pub fn dim(&self) -> usize {
        self.ak.nrows()
    }

    /// Number of completed steps.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Shift that the next step will subtract.
    pub fn shift(&self) -> f64 {
        self.shift
    }

    /// Current phase.
    pub fn phase(&self) -> IterationPhase {
        self.phase
    }

    /// Current working matrix.
    pub fn iterate(&self) -> &DMatrix<f64> {
        &self.ak
    }

    /// Recent diagonal snapshots.
    pub fn history(&self) -> &DiagonalHistory {
        &self.history
    }

    /// Current eigenvalue estimates.
    ///
    /// Before the first step this is the diagonal of the input matrix.
    pub fn eigenvalues(&self) -> DVector<f64> {
        match self.history.latest() {
            Some(latest) => latest.clone(),
            None => self.ak.diagonal(),
        }
    }

    /// Perform one outer iteration and return its convergence metric.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RankDeficient`] when `Ak - t*I` cannot be factored,
    /// which happens when the shift equals an eigenvalue exactly. The state is
    /// left as it was before the call.
    pub fn step(&mut self) -> Result<f64> {
        let n = self.dim();

        let shifted = subtract_shift(&self.ak, self.shift, &self.identity);
        let QrFactors { q, r, .. } = gram_schmidt(&shifted)?;
        let next = restore_shift(r * q, self.shift, &self.identity, self.phase);

        self.shift = next[(n - 1, n - 1)];
        self.history.push(next.diagonal());
        let metric = self
            .phase
            .convergence_metric(&self.history, self.tolerance);

        self.ak = next;
        self.phase = self.phase.advance();
        self.iterations += 1;

        log::debug!(
            "QR iteration {}: shift = {:.6e}, metric = {:.3e}",
            self.iterations,
            self.shift,
            metric
        );

        Ok(metric)
    }
}
