//! Value-by-value comparison against reference results.

use serde::Serialize;

/// Absolute and relative tolerance pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tolerances {
    /// Absolute tolerance.
    pub abs: f64,
    /// Relative tolerance.
    pub rel: f64,
}

/// Tolerances used when comparing solver output with reference output.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonConfig {
    /// Tolerances for eigenvalues.
    pub eigen: Tolerances,
    /// Tolerances for linear system solutions.
    pub solution: Tolerances,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            eigen: Tolerances { abs: 1e-6, rel: 0.0 },
            solution: Tolerances {
                abs: 1e-10,
                rel: 1e-7,
            },
        }
    }
}

impl ComparisonConfig {
    /// Set the eigenvalue tolerances.
    pub fn with_eigen_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.eigen = tolerances;
        self
    }

    /// Set the linear solution tolerances.
    pub fn with_solution_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.solution = tolerances;
        self
    }
}

/// Check whether two values agree within either tolerance.
pub fn values_match(expected: f64, actual: f64, abs_tol: f64, rel_tol: f64) -> bool {
    let diff = (expected - actual).abs();
    diff <= abs_tol || diff <= rel_tol * expected.abs().max(actual.abs())
}

/// Comparison of a single value.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    /// Label, e.g. `lambda[2]` or `x[0]`.
    pub name: String,
    /// Reference value.
    pub expected: f64,
    /// Solver value.
    pub actual: f64,
    /// Absolute difference.
    pub abs_error: f64,
    /// Whether the value is within tolerance.
    pub passed: bool,
}

/// Report for one validated problem.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    /// Problem name.
    pub name: String,
    /// True when every comparison passed.
    pub passed: bool,
    /// Individual comparisons.
    pub comparisons: Vec<Comparison>,
    /// Solver diagnostics (iteration counts, status).
    pub notes: Vec<String>,
}

impl ComparisonReport {
    /// Compare two sequences element-wise.
    ///
    /// A length mismatch fails the report without element comparisons.
    pub fn from_values(
        name: impl Into<String>,
        label: &str,
        actual: &[f64],
        expected: &[f64],
        tolerances: Tolerances,
    ) -> Self {
        let name = name.into();
        if actual.len() != expected.len() {
            return Self {
                name,
                passed: false,
                comparisons: Vec::new(),
                notes: vec![format!(
                    "length mismatch: got {}, expected {}",
                    actual.len(),
                    expected.len()
                )],
            };
        }

        let comparisons: Vec<Comparison> = actual
            .iter()
            .zip(expected.iter())
            .enumerate()
            .map(|(i, (&a, &e))| Comparison {
                name: format!("{}[{}]", label, i),
                expected: e,
                actual: a,
                abs_error: (a - e).abs(),
                passed: values_match(e, a, tolerances.abs, tolerances.rel),
            })
            .collect();

        Self {
            name,
            passed: comparisons.iter().all(|c| c.passed),
            comparisons,
            notes: Vec::new(),
        }
    }

    /// Attach a diagnostic note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Largest absolute error across comparisons.
    pub fn max_abs_error(&self) -> f64 {
        self.comparisons
            .iter()
            .map(|c| c.abs_error)
            .fold(0.0, f64::max)
    }

    /// Human-readable multi-line summary.
    pub fn to_text(&self) -> String {
        let mut out = format!(
            "{}: {}\n",
            self.name,
            if self.passed { "PASS" } else { "FAIL" }
        );
        for note in &self.notes {
            out.push_str(&format!("  {}\n", note));
        }
        for c in &self.comparisons {
            out.push_str(&format!(
                "  {:<10} expected {:>20.12e}  got {:>20.12e}  err {:.2e}{}\n",
                c.name,
                c.expected,
                c.actual,
                c.abs_error,
                if c.passed { "" } else { "  <-- FAIL" }
            ));
        }
        out
    }
}

/// Compare eigenvalues irrespective of order.
pub fn compare_eigenvalues(
    name: impl Into<String>,
    actual: &[f64],
    expected: &[f64],
    tolerances: Tolerances,
) -> ComparisonReport {
    let mut actual = actual.to_vec();
    let mut expected = expected.to_vec();
    actual.sort_by(f64::total_cmp);
    expected.sort_by(f64::total_cmp);
    ComparisonReport::from_values(name, "lambda", &actual, &expected, tolerances)
}

/// Compare solution vectors element-wise, in order.
pub fn compare_vectors(
    name: impl Into<String>,
    actual: &[f64],
    expected: &[f64],
    tolerances: Tolerances,
) -> ComparisonReport {
    ComparisonReport::from_values(name, "x", actual, expected, tolerances)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIGHT: Tolerances = Tolerances {
        abs: 1e-9,
        rel: 0.0,
    };

    #[test]
    fn eigenvalue_order_is_ignored() {
        let report = compare_eigenvalues("perm", &[3.0, 1.0, 2.0], &[1.0, 2.0, 3.0], TIGHT);

        assert!(report.passed);
        assert_eq!(report.comparisons.len(), 3);
        assert_eq!(report.comparisons[0].name, "lambda[0]");
    }

    #[test]
    fn vector_order_matters() {
        let report = compare_vectors("swap", &[2.0, 1.0], &[1.0, 2.0], TIGHT);

        assert!(!report.passed);
        assert_eq!(report.max_abs_error(), 1.0);
    }

    #[test]
    fn length_mismatch_fails() {
        let report = compare_vectors("short", &[1.0], &[1.0, 2.0], TIGHT);

        assert!(!report.passed);
        assert!(report.comparisons.is_empty());
        assert!(report.notes[0].contains("length mismatch"));
    }

    #[test]
    fn text_marks_failures() {
        let report = compare_vectors("bad", &[1.5], &[1.0], TIGHT).with_note("iterations: 3");
        let text = report.to_text();

        assert!(text.starts_with("bad: FAIL"));
        assert!(text.contains("iterations: 3"));
        assert!(text.contains("<-- FAIL"));
    }

    #[test]
    fn report_serializes() {
        let report = compare_vectors("ok", &[1.0], &[1.0], TIGHT);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["name"], "ok");
        assert_eq!(json["passed"], true);
        assert_eq!(json["comparisons"][0]["name"], "x[0]");
    }
}
