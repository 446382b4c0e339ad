//! Test outcome reporting.
//!
//! Records what happened to each named test case run through a test context.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Final status of a single test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaseStatus {
    /// The case ran to completion without aborting.
    Passed,
    /// The case, or one of its sub-tests, aborted.
    Failed {
        /// Abort message.
        message: String,
    },
}

impl CaseStatus {
    /// Returns true if the case passed.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Returns the failure message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Passed => None,
            Self::Failed { message } => Some(message),
        }
    }
}

/// Outcome of one named test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseOutcome {
    /// Full slash-separated name, e.g. `users/test_create`.
    pub name: String,
    /// Final status.
    #[serde(flatten)]
    pub status: CaseStatus,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl CaseOutcome {
    /// Create a passed outcome.
    #[must_use]
    pub fn passed(name: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            name: name.into(),
            status: CaseStatus::Passed,
            duration_ms,
        }
    }

    /// Create a failed outcome.
    #[must_use]
    pub fn failed(name: impl Into<String>, message: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            name: name.into(),
            status: CaseStatus::Failed {
                message: message.into(),
            },
            duration_ms,
        }
    }
}

/// Summary of every case run under one test context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Name of the context the cases ran under.
    pub name: String,
    /// When the context was created.
    pub started_at: DateTime<Utc>,
    /// Individual outcomes, in completion order.
    pub outcomes: Vec<CaseOutcome>,
    /// Total number of cases.
    pub total: usize,
    /// Number of passed cases.
    pub passed: usize,
    /// Number of failed cases.
    pub failed: usize,
    /// Execution time in milliseconds.
    pub duration_ms: u64,
}

impl RunReport {
    /// Create a new report from outcomes.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        started_at: DateTime<Utc>,
        outcomes: Vec<CaseOutcome>,
        duration_ms: u64,
    ) -> Self {
        let total = outcomes.len();
        let passed = outcomes.iter().filter(|o| o.status.is_passed()).count();

        Self {
            name: name.into(),
            started_at,
            outcomes,
            total,
            passed,
            failed: total - passed,
            duration_ms,
        }
    }

    /// Check if all cases passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Get pass rate as percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }

    /// Returns the failed outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes.iter().filter(|o| !o.status.is_passed())
    }

    /// Looks up an outcome by full name.
    #[must_use]
    pub fn outcome(&self, name: &str) -> Option<&CaseOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_run_report_counts() {
        let outcomes = vec![
            CaseOutcome::passed("root/test_a", 3),
            CaseOutcome::failed("root/test_b", "unexpected status code", 1),
        ];

        let report = RunReport::new("root", Utc::now(), outcomes, 10);
        assert_eq!(report.total, 2);
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 1);
        assert!(!report.all_passed());
        assert_eq!(report.pass_rate(), 50.0);

        let failures: Vec<_> = report.failures().map(|o| o.name.as_str()).collect();
        assert_eq!(failures, vec!["root/test_b"]);
    }

    #[test]
    fn test_empty_report_passes() {
        let report = RunReport::new("root", Utc::now(), Vec::new(), 0);
        assert!(report.all_passed());
        assert_eq!(report.pass_rate(), 100.0);
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = CaseOutcome::failed("root/test_b", "boom", 2);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "root/test_b",
                "status": "failed",
                "message": "boom",
                "duration_ms": 2
            })
        );
        assert_eq!(outcome.status.message(), Some("boom"));
    }
}
