//! Test outcomes produced by a run.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Test result status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    /// Test body completed without raising
    Passed,
    /// Test body raised
    Failed,
    /// Test name did not match the filter; the body was never invoked
    #[default]
    Skipped,
}

impl TestStatus {
    /// Check if status is passing
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Check if status is failing
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Check if status is skipped
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    /// Status word shown by renderers
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Passed => "OK",
            Self::Failed => "FAIL",
            Self::Skipped => "SKIPPED",
        }
    }

    /// Background colour used by the table renderer, empty for neutral
    #[must_use]
    pub const fn color(&self) -> &'static str {
        match self {
            Self::Passed => "#00ff00",
            Self::Failed => "#ffaaaa",
            Self::Skipped => "",
        }
    }
}

/// What raised inside a failed test body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// An assertion on the test context did not hold
    Assertion,
    /// Any other panic out of the body or the code under test
    Panic,
}

/// Failure captured from a test body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// Failure kind
    pub kind: FailureKind,
    /// Message carried by the raised failure
    pub message: String,
    /// `Error: <message>` followed by the originating location and backtrace
    pub stack: String,
}

impl Failure {
    /// Create a failure, normalizing the stack so it leads with the message
    #[must_use]
    pub fn new(kind: FailureKind, message: impl Into<String>, stack: impl Into<String>) -> Self {
        let message = message.into();
        let mut stack = stack.into();
        let header = format!("Error: {message}");
        if !stack.starts_with(&header) {
            stack = if stack.is_empty() {
                header
            } else {
                format!("{header}\n{stack}")
            };
        }
        Self {
            kind,
            message,
            stack,
        }
    }

    /// Whether the failure came from an assertion
    #[must_use]
    pub const fn is_assertion(&self) -> bool {
        matches!(self.kind, FailureKind::Assertion)
    }
}

/// Outcome of one registration in one execution pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestOutcome {
    /// Test name
    pub name: String,
    /// Test status
    pub status: TestStatus,
    /// Captured failure, present only for failed tests
    pub failure: Option<Failure>,
    /// Time spent in the body
    pub duration: Duration,
}

impl TestOutcome {
    /// Create a passing outcome
    #[must_use]
    pub fn passed(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Passed,
            failure: None,
            duration,
        }
    }

    /// Create a failing outcome
    #[must_use]
    pub fn failed(name: impl Into<String>, duration: Duration, failure: Failure) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Failed,
            failure: Some(failure),
            duration,
        }
    }

    /// Create a skipped outcome
    #[must_use]
    pub fn skipped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Skipped,
            failure: None,
            duration: Duration::ZERO,
        }
    }

    /// Stack text of the failure, empty when the test did not fail
    #[must_use]
    pub fn stack(&self) -> &str {
        self.failure.as_ref().map_or("", |f| f.stack.as_str())
    }
}

/// Ordered outcomes of one execution pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Identifier used to correlate log records of this run
    pub run_id: Uuid,
    /// Outcomes in registration order
    pub outcomes: Vec<TestOutcome>,
    /// Total duration
    pub duration: Duration,
}

impl RunSummary {
    /// Check if no test failed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| !o.status.is_failed())
    }

    /// Count passed tests
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_passed()).count()
    }

    /// Count failed tests
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_failed()).count()
    }

    /// Count skipped tests
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_skipped()).count()
    }

    /// Get total outcome count
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Get failed outcomes
    #[must_use]
    pub fn failures(&self) -> Vec<&TestOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.status.is_failed())
            .collect()
    }

    /// One-line summary
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} passed, {} failed, {} skipped ({} total)",
            self.passed_count(),
            self.failed_count(),
            self.skipped_count(),
            self.total()
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod test_status_tests {
        use super::*;

        #[test]
        fn test_status_default_is_skipped() {
            assert_eq!(TestStatus::default(), TestStatus::Skipped);
        }

        #[test]
        fn test_status_labels() {
            assert_eq!(TestStatus::Passed.label(), "OK");
            assert_eq!(TestStatus::Failed.label(), "FAIL");
            assert_eq!(TestStatus::Skipped.label(), "SKIPPED");
        }

        #[test]
        fn test_status_colors() {
            assert_eq!(TestStatus::Passed.color(), "#00ff00");
            assert_eq!(TestStatus::Failed.color(), "#ffaaaa");
            assert_eq!(TestStatus::Skipped.color(), "");
        }

        #[test]
        fn test_status_serializes_lowercase() {
            let json = serde_json::to_string(&TestStatus::Failed).unwrap();
            assert_eq!(json, "\"failed\"");
        }
    }

    mod failure_tests {
        use super::*;

        #[test]
        fn test_stack_gets_message_header() {
            let failure = Failure::new(FailureKind::Assertion, "boom", "at src/lib.rs:1:1");
            assert_eq!(failure.stack, "Error: boom\nat src/lib.rs:1:1");
        }

        #[test]
        fn test_stack_header_not_duplicated() {
            let failure = Failure::new(FailureKind::Panic, "boom", "Error: boom\nat x");
            assert_eq!(failure.stack, "Error: boom\nat x");
        }

        #[test]
        fn test_empty_stack_is_header_only() {
            let failure = Failure::new(FailureKind::Panic, "boom", "");
            assert_eq!(failure.stack, "Error: boom");
            assert!(!failure.is_assertion());
        }
    }

    mod summary_tests {
        use super::*;

        fn summary() -> RunSummary {
            RunSummary {
                run_id: Uuid::new_v4(),
                outcomes: vec![
                    TestOutcome::passed("a", Duration::ZERO),
                    TestOutcome::failed(
                        "b",
                        Duration::ZERO,
                        Failure::new(FailureKind::Assertion, "nope", ""),
                    ),
                    TestOutcome::skipped("c"),
                ],
                duration: Duration::ZERO,
            }
        }

        #[test]
        fn test_counts() {
            let s = summary();
            assert_eq!(s.passed_count(), 1);
            assert_eq!(s.failed_count(), 1);
            assert_eq!(s.skipped_count(), 1);
            assert_eq!(s.total(), 3);
            assert!(!s.all_passed());
        }

        #[test]
        fn test_failures() {
            let s = summary();
            let failures = s.failures();
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].name, "b");
            assert_eq!(failures[0].stack(), "Error: nope");
        }

        #[test]
        fn test_skipped_only_counts_as_all_passed() {
            let s = RunSummary {
                run_id: Uuid::new_v4(),
                outcomes: vec![TestOutcome::skipped("x")],
                duration: Duration::ZERO,
            };
            assert!(s.all_passed());
        }

        #[test]
        fn test_summary_line() {
            assert_eq!(
                summary().summary(),
                "1 passed, 1 failed, 1 skipped (3 total)"
            );
        }
    }
}
