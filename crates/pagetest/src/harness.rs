//! Test registry and runner.

use crate::assertion::TestContext;
use crate::capture;
use crate::outcome::{RunSummary, TestOutcome};
use crate::result::{PageTestError, PageTestResult};
use regex::Regex;
use std::fmt;
use std::time::Instant;
use uuid::Uuid;

/// Boxed test body
pub type TestBody = Box<dyn Fn(&TestContext)>;

/// A registered test
pub struct TestCase {
    /// Test name
    pub name: String,
    body: TestBody,
}

impl TestCase {
    /// Create a new test case
    #[must_use]
    pub fn new(name: impl Into<String>, body: impl Fn(&TestContext) + 'static) -> Self {
        Self {
            name: name.into(),
            body: Box::new(body),
        }
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase").field("name", &self.name).finish()
    }
}

/// Ordered set of registered tests.
///
/// Owned by the application's composition root. Tests are only ever
/// appended; registration order is report order. Names need not be unique.
#[derive(Debug, Default)]
pub struct TestRegistry {
    tests: Vec<TestCase>,
}

impl TestRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a test body under `name`
    pub fn add(&mut self, name: impl Into<String>, body: impl Fn(&TestContext) + 'static) {
        self.tests.push(TestCase::new(name, body));
    }

    /// Number of registered tests
    #[must_use]
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    /// Whether nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Names in registration order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.tests.iter().map(|t| t.name.as_str()).collect()
    }

    /// Iterate over registered tests
    pub fn iter(&self) -> std::slice::Iter<'_, TestCase> {
        self.tests.iter()
    }
}

/// Compiled test name filter.
///
/// Matching is unanchored, so a plain word selects every name containing it
/// and the empty pattern selects everything.
#[derive(Debug, Clone)]
pub struct TestFilter {
    regex: Regex,
}

impl TestFilter {
    /// Compile `pattern`
    ///
    /// # Errors
    ///
    /// Returns [`PageTestError::InvalidFilter`] if the pattern does not compile
    pub fn new(pattern: &str) -> PageTestResult<Self> {
        let regex = Regex::new(pattern).map_err(|source| PageTestError::InvalidFilter {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }

    /// Whether the test called `name` should run
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// Source pattern
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

/// Executes a registry against a filter
#[derive(Debug, Default)]
pub struct TestRunner;

impl TestRunner {
    /// Create a new test runner
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Run every test whose name matches `pattern`; the rest are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`PageTestError::InvalidFilter`] before any test runs if the
    /// pattern does not compile. Failing tests are never errors.
    pub fn run(&self, registry: &TestRegistry, pattern: &str) -> PageTestResult<RunSummary> {
        let filter = TestFilter::new(pattern)?;
        Ok(self.run_filtered(registry, &filter))
    }

    /// Run with an already compiled filter
    #[must_use]
    pub fn run_filtered(&self, registry: &TestRegistry, filter: &TestFilter) -> RunSummary {
        let run_id = Uuid::new_v4();
        let start = Instant::now();
        tracing::info!(%run_id, filter = filter.pattern(), tests = registry.len(), "starting test run");

        let outcomes: Vec<TestOutcome> = registry
            .iter()
            .map(|case| self.run_one(case, filter))
            .collect();

        let summary = RunSummary {
            run_id,
            outcomes,
            duration: start.elapsed(),
        };
        tracing::info!(
            %run_id,
            passed = summary.passed_count(),
            failed = summary.failed_count(),
            skipped = summary.skipped_count(),
            "test run finished"
        );
        summary
    }

    fn run_one(&self, case: &TestCase, filter: &TestFilter) -> TestOutcome {
        if !filter.matches(&case.name) {
            tracing::debug!(test = %case.name, "skipped");
            return TestOutcome::skipped(&case.name);
        }

        tracing::debug!(test = %case.name, "running");
        let context = TestContext::new(&case.name);
        let start = Instant::now();
        let result = capture::catch(|| (case.body)(&context));
        let outcome = context.finish(result, start.elapsed());

        if let Some(failure) = &outcome.failure {
            tracing::warn!(test = %outcome.name, kind = ?failure.kind, message = %failure.message, "test failed");
        }
        outcome
    }
}
