//! Application startup.
//!
//! The harness hook runs first. If it reports that tests ran, startup stops
//! there; otherwise the normal application behaviour follows, which for this
//! demo is a single line of output.

use crate::animals;
use crate::error::DemoResult;
use pagetest::{
    execute, ConsoleRenderer, HarnessConfig, PageUrl, RendererKind, RunSummary, TableOptions,
    TableRenderer, TestRegistry,
};
use std::io::Write;

/// Text written when the page did not ask for tests
pub const NOT_RUN_MESSAGE: &str = "Tests did not run.";

/// What startup did
#[derive(Debug)]
pub enum AppOutcome {
    /// Tests ran; startup stopped after rendering them
    TestsRan(RunSummary),
    /// Normal application behaviour ran
    Normal,
}

impl AppOutcome {
    /// False only when tests ran and at least one failed
    #[must_use]
    pub fn succeeded(&self) -> bool {
        match self {
            Self::TestsRan(summary) => summary.all_passed(),
            Self::Normal => true,
        }
    }

    /// Run summary, if tests ran
    #[must_use]
    pub const fn summary(&self) -> Option<&RunSummary> {
        match self {
            Self::TestsRan(summary) => Some(summary),
            Self::Normal => None,
        }
    }
}

/// The demo application and its registered tests
#[derive(Debug)]
pub struct App {
    registry: TestRegistry,
    config: HarnessConfig,
    table: TableOptions,
}

impl App {
    /// Application with the animal tests registered
    #[must_use]
    pub fn new(config: HarnessConfig) -> Self {
        let mut registry = TestRegistry::new();
        animals::register_tests(&mut registry);
        Self::with_registry(registry, config)
    }

    /// Application over an explicit registry
    #[must_use]
    pub fn with_registry(registry: TestRegistry, config: HarnessConfig) -> Self {
        Self {
            registry,
            config,
            table: TableOptions::default(),
        }
    }

    /// Set the table renderer's container options
    #[must_use]
    pub fn with_table_options(mut self, table: TableOptions) -> Self {
        self.table = table;
        self
    }

    /// Registered tests
    #[must_use]
    pub const fn registry(&self) -> &TestRegistry {
        &self.registry
    }

    /// Active harness configuration
    #[must_use]
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Start up for `page`, writing either test results or the normal output
    /// to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid filter or when writing fails
    pub fn init<W: Write>(&self, page: &PageUrl, mut out: W) -> DemoResult<AppOutcome> {
        let ran = match self.config.renderer {
            RendererKind::Console => execute(
                &self.registry,
                page,
                &self.config,
                &mut ConsoleRenderer::new(&mut out),
            )?,
            RendererKind::Table => execute(
                &self.registry,
                page,
                &self.config,
                &mut TableRenderer::with_options(&mut out, self.table.clone()),
            )?,
        };
        if let Some(summary) = ran {
            return Ok(AppOutcome::TestsRan(summary));
        }

        writeln!(out, "{NOT_RUN_MESSAGE}")?;
        out.flush()?;
        Ok(AppOutcome::Normal)
    }
}

/// Start the demo application with `config` for `page`
///
/// # Errors
///
/// See [`App::init`]
pub fn app_init<W: Write>(page: &PageUrl, config: HarnessConfig, out: W) -> DemoResult<AppOutcome> {
    App::new(config).init(page, out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::DemoError;
    use pagetest::{PageTestError, TestStatus};

    fn page(url: &str) -> PageUrl {
        PageUrl::parse(url).unwrap()
    }

    fn init(url: &str, config: HarnessConfig) -> (AppOutcome, String) {
        let mut out = Vec::new();
        let outcome = app_init(&page(url), config, &mut out).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    mod startup_tests {
        use super::*;

        #[test]
        fn test_normal_behaviour_without_param() {
            let (outcome, text) = init("http://localhost/", HarnessConfig::default());
            assert!(matches!(outcome, AppOutcome::Normal));
            assert!(outcome.succeeded());
            assert!(outcome.summary().is_none());
            assert_eq!(text, "Tests did not run.\n");
        }

        #[test]
        fn test_runs_animal_tests() {
            let (outcome, text) = init("http://localhost/?run_tests=1", HarnessConfig::default());
            assert!(outcome.succeeded());
            assert_eq!(outcome.summary().unwrap().passed_count(), 3);
            assert_eq!(
                text,
                "Test \"TestCat\": OK\nTest \"TestDog\": OK\nTest \"TestChorus\": OK\n"
            );
            assert!(!text.contains(NOT_RUN_MESSAGE));
        }

        #[test]
        fn test_filter_skips_others() {
            let (outcome, text) = init(
                "http://localhost/?run_tests=1&run_only=Cat",
                HarnessConfig::default(),
            );
            let statuses: Vec<TestStatus> = outcome
                .summary()
                .unwrap()
                .outcomes
                .iter()
                .map(|o| o.status)
                .collect();
            assert_eq!(
                statuses,
                vec![TestStatus::Passed, TestStatus::Skipped, TestStatus::Skipped]
            );
            assert!(text.contains("Test \"TestDog\": SKIPPED"));
        }

        #[test]
        fn test_table_renderer() {
            let config = HarnessConfig::builder()
                .renderer(RendererKind::Table)
                .build();
            let (_, text) = init("http://localhost/?run_tests=1", config);
            assert!(text.contains("<table"));
            assert!(text.contains("run_only=TestDog"));
        }

        #[test]
        fn test_table_options_applied() {
            let config = HarnessConfig::builder()
                .renderer(RendererKind::Table)
                .build();
            let app = App::new(config).with_table_options(TableOptions {
                standalone: true,
                ..TableOptions::default()
            });
            let mut out = Vec::new();
            app.init(&page("http://localhost/?run_tests=1"), &mut out)
                .unwrap();
            assert!(String::from_utf8(out).unwrap().starts_with("<!DOCTYPE html>"));
        }

        #[test]
        fn test_invalid_filter_is_error() {
            let mut out = Vec::new();
            let err = app_init(
                &page("http://localhost/?run_tests=1&run_only=%5B"),
                HarnessConfig::default(),
                &mut out,
            )
            .unwrap_err();
            assert!(matches!(
                err,
                DemoError::Harness(PageTestError::InvalidFilter { .. })
            ));
            assert!(out.is_empty());
        }
    }

    mod outcome_tests {
        use super::*;

        #[test]
        fn test_failure_is_not_success() {
            let mut registry = TestRegistry::new();
            registry.add("TestBroken", |t| t.assert_equal("meow", "woof"));
            registry.add("TestFine", |_| {});
            let app = App::with_registry(registry, HarnessConfig::default());

            let mut out = Vec::new();
            let outcome = app
                .init(&page("http://localhost/?run_tests=1"), &mut out)
                .unwrap();

            assert!(!outcome.succeeded());
            let text = String::from_utf8(out).unwrap();
            assert!(text.starts_with("Test \"TestBroken\": FAIL\nError: \"meow\" !== \"woof\""));
            assert!(text.ends_with("Test \"TestFine\": OK\n"));
        }
    }
}
