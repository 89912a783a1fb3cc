//! Activation gate and run entry points.
//!
//! Hosts call [`run_tests`] unconditionally during startup. Unless the page
//! URL carries `run_tests=1` (or the configured equivalent) it returns
//! `Ok(false)` without touching the registry or the renderer, and the host
//! carries on with its normal behaviour.

use crate::config::HarnessConfig;
use crate::harness::{TestRegistry, TestRunner};
use crate::outcome::RunSummary;
use crate::renderer::{
    render_all, ConsoleRenderer, RenderSetup, Renderer, RendererKind, TableRenderer,
};
use crate::result::{PageTestError, PageTestResult};
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use url::Url;

/// The URL of the page hosting the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageUrl {
    url: Url,
}

impl PageUrl {
    /// Parse an absolute URL
    ///
    /// # Errors
    ///
    /// Returns [`PageTestError::InvalidUrl`] if `url` does not parse
    pub fn parse(url: &str) -> PageTestResult<Self> {
        Url::parse(url)
            .map(Self::from)
            .map_err(|source| PageTestError::InvalidUrl {
                url: url.to_string(),
                source,
            })
    }

    /// First value of query parameter `name`, percent-decoded
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Underlying URL
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.url
    }
}

impl From<Url> for PageUrl {
    fn from(url: Url) -> Self {
        Self { url }
    }
}

impl FromStr for PageUrl {
    type Err = PageTestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// Whether this page load runs tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Tests were not requested
    Skip,
    /// Run tests whose names match `filter`
    Run {
        /// Name filter, empty for all tests
        filter: String,
    },
}

impl Activation {
    /// Whether tests should run
    #[must_use]
    pub const fn should_run(&self) -> bool {
        matches!(self, Self::Run { .. })
    }
}

/// Reads the activation parameters from a page URL
#[derive(Debug, Clone)]
pub struct ActivationGate {
    run_tests_param: String,
    run_only_param: String,
}

impl ActivationGate {
    /// Gate using the parameter names in `config`
    #[must_use]
    pub fn new(config: &HarnessConfig) -> Self {
        Self {
            run_tests_param: config.run_tests_param.clone(),
            run_only_param: config.run_only_param.clone(),
        }
    }

    /// Decide for `page`. Only the exact value `"1"` activates.
    #[must_use]
    pub fn decide(&self, page: &PageUrl) -> Activation {
        if page.query_param(&self.run_tests_param).as_deref() != Some("1") {
            return Activation::Skip;
        }
        Activation::Run {
            filter: page.query_param(&self.run_only_param).unwrap_or_default(),
        }
    }
}

/// Gate, run and render; returns the run summary when tests ran.
///
/// # Errors
///
/// Returns an error for an invalid filter pattern or a renderer failure.
/// Failing tests are reported in the summary, not as errors.
pub fn execute<R: Renderer + ?Sized>(
    registry: &TestRegistry,
    page: &PageUrl,
    config: &HarnessConfig,
    renderer: &mut R,
) -> PageTestResult<Option<RunSummary>> {
    let filter = match ActivationGate::new(config).decide(page) {
        Activation::Skip => {
            tracing::debug!(param = %config.run_tests_param, "tests not requested");
            return Ok(None);
        }
        Activation::Run { filter } => filter,
    };

    tracing::info!(%filter, renderer = %config.renderer, "tests requested");
    let summary = TestRunner::new().run(registry, &filter)?;
    let setup = RenderSetup { config, page };
    render_all(renderer, &setup, &summary.outcomes)?;
    Ok(Some(summary))
}

/// Run tests if the page asks for them, rendering with `renderer`.
///
/// Returns `true` if tests ran and `false` if the page did not request them.
///
/// # Errors
///
/// See [`execute`]
pub fn run_tests<R: Renderer + ?Sized>(
    registry: &TestRegistry,
    page: &PageUrl,
    config: &HarnessConfig,
    renderer: &mut R,
) -> PageTestResult<bool> {
    execute(registry, page, config, renderer).map(|summary| summary.is_some())
}

/// [`execute`] with the renderer named by `config.renderer`, writing to `out`
///
/// # Errors
///
/// See [`execute`]
pub fn execute_with_config<W: Write>(
    registry: &TestRegistry,
    page: &PageUrl,
    config: &HarnessConfig,
    out: W,
) -> PageTestResult<Option<RunSummary>> {
    match config.renderer {
        RendererKind::Console => execute(registry, page, config, &mut ConsoleRenderer::new(out)),
        RendererKind::Table => execute(registry, page, config, &mut TableRenderer::new(out)),
    }
}

/// [`run_tests`] with the renderer named by `config.renderer`, writing to `out`
///
/// # Errors
///
/// See [`execute`]
pub fn run_tests_with_config<W: Write>(
    registry: &TestRegistry,
    page: &PageUrl,
    config: &HarnessConfig,
    out: W,
) -> PageTestResult<bool> {
    execute_with_config(registry, page, config, out).map(|summary| summary.is_some())
}
