//! Result Rendering
//!
//! A renderer is set up once per run and then receives every outcome in
//! registration order. New output targets implement [`Renderer`]; the runner
//! does not change.

mod console;
mod table;

pub use console::ConsoleRenderer;
pub use table::{escape_html, TableDraft, TableOptions, TableRenderer};

use crate::config::HarnessConfig;
use crate::gate::PageUrl;
use crate::outcome::TestOutcome;
use crate::result::{PageTestError, PageTestResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Built-in renderer selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// One text line per outcome
    #[default]
    Console,
    /// HTML table with re-run links
    Table,
}

impl RendererKind {
    /// Configuration name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Console => "console",
            Self::Table => "table",
        }
    }
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RendererKind {
    type Err = PageTestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "console" => Ok(Self::Console),
            "table" => Ok(Self::Table),
            other => Err(PageTestError::config(format!(
                "unknown renderer '{other}': expected console or table"
            ))),
        }
    }
}

/// What a renderer learns before the first outcome
#[derive(Debug, Clone, Copy)]
pub struct RenderSetup<'a> {
    /// Active configuration
    pub config: &'a HarnessConfig,
    /// Page the run was requested from
    pub page: &'a PageUrl,
}

/// Pluggable consumer of test outcomes
pub trait Renderer {
    /// Per-run state returned by [`Renderer::setup`]
    type Handle;

    /// Prepare output for one run
    fn setup(&mut self, setup: &RenderSetup<'_>) -> PageTestResult<Self::Handle>;

    /// Render one outcome; called once per outcome, in order
    fn render_outcome(
        &mut self,
        handle: &mut Self::Handle,
        outcome: &TestOutcome,
    ) -> PageTestResult<()>;

    /// Complete the run once every outcome has been rendered
    fn finish(&mut self, handle: Self::Handle) -> PageTestResult<()> {
        drop(handle);
        Ok(())
    }
}

/// Drive `renderer` through one complete run
///
/// # Errors
///
/// Returns the first error reported by the renderer
pub fn render_all<R: Renderer + ?Sized>(
    renderer: &mut R,
    setup: &RenderSetup<'_>,
    outcomes: &[TestOutcome],
) -> PageTestResult<()> {
    let mut handle = renderer.setup(setup)?;
    for outcome in outcomes {
        renderer.render_outcome(&mut handle, outcome)?;
    }
    renderer.finish(handle)
}
