//! Console renderer: one text line per outcome.

use super::{RenderSetup, Renderer};
use crate::outcome::TestOutcome;
use crate::result::PageTestResult;
use std::io::{self, Stdout, Write};

/// Writes `Test "<name>": <STATUS>` lines, with the failure stack below
/// failed tests.
#[derive(Debug)]
pub struct ConsoleRenderer<W: Write = Stdout> {
    out: W,
}

impl ConsoleRenderer<Stdout> {
    /// Render to standard output
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl Default for ConsoleRenderer<Stdout> {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W: Write> ConsoleRenderer<W> {
    /// Render to `out`
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    type Handle = ();

    fn setup(&mut self, _setup: &RenderSetup<'_>) -> PageTestResult<()> {
        Ok(())
    }

    fn render_outcome(&mut self, _handle: &mut (), outcome: &TestOutcome) -> PageTestResult<()> {
        let mut line = format!("Test \"{}\": {}", outcome.name, outcome.status.label());
        let stack = outcome.stack();
        if !stack.is_empty() {
            line.push('\n');
            line.push_str(stack);
        }
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    fn finish(&mut self, _handle: ()) -> PageTestResult<()> {
        self.out.flush()?;
        Ok(())
    }
}
