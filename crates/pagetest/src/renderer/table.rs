//! HTML table renderer.
//!
//! Produces a three-column table (Test Name, Outcome, Message) with one row
//! per outcome. Each test name links back to the current page with the
//! filter parameter set to that name, so following the link re-runs just
//! that test. The markup is written once, after the last outcome.

use super::{RenderSetup, Renderer};
use crate::outcome::TestOutcome;
use crate::result::PageTestResult;
use std::io::Write;
use url::Url;

const TABLE_STYLE: &str =
    "font-family: monospace; vertical-align: top; border-collapse: collapse; border: 1px solid black;";
const CELL_LEFT: &str = "text-align: left; vertical-align: top;";
const CELL_CENTER: &str = "text-align: center; vertical-align: top;";
const CELL_MESSAGE: &str = "text-align: left; vertical-align: top; white-space: pre;";

/// Container options for the table renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// CSS class of the container element, omitted when empty
    pub container_class: String,
    /// Inline style of the container element, omitted when empty
    pub container_style: String,
    /// Wrap the container in a complete HTML document
    pub standalone: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            container_class: String::new(),
            container_style: "font-size: 12px; font-family: monospace;".to_string(),
            standalone: false,
        }
    }
}

/// Rows collected during one run
#[derive(Debug)]
pub struct TableDraft {
    page: Url,
    run_only_param: String,
    rows: Vec<String>,
}

/// Renders outcomes as an HTML table
#[derive(Debug)]
pub struct TableRenderer<W: Write> {
    out: W,
    options: TableOptions,
}

impl<W: Write> TableRenderer<W> {
    /// Render to `out` with default options
    #[must_use]
    pub fn new(out: W) -> Self {
        Self::with_options(out, TableOptions::default())
    }

    /// Render to `out` with `options`
    #[must_use]
    pub const fn with_options(out: W, options: TableOptions) -> Self {
        Self { out, options }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn container_open(&self) -> String {
        let mut tag = String::from("<div");
        if !self.options.container_class.is_empty() {
            tag.push_str(&format!(
                r#" class="{}""#,
                escape_html(&self.options.container_class)
            ));
        }
        if !self.options.container_style.is_empty() {
            tag.push_str(&format!(
                r#" style="{}""#,
                escape_html(&self.options.container_style)
            ));
        }
        tag.push('>');
        tag
    }
}

impl<W: Write> Renderer for TableRenderer<W> {
    type Handle = TableDraft;

    fn setup(&mut self, setup: &RenderSetup<'_>) -> PageTestResult<TableDraft> {
        let header = format!(
            concat!(
                "<tr>",
                r#"<th style="width: 10em; {left}">Test Name</th>"#,
                r#"<th style="width: 8em; {center}">Outcome</th>"#,
                r#"<th style="width: 20em; {left}">Message</th>"#,
                "</tr>"
            ),
            left = CELL_LEFT,
            center = CELL_CENTER,
        );
        Ok(TableDraft {
            page: setup.page.as_url().clone(),
            run_only_param: setup.config.run_only_param.clone(),
            rows: vec![header],
        })
    }

    fn render_outcome(
        &mut self,
        handle: &mut TableDraft,
        outcome: &TestOutcome,
    ) -> PageTestResult<()> {
        let rerun = rerun_url(&handle.page, &handle.run_only_param, &outcome.name);
        let color = outcome.status.color();
        let row_open = if color.is_empty() {
            "<tr>".to_string()
        } else {
            format!(r#"<tr style="background-color: {color};">"#)
        };
        handle.rows.push(format!(
            r#"{row_open}<td style="{CELL_LEFT}"><a href="{href}">{name}</a></td><td style="{CELL_CENTER}">{status}</td><td style="{CELL_MESSAGE}">{message}</td></tr>"#,
            href = escape_html(rerun.as_str()),
            name = escape_html(&outcome.name),
            status = outcome.status.label(),
            message = escape_html(outcome.stack()),
        ));
        Ok(())
    }

    fn finish(&mut self, handle: TableDraft) -> PageTestResult<()> {
        let mut html = String::new();
        if self.options.standalone {
            html.push_str(
                "<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"UTF-8\">\n    <title>Test Results</title>\n</head>\n<body>\n",
            );
        }
        html.push_str(&self.container_open());
        html.push('\n');
        html.push_str(&format!(r#"<table style="{TABLE_STYLE}">"#));
        html.push('\n');
        for row in &handle.rows {
            html.push_str(row);
            html.push('\n');
        }
        html.push_str("</table>\n</div>\n");
        if self.options.standalone {
            html.push_str("</body>\n</html>\n");
        }
        self.out.write_all(html.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

/// `page` with the filter parameter set to `name`, replacing any existing
/// value in place and otherwise appending it.
fn rerun_url(page: &Url, run_only_param: &str, name: &str) -> Url {
    let mut pairs: Vec<(String, String)> = page.query_pairs().into_owned().collect();
    let mut replaced = false;
    for (key, value) in &mut pairs {
        if key == run_only_param {
            *value = name.to_string();
            replaced = true;
        }
    }
    if !replaced {
        pairs.push((run_only_param.to_string(), name.to_string()));
    }
    let mut url = page.clone();
    url.query_pairs_mut().clear().extend_pairs(pairs.iter());
    url
}

/// Escape HTML special characters
#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
