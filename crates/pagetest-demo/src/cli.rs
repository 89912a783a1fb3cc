//! CLI argument definitions

use crate::error::{DemoError, DemoResult};
use clap::{Parser, ValueEnum};
use pagetest::logging::LogFormat;
use pagetest::{HarnessConfig, PageUrl, RendererKind};
use std::path::PathBuf;

/// pagetest-demo: start the example application for a page URL
#[derive(Parser, Debug)]
#[command(name = "pagetest-demo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Page URL; add `run_tests=1` to run the registered tests
    #[arg(long, env = "PAGETEST_URL")]
    pub url: String,

    /// Renderer for test results (overrides the config file)
    #[arg(long)]
    pub renderer: Option<RendererArg>,

    /// Harness configuration file (.json, .yaml or .yml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Name of the query parameter that activates tests
    #[arg(long)]
    pub run_tests_param: Option<String>,

    /// Name of the query parameter holding the test name filter
    #[arg(long)]
    pub run_only_param: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress the run summary)
    #[arg(short, long)]
    pub quiet: bool,

    /// Log format
    #[arg(long, default_value = "text")]
    pub log_format: LogFormatArg,
}

impl Cli {
    /// Parse the page URL
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is empty or not absolute
    pub fn page(&self) -> DemoResult<PageUrl> {
        if self.url.trim().is_empty() {
            return Err(DemoError::invalid_argument("--url must not be empty"));
        }
        Ok(PageUrl::parse(&self.url)?)
    }

    /// Configuration from defaults, then the config file, then flags
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or the result
    /// is invalid
    pub fn harness_config(&self) -> DemoResult<HarnessConfig> {
        let mut config = match &self.config {
            Some(path) => HarnessConfig::load(path)?,
            None => HarnessConfig::default(),
        };
        if let Some(renderer) = self.renderer {
            config.renderer = renderer.into();
        }
        if let Some(name) = &self.run_tests_param {
            config.run_tests_param.clone_from(name);
        }
        if let Some(name) = &self.run_only_param {
            config.run_only_param.clone_from(name);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Renderer argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RendererArg {
    /// One line per test
    Console,
    /// HTML table with re-run links
    Table,
}

impl From<RendererArg> for RendererKind {
    fn from(arg: RendererArg) -> Self {
        match arg {
            RendererArg::Console => Self::Console,
            RendererArg::Table => Self::Table,
        }
    }
}

/// Log format argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormatArg {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => Self::Text,
            LogFormatArg::Json => Self::Json,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["pagetest-demo"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    mod parse_tests {
        use super::*;

        #[test]
        fn test_minimal() {
            let cli = parse(&["--url", "http://localhost/"]);
            assert_eq!(cli.url, "http://localhost/");
            assert_eq!(cli.renderer, None);
            assert_eq!(cli.verbose, 0);
            assert!(!cli.quiet);
            assert_eq!(cli.log_format, LogFormatArg::Text);
        }

        #[test]
        fn test_all_flags() {
            let cli = parse(&[
                "--url",
                "http://localhost/",
                "--renderer",
                "table",
                "--output",
                "out.html",
                "--run-tests-param",
                "selftest",
                "--run-only-param",
                "only",
                "-vv",
                "--log-format",
                "json",
            ]);
            assert_eq!(cli.renderer, Some(RendererArg::Table));
            assert_eq!(cli.output, Some(PathBuf::from("out.html")));
            assert_eq!(cli.verbose, 2);
            assert_eq!(cli.log_format, LogFormatArg::Json);
        }

        #[test]
        fn test_unknown_renderer_rejected() {
            let result = Cli::try_parse_from(["pagetest-demo", "--url", "x", "--renderer", "dom"]);
            assert!(result.is_err());
        }
    }

    mod config_tests {
        use super::*;

        #[test]
        fn test_defaults_without_flags() {
            let cli = parse(&["--url", "http://localhost/"]);
            assert_eq!(cli.harness_config().unwrap(), HarnessConfig::default());
        }

        #[test]
        fn test_flags_override_file() {
            let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
            writeln!(file, "renderer: table\nrun_only_param: only").unwrap();
            let path = file.path().to_str().unwrap().to_string();

            let from_file = parse(&["--url", "http://localhost/", "--config", &path])
                .harness_config()
                .unwrap();
            assert_eq!(from_file.renderer, RendererKind::Table);
            assert_eq!(from_file.run_only_param, "only");
            assert_eq!(from_file.run_tests_param, "run_tests");

            let overridden = parse(&[
                "--url",
                "http://localhost/",
                "--config",
                &path,
                "--renderer",
                "console",
                "--run-only-param",
                "filter",
            ])
            .harness_config()
            .unwrap();
            assert_eq!(overridden.renderer, RendererKind::Console);
            assert_eq!(overridden.run_only_param, "filter");
        }

        #[test]
        fn test_conflicting_param_names_rejected() {
            let cli = parse(&[
                "--url",
                "http://localhost/",
                "--run-tests-param",
                "x",
                "--run-only-param",
                "x",
            ]);
            assert!(cli.harness_config().is_err());
        }
    }

    mod page_tests {
        use super::*;

        #[test]
        fn test_page_parses() {
            let cli = parse(&["--url", "http://localhost/?run_tests=1"]);
            assert_eq!(
                cli.page().unwrap().query_param("run_tests").as_deref(),
                Some("1")
            );
        }

        #[test]
        fn test_empty_url_rejected() {
            let cli = parse(&["--url", "  "]);
            assert!(matches!(
                cli.page().unwrap_err(),
                DemoError::InvalidArgument { .. }
            ));
        }

        #[test]
        fn test_relative_url_rejected() {
            let cli = parse(&["--url", "index.html"]);
            assert!(matches!(cli.page().unwrap_err(), DemoError::Harness(_)));
        }
    }
}
