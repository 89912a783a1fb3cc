//! pagetest-demo CLI
//!
//! ## Usage
//!
//! ```bash
//! pagetest-demo --url 'http://localhost/'                           # normal startup
//! pagetest-demo --url 'http://localhost/?run_tests=1'               # run all tests
//! pagetest-demo --url 'http://localhost/?run_tests=1&run_only=Cat'  # filter by name
//! pagetest-demo --url '...?run_tests=1' --renderer table -o out.html
//! ```

use clap::Parser;
use console::style;
use pagetest::{logging, RunSummary, TableOptions};
use pagetest_demo::{App, AppOutcome, Cli, DemoResult};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> DemoResult<bool> {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.verbose, cli.log_format.into()) {
        eprintln!("warning: {e}");
    }

    let page = cli.page()?;
    let config = cli.harness_config()?;

    let outcome = match &cli.output {
        Some(path) => {
            let app = App::new(config).with_table_options(TableOptions {
                standalone: true,
                ..TableOptions::default()
            });
            let mut out = BufWriter::new(File::create(path)?);
            let outcome = app.init(&page, &mut out)?;
            out.flush()?;
            outcome
        }
        None => App::new(config).init(&page, io::stdout().lock())?,
    };

    if let AppOutcome::TestsRan(summary) = &outcome {
        if !cli.quiet || !summary.all_passed() {
            print_summary(summary);
        }
    }
    Ok(outcome.succeeded())
}

fn print_summary(summary: &RunSummary) {
    let status = if summary.all_passed() {
        style("PASSED").green().bold().for_stderr()
    } else {
        style("FAILED").red().bold().for_stderr()
    };
    eprintln!(
        "{status} {} in {:.2}s",
        summary.summary(),
        summary.duration.as_secs_f64()
    );
}
