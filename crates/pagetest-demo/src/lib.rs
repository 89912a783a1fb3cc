//! pagetest-demo: an example application that tests itself in place
//!
//! The application registers tests for its own code ([`animals`]) and calls
//! the harness at startup ([`app_init`]). Started for a URL without
//! `run_tests=1` it behaves normally; with it, the tests run and their
//! results replace the normal output.
//!
//! # Example
//!
//! ```rust
//! use pagetest::{HarnessConfig, PageUrl};
//! use pagetest_demo::{app_init, AppOutcome};
//!
//! let page = PageUrl::parse("http://localhost/").unwrap();
//! let mut out = Vec::new();
//! let outcome = app_init(&page, HarnessConfig::default(), &mut out).unwrap();
//! assert!(matches!(outcome, AppOutcome::Normal));
//! assert_eq!(String::from_utf8(out).unwrap(), "Tests did not run.\n");
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod animals;
mod app;
mod cli;
mod error;

pub use animals::{register_tests, Animal, Cat, Dog};
pub use app::{app_init, App, AppOutcome, NOT_RUN_MESSAGE};
pub use cli::{Cli, LogFormatArg, RendererArg};
pub use error::{DemoError, DemoResult};
