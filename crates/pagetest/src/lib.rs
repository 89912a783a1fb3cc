//! pagetest: a small in-page unit test harness
//!
//! Application code registers named test bodies on a [`TestRegistry`] during
//! startup. On every page load the host calls [`run_tests`]; unless the page
//! URL carries `run_tests=1` that call does nothing and the application
//! continues as usual. When activated, tests whose names match the
//! `run_only` pattern run, the rest are skipped, and the outcomes go to a
//! [`Renderer`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ TestRegistry │──►│ Activation   │──►│ TestRunner   │──►│ Renderer     │
//! │ (add)        │   │ Gate (URL)   │   │ (filter, run)│   │ console/table│
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use pagetest::{run_tests, ConsoleRenderer, HarnessConfig, PageUrl, TestRegistry};
//!
//! let mut registry = TestRegistry::new();
//! registry.add("TestMath", |t| t.assert_equal(&4, &(2 + 2)));
//!
//! let page = PageUrl::parse("http://localhost/?run_tests=1").unwrap();
//! let ran = run_tests(
//!     &registry,
//!     &page,
//!     &HarnessConfig::default(),
//!     &mut ConsoleRenderer::stdout(),
//! )
//! .unwrap();
//! assert!(ran);
//! ```
//!
//! Test bodies signal failure by unwinding, so the harness needs
//! `panic = "unwind"`.

#![warn(missing_docs)]
#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)
)]

mod assertion;
mod capture;
mod config;
mod gate;
mod harness;
pub mod logging;
mod outcome;
pub mod renderer;
mod result;

pub use assertion::{
    Absence, Assertion, AssertionFailure, AssertionResult, Definedness, Identity, TestContext,
};
pub use config::{
    HarnessConfig, HarnessConfigBuilder, DEFAULT_RUN_ONLY_PARAM, DEFAULT_RUN_TESTS_PARAM,
};
pub use gate::{
    execute, execute_with_config, run_tests, run_tests_with_config, Activation, ActivationGate,
    PageUrl,
};
pub use harness::{TestBody, TestCase, TestFilter, TestRegistry, TestRunner};
pub use outcome::{Failure, FailureKind, RunSummary, TestOutcome, TestStatus};
pub use renderer::{
    render_all, ConsoleRenderer, RenderSetup, Renderer, RendererKind, TableOptions, TableRenderer,
};
pub use result::{PageTestError, PageTestResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::{
        run_tests, run_tests_with_config, ConsoleRenderer, HarnessConfig, PageUrl, Renderer,
        RendererKind, TableRenderer, TestContext, TestOutcome, TestRegistry, TestStatus,
    };
}
