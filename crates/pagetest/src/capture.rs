//! Failure capture for unwinding test bodies.
//!
//! A process-wide panic hook is installed once. While the current thread is
//! inside [`catch`], the hook records the panic location (and a backtrace when
//! `RUST_BACKTRACE` asks for one) instead of printing. Panics on threads that
//! are not running a captured body go to the previously installed hook.

use crate::assertion::AssertionFailure;
use crate::outcome::{Failure, FailureKind};
use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

static HOOK: Once = Once::new();

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
    static LAST_TRACE: RefCell<Option<String>> = const { RefCell::new(None) };
}

fn install_hook() {
    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if DEPTH.with(Cell::get) == 0 {
                previous(info);
                return;
            }
            let mut trace = info
                .location()
                .map(|l| format!("    at {}:{}:{}", l.file(), l.line(), l.column()))
                .unwrap_or_default();
            let backtrace = Backtrace::capture();
            if backtrace.status() == BacktraceStatus::Captured {
                trace.push('\n');
                trace.push_str(&backtrace.to_string());
            }
            LAST_TRACE.with(|t| *t.borrow_mut() = Some(trace));
        }));
    });
}

/// Decrements the capture depth even if the closure bookkeeping unwinds.
struct DepthGuard;

impl DepthGuard {
    fn enter() -> Self {
        DEPTH.with(|d| d.set(d.get() + 1));
        Self
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

/// Run `body`, converting an unwind into a [`Failure`].
pub(crate) fn catch<R>(body: impl FnOnce() -> R) -> Result<R, Failure> {
    install_hook();
    LAST_TRACE.with(|t| t.borrow_mut().take());
    let result = {
        let _guard = DepthGuard::enter();
        panic::catch_unwind(AssertUnwindSafe(body))
    };
    result.map_err(|payload| {
        let trace = LAST_TRACE
            .with(|t| t.borrow_mut().take())
            .unwrap_or_default();
        let (kind, message) = describe(payload.as_ref());
        Failure::new(kind, message, trace)
    })
}

/// Classify a panic payload and extract its message.
pub(crate) fn describe(payload: &(dyn Any + Send)) -> (FailureKind, String) {
    if let Some(failure) = payload.downcast_ref::<AssertionFailure>() {
        (FailureKind::Assertion, failure.message.clone())
    } else if let Some(s) = payload.downcast_ref::<&'static str>() {
        (FailureKind::Panic, (*s).to_string())
    } else if let Some(s) = payload.downcast_ref::<String>() {
        (FailureKind::Panic, s.clone())
    } else {
        (FailureKind::Panic, "<non-string panic payload>".to_string())
    }
}
