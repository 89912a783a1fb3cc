//! Assertions for test validation.
//!
//! [`Assertion`] evaluates a check into an [`AssertionResult`] without side
//! effects. [`TestContext`] is what a test body receives: it runs the same
//! checks and, on the first one that does not hold, raises an
//! [`AssertionFailure`] that unwinds the body back to the runner.

use crate::capture;
use crate::outcome::{Failure, TestOutcome, TestStatus};
use serde::Serialize;
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt::{self, Debug};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

/// Result of an assertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionResult {
    /// Whether the assertion passed
    pub passed: bool,
    /// Human-readable message
    pub message: String,
}

impl AssertionResult {
    /// Create a passing assertion result
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            passed: true,
            message: String::new(),
        }
    }

    /// Create a failing assertion result
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
        }
    }
}

/// Panic payload raised when an assertion does not hold.
///
/// The runner recognises this payload and reports the test as an assertion
/// failure; any other payload is reported as a panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionFailure {
    /// Failure message
    pub message: String,
}

impl AssertionFailure {
    /// Create a new assertion failure
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Strict identity, the `===` of the assertion API.
///
/// Scalars are identical when their values are equal. Composite values are
/// identical only when both sides are the same instance.
pub trait Identity {
    /// Whether `self` and `other` are identical
    fn is_identical(&self, other: &Self) -> bool;
}

macro_rules! identity_by_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl Identity for $t {
                #[allow(clippy::float_cmp)]
                fn is_identical(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

identity_by_value!(
    (), bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, str,
    String,
);

impl<T> Identity for Vec<T> {
    fn is_identical(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl<T> Identity for VecDeque<T> {
    fn is_identical(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl<K, V, S> Identity for HashMap<K, V, S> {
    fn is_identical(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl<K, V> Identity for BTreeMap<K, V> {
    fn is_identical(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl<T, S> Identity for HashSet<T, S> {
    fn is_identical(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl<T> Identity for BTreeSet<T> {
    fn is_identical(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl<T: ?Sized> Identity for Rc<T> {
    fn is_identical(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identity for Arc<T> {
    fn is_identical(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: Identity + ?Sized> Identity for &T {
    fn is_identical(&self, other: &Self) -> bool {
        (**self).is_identical(*other)
    }
}

impl<T: Identity> Identity for Option<T> {
    fn is_identical(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.is_identical(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl Identity for serde_json::Value {
    fn is_identical(&self, other: &Self) -> bool {
        use serde_json::Value;
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => {
                std::ptr::eq(self, other)
            }
            _ => false,
        }
    }
}

/// Which absence sentinel a value holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absence {
    /// No value at all (`None`)
    Undefined,
    /// An explicit null (`serde_json::Value::Null`)
    Null,
}

/// Values that can be absent.
pub trait Definedness {
    /// The absence sentinel held by this value, if any
    fn absence(&self) -> Option<Absence>;
}

impl<T> Definedness for Option<T> {
    fn absence(&self) -> Option<Absence> {
        self.is_none().then_some(Absence::Undefined)
    }
}

impl Definedness for serde_json::Value {
    fn absence(&self) -> Option<Absence> {
        self.is_null().then_some(Absence::Null)
    }
}

impl<T: Definedness + ?Sized> Definedness for &T {
    fn absence(&self) -> Option<Absence> {
        (**self).absence()
    }
}

/// Side-effect free checks behind the [`TestContext`] assertions
#[derive(Debug)]
pub struct Assertion;

impl Assertion {
    /// `actual` must be exactly the boolean `true`
    #[must_use]
    pub fn strict_true<T: Any + Debug>(actual: &T) -> AssertionResult {
        match (actual as &dyn Any).downcast_ref::<bool>() {
            Some(true) => AssertionResult::pass(),
            _ => AssertionResult::fail(format!("true !== {actual:?}")),
        }
    }

    /// `actual` must be exactly the boolean `false`
    #[must_use]
    pub fn strict_false<T: Any + Debug>(actual: &T) -> AssertionResult {
        match (actual as &dyn Any).downcast_ref::<bool>() {
            Some(false) => AssertionResult::pass(),
            _ => AssertionResult::fail(format!("false !== {actual:?}")),
        }
    }

    /// `expected` and `actual` must be identical
    #[must_use]
    pub fn identical<T: Identity + Debug + ?Sized>(expected: &T, actual: &T) -> AssertionResult {
        if expected.is_identical(actual) {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(format!("{expected:?} !== {actual:?}"))
        }
    }

    /// `expected` and `actual` must not be identical
    #[must_use]
    pub fn not_identical<T: Identity + Debug + ?Sized>(
        expected: &T,
        actual: &T,
    ) -> AssertionResult {
        if expected.is_identical(actual) {
            AssertionResult::fail(format!("{expected:?} === {actual:?}"))
        } else {
            AssertionResult::pass()
        }
    }

    /// Canonical serializations of `expected` and `actual` must match
    #[must_use]
    pub fn deep_equal<E, A>(expected: &E, actual: &A) -> AssertionResult
    where
        E: Serialize + ?Sized,
        A: Serialize + ?Sized,
    {
        match (canonical_json(expected), canonical_json(actual)) {
            (Ok(e), Ok(a)) if e == a => AssertionResult::pass(),
            (Ok(e), Ok(a)) => AssertionResult::fail(format!("\n{e}\n  ===\n{a}\n")),
            (Err(err), _) | (_, Err(err)) => {
                AssertionResult::fail(format!("value could not be serialized: {err}"))
            }
        }
    }

    /// Canonical serializations of `expected` and `actual` must differ
    #[must_use]
    pub fn deep_not_equal<E, A>(expected: &E, actual: &A) -> AssertionResult
    where
        E: Serialize + ?Sized,
        A: Serialize + ?Sized,
    {
        match (canonical_json(expected), canonical_json(actual)) {
            (Ok(e), Ok(a)) if e == a => AssertionResult::fail(format!("\n{e}\n  !==\n{a}\n")),
            (Ok(_), Ok(_)) => AssertionResult::pass(),
            (Err(err), _) | (_, Err(err)) => {
                AssertionResult::fail(format!("value could not be serialized: {err}"))
            }
        }
    }

    /// `actual` must hold neither absence sentinel
    #[must_use]
    pub fn defined<T: Definedness + ?Sized>(actual: &T) -> AssertionResult {
        match actual.absence() {
            None => AssertionResult::pass(),
            Some(Absence::Undefined) => AssertionResult::fail(
                "unexpected undefined value. expected defined, not-null value.",
            ),
            Some(Absence::Null) => {
                AssertionResult::fail("unexpected null value. expected defined, not-null value.")
            }
        }
    }
}

/// Serialize through `serde_json::Value` with every object's keys sorted,
/// whichever map type serde_json was built with.
fn canonical_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut value = serde_json::to_value(value)?;
    value.sort_all_objects();
    serde_json::to_string(&value)
}

/// Assertion context handed to each test body.
///
/// # Example
///
/// ```ignore
/// registry.add("TestCat", |t| {
///     t.assert_equal("meow", Cat::new().make_sound());
/// });
/// ```
#[derive(Debug)]
pub struct TestContext {
    name: String,
    status: Cell<TestStatus>,
    failure: RefCell<Option<Failure>>,
}

impl TestContext {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: Cell::new(TestStatus::Skipped),
            failure: RefCell::new(None),
        }
    }

    /// Name of the running test
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `Skipped` while the body runs, then `Passed` or `Failed`
    #[must_use]
    pub fn status(&self) -> TestStatus {
        self.status.get()
    }

    /// Failure captured from the body, once it has finished
    #[must_use]
    pub fn failure(&self) -> Option<Failure> {
        self.failure.borrow().clone()
    }

    /// Record how the body ended and build its outcome
    pub(crate) fn finish(&self, result: Result<(), Failure>, duration: Duration) -> TestOutcome {
        match result {
            Ok(()) => {
                self.status.set(TestStatus::Passed);
                TestOutcome::passed(self.name.clone(), duration)
            }
            Err(failure) => {
                self.status.set(TestStatus::Failed);
                *self.failure.borrow_mut() = Some(failure.clone());
                TestOutcome::failed(self.name.clone(), duration, failure)
            }
        }
    }

    #[track_caller]
    fn enforce(&self, result: AssertionResult) {
        if !result.passed {
            self.fail(result.message);
        }
    }

    /// Fail the test unconditionally
    #[track_caller]
    pub fn fail(&self, message: impl Into<String>) -> ! {
        std::panic::panic_any(AssertionFailure::new(message))
    }

    /// Fail unless `actual` is exactly `true`; `1` or `"abc"` are not enough
    #[track_caller]
    pub fn assert_true<T: Any + Debug>(&self, actual: T) {
        self.enforce(Assertion::strict_true(&actual));
    }

    /// Fail unless `actual` is exactly `false`; `0` or `""` are not enough
    #[track_caller]
    pub fn assert_false<T: Any + Debug>(&self, actual: T) {
        self.enforce(Assertion::strict_false(&actual));
    }

    /// Fail unless `expected` and `actual` are identical.
    ///
    /// Composite values must be the same instance; contents are not compared.
    #[track_caller]
    pub fn assert_equal<T: Identity + Debug + ?Sized>(&self, expected: &T, actual: &T) {
        self.enforce(Assertion::identical(expected, actual));
    }

    /// Fail if `expected` and `actual` are identical
    #[track_caller]
    pub fn assert_not_equal<T: Identity + Debug + ?Sized>(&self, expected: &T, actual: &T) {
        self.enforce(Assertion::not_identical(expected, actual));
    }

    /// Fail unless both values serialize to the same canonical JSON
    #[track_caller]
    pub fn assert_deep_equal<E, A>(&self, expected: &E, actual: &A)
    where
        E: Serialize + ?Sized,
        A: Serialize + ?Sized,
    {
        self.enforce(Assertion::deep_equal(expected, actual));
    }

    /// Fail if both values serialize to the same canonical JSON
    #[track_caller]
    pub fn assert_deep_not_equal<E, A>(&self, expected: &E, actual: &A)
    where
        E: Serialize + ?Sized,
        A: Serialize + ?Sized,
    {
        self.enforce(Assertion::deep_not_equal(expected, actual));
    }

    /// Fail if `actual` is `None` or JSON `null`
    #[track_caller]
    pub fn assert_defined<T: Definedness + ?Sized>(&self, actual: &T) {
        self.enforce(Assertion::defined(actual));
    }

    /// Fail unless `body` raises with a message containing `fragment`.
    ///
    /// The raised failure is consumed; the test continues afterwards.
    #[track_caller]
    pub fn assert_throws<F: FnOnce()>(&self, body: F, fragment: &str) {
        match capture::catch(body) {
            Ok(()) => self.fail(format!(
                "expected an exception with message '{fragment}', but no exception occurred"
            )),
            Err(failure) if !failure.message.contains(fragment) => self.fail(format!(
                "exception caught, but exception message did not contain expected fragment\n    expected: {fragment}\n    received: {}",
                failure.stack
            )),
            Err(_) => {}
        }
    }
}
