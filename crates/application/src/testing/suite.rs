//! Suite discovery and execution.
//!
//! A suite registers its candidate methods through [`Suite::methods`],
//! usually with the [`suite_methods!`](crate::suite_methods) macro. Discovery
//! keeps the methods whose name starts with [`TEST_PREFIX`] and is longer
//! than the prefix itself, in registration order. Each discovered method
//! runs as its own sub-test, framed by the suite's `before` and `after` hooks.

use std::any::type_name;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use super::TestContext;

/// Name prefix that marks a registered method as a test.
pub const TEST_PREFIX: &str = "test_";

/// Signature shared by test methods and their registered neighbours.
pub type TestFn<S> = fn(&mut S, &mut TestContext);

/// Returns true if a method with this name is a test method.
#[must_use]
pub fn is_test_method(name: &str) -> bool {
    name.len() > TEST_PREFIX.len() && name.starts_with(TEST_PREFIX)
}

/// A bundle of test methods sharing setup and teardown.
///
/// ```
/// use vantage_application::{Suite, SuiteMethod, TestContext, suite_methods};
///
/// struct Health {
///     checks: u32,
/// }
///
/// impl Health {
///     fn test_counts(&mut self, _t: &mut TestContext) {
///         self.checks += 1;
///     }
/// }
///
/// impl Suite for Health {
///     fn before(&mut self, _t: &mut TestContext) {}
///     fn after(&mut self, _t: &mut TestContext) {}
///     fn methods() -> Vec<SuiteMethod<Self>> {
///         suite_methods![test_counts]
///     }
/// }
///
/// let mut suite = Health { checks: 0 };
/// let mut ctx = TestContext::new("doc");
/// vantage_application::run_suites(&mut ctx, &mut [&mut suite]);
/// assert_eq!(suite.checks, 1);
/// ```
pub trait Suite {
    /// Runs before every test method.
    fn before(&mut self, ctx: &mut TestContext);

    /// Runs after every test method, including ones that aborted.
    fn after(&mut self, ctx: &mut TestContext);

    /// Every candidate method, in the order they should run.
    ///
    /// Methods without the test prefix may be listed; they are never invoked
    /// by the runner.
    fn methods() -> Vec<SuiteMethod<Self>>
    where
        Self: Sized;

    /// Name used in logs. Defaults to the type name without its module path.
    fn name(&self) -> String {
        let full = type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full).to_string()
    }
}

/// A named method registered by a suite.
pub struct SuiteMethod<S> {
    name: &'static str,
    func: TestFn<S>,
}

impl<S> SuiteMethod<S> {
    /// Registers a method under a name.
    #[must_use]
    pub const fn new(name: &'static str, func: TestFn<S>) -> Self {
        Self { name, func }
    }

    /// Returns the registered name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns true if the name marks this method as a test.
    #[must_use]
    pub fn is_test(&self) -> bool {
        is_test_method(self.name)
    }
}

impl<S> Clone for SuiteMethod<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for SuiteMethod<S> {}

impl<S> fmt::Debug for SuiteMethod<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuiteMethod").field("name", &self.name).finish()
    }
}

/// A discovered test method, ready to run against a suite instance.
pub struct TestCase<S> {
    name: &'static str,
    func: TestFn<S>,
}

impl<S: Suite> TestCase<S> {
    /// Returns the method name, used as the sub-test name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Runs `before`, the test method and `after` on `suite`.
    ///
    /// If `before` aborts the method is skipped. `after` always runs once;
    /// the first abort is then re-raised so the case is reported failed.
    pub fn invoke(&self, suite: &mut S, ctx: &mut TestContext) {
        let setup = panic::catch_unwind(AssertUnwindSafe(|| suite.before(ctx)));
        let body = setup.and_then(|()| {
            panic::catch_unwind(AssertUnwindSafe(|| (self.func)(suite, ctx)))
        });
        let teardown = panic::catch_unwind(AssertUnwindSafe(|| suite.after(ctx)));
        if let Some(payload) = body.err().or_else(|| teardown.err()) {
            panic::resume_unwind(payload);
        }
    }
}

impl<S> From<SuiteMethod<S>> for TestCase<S> {
    fn from(method: SuiteMethod<S>) -> Self {
        Self {
            name: method.name,
            func: method.func,
        }
    }
}

impl<S> fmt::Debug for TestCase<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase").field("name", &self.name).finish()
    }
}

/// Discovers the test methods of a suite type, in registration order.
#[must_use]
pub fn discover<S: Suite>() -> Vec<TestCase<S>> {
    S::methods()
        .into_iter()
        .filter(SuiteMethod::is_test)
        .map(TestCase::from)
        .collect()
}

/// Object-safe view of a [`Suite`], so suites of different types can run together.
pub trait RunnableSuite {
    /// Name used in logs.
    fn suite_name(&self) -> String;

    /// Runs every discovered test method inside a sub-test named after the suite.
    ///
    /// Returns the number of cases run.
    fn run_cases(&mut self, ctx: &mut TestContext) -> usize;
}

impl<S: Suite> RunnableSuite for S {
    fn suite_name(&self) -> String {
        self.name()
    }

    fn run_cases(&mut self, ctx: &mut TestContext) -> usize {
        let name = self.name();
        let cases = discover::<S>();
        tracing::info!(suite = %name, cases = cases.len(), "running suite");

        ctx.run(&name, |s| {
            for case in &cases {
                s.run(case.name(), |t| case.invoke(self, t));
            }
        });
        cases.len()
    }
}

/// Runs every suite in order.
///
/// Each suite becomes a sub-test of `ctx` and each of its test methods a
/// sub-test of that, so outcomes are named `root/Suite/method`.
///
/// The runner never fails itself; failures are recorded on `ctx`.
pub fn run_suites(ctx: &mut TestContext, suites: &mut [&mut dyn RunnableSuite]) {
    for suite in suites.iter_mut() {
        let count = suite.run_cases(ctx);
        tracing::debug!(suite = %suite.suite_name(), count, "suite finished");
    }
}

/// Builds the method list for [`Suite::methods`] from method names.
///
/// Must be used inside the suite's `impl Suite` block.
#[macro_export]
macro_rules! suite_methods {
    ($($method:ident),* $(,)?) => {
        ::std::vec![
            $($crate::testing::SuiteMethod::<Self>::new(
                ::std::stringify!($method),
                Self::$method,
            )),*
        ]
    };
}
