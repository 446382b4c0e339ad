//! Test execution support.
//!
//! [`TestContext`] is the ambient reporting context handed to every test
//! body: it aborts the current case on failure and runs named sub-tests in
//! isolation. The suite runner builds on it to execute every test method a
//! [`Suite`] registers, framed by the suite's before and after hooks.

mod context;
mod suite;

pub use context::{TestContext, abort};
pub use suite::{
    RunnableSuite, Suite, SuiteMethod, TEST_PREFIX, TestCase, TestFn, discover, is_test_method,
    run_suites,
};
