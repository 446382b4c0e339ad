//! Vantage Application - Actor and suite runner
//!
//! This crate holds the transport-independent core of the toolkit:
//! the fluent [`RequestActor`], the [`testing`] context and suite runner,
//! and the [`ports::HttpClient`] boundary implemented by adapters.

pub mod actor;
pub mod error;
pub mod ports;
pub mod testing;

#[cfg(test)]
mod test_support;

pub use actor::RequestActor;
pub use error::{ActorError, ActorResult};
pub use testing::{
    RunnableSuite, Suite, SuiteMethod, TEST_PREFIX, TestCase, TestContext, abort, discover,
    is_test_method, run_suites,
};
