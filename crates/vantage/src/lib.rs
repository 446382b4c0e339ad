//! Vantage - fluent HTTP actors for integration tests
//!
//! This crate wires the [`RequestActor`] to the reqwest transport and
//! re-exports the suite runner, so a test crate needs a single dependency.
//!
//! ```no_run
//! let mut id = 0_i64;
//! vantage::new_actor()
//!     .set_base_url("http://localhost:8080")
//!     .send_get("/users/7")
//!     .expect_response(200)
//!     .parse_field_from_json_path("user.id", &mut id);
//! ```

use thiserror::Error;

pub use vantage_application::ports::{HttpClient, HttpClientError};
pub use vantage_application::{
    ActorError, ActorResult, RequestActor, RunnableSuite, Suite, SuiteMethod, TEST_PREFIX,
    TestCase, TestContext, abort, discover, is_test_method, run_suites, suite_methods,
};
pub use vantage_domain::{
    ActorSettings, CaseOutcome, CaseStatus, Document, DomainError, FromLeaf, Headers, HttpMethod,
    LeafKind, RequestBody, RequestSpec, ResponseSpec, RunReport, extract_by_path, extract_into,
};
pub use vantage_infrastructure::{
    ConfigError, ReqwestHttpClient, init_tracing, settings_from_env, settings_from_file,
    settings_from_lookup,
};

/// An actor backed by the reqwest transport.
pub type Actor = RequestActor<ReqwestHttpClient>;

/// Errors raised while building an actor.
#[derive(Debug, Error)]
pub enum VantageError {
    /// Settings could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("http client error: {0}")]
    Client(#[from] HttpClientError),
}

/// Builds an actor from explicit settings.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn try_actor_with_settings(settings: &ActorSettings) -> Result<Actor, VantageError> {
    let client = ReqwestHttpClient::from_settings(settings)?;
    Ok(RequestActor::with_settings(client, settings))
}

/// Builds an actor with default settings.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn try_new_actor() -> Result<Actor, VantageError> {
    try_actor_with_settings(&ActorSettings::default())
}

/// Builds an actor with default settings, aborting the current test on failure.
#[must_use]
pub fn new_actor() -> Actor {
    try_new_actor().unwrap_or_else(|err| abort(err.to_string()))
}

/// Builds an actor from the `VANTAGE_*` environment variables.
///
/// # Errors
///
/// Returns an error if the settings are invalid or the client cannot be built.
pub fn actor_from_env() -> Result<Actor, VantageError> {
    let settings = settings_from_env()?;
    try_actor_with_settings(&settings)
}
