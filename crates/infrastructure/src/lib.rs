//! Vantage Infrastructure - Adapters and implementations
//!
//! This crate provides the reqwest transport behind the actor, settings
//! loading, and tracing setup for test binaries.

pub mod adapters;
pub mod config;
pub mod logging;

pub use adapters::ReqwestHttpClient;
pub use config::{
    ConfigError, apply_overrides, settings_from_env, settings_from_file, settings_from_lookup,
};
pub use logging::init_tracing;
