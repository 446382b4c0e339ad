//! Actor settings loading.
//!
//! Settings come from an optional JSON file, then environment variables
//! override individual fields.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use vantage_domain::ActorSettings;

/// Environment variable holding the base URL.
pub const ENV_BASE_URL: &str = "VANTAGE_BASE_URL";
/// Environment variable holding the request timeout in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "VANTAGE_TIMEOUT_MS";
/// Environment variable holding the User-Agent header.
pub const ENV_USER_AGENT: &str = "VANTAGE_USER_AGENT";
/// Environment variable holding the redirect limit.
pub const ENV_MAX_REDIRECTS: &str = "VANTAGE_MAX_REDIRECTS";
/// Environment variable pointing at a JSON settings file.
pub const ENV_CONFIG_FILE: &str = "VANTAGE_CONFIG";

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable holds a value that cannot be parsed.
    #[error("invalid value for {key}: {value}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Rejected value.
        value: String,
    },

    /// The settings file could not be read.
    #[error("failed to read settings file {}: {source}", path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON settings.
    #[error("failed to parse settings file {}: {source}", path.display())]
    Parse {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

/// Loads settings from the process environment.
///
/// When `VANTAGE_CONFIG` is set the named file is loaded first.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or a variable is malformed.
pub fn settings_from_env() -> Result<ActorSettings, ConfigError> {
    settings_from_lookup(|key| std::env::var(key).ok())
}

/// Loads settings from variables returned by `lookup`.
///
/// # Errors
///
/// Same as [`settings_from_env`].
pub fn settings_from_lookup<F>(lookup: F) -> Result<ActorSettings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = match lookup(ENV_CONFIG_FILE) {
        Some(path) => settings_from_file(path)?,
        None => ActorSettings::default(),
    };
    apply_overrides(&mut settings, lookup)?;
    Ok(settings)
}

/// Loads settings from a JSON file. Missing fields take their defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn settings_from_file(path: impl AsRef<Path>) -> Result<ActorSettings, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Overrides fields of `settings` with the values `lookup` returns.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] for unparsable numbers.
pub fn apply_overrides<F>(settings: &mut ActorSettings, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = lookup(ENV_BASE_URL) {
        settings.base_url = Some(base_url);
    }
    if let Some(user_agent) = lookup(ENV_USER_AGENT) {
        settings.user_agent = user_agent;
    }
    if let Some(value) = lookup(ENV_TIMEOUT_MS) {
        settings.timeout_ms = parse_number(ENV_TIMEOUT_MS, value)?;
    }
    if let Some(value) = lookup(ENV_MAX_REDIRECTS) {
        settings.max_redirects = parse_number(ENV_MAX_REDIRECTS, value)?;
    }
    Ok(())
}

fn parse_number<T: std::str::FromStr>(key: &str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value,
    })
}
