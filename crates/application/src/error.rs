//! Application error types

use thiserror::Error;
use vantage_domain::DomainError;

use crate::ports::HttpClientError;

/// Errors raised by the request actor.
///
/// Every variant is terminal for the current test case: the fluent actor
/// methods turn them into an abort with the error's message.
#[derive(Debug, Error)]
pub enum ActorError {
    /// The request body could not be encoded.
    #[error("failed to marshal request body: {0}")]
    Serialization(String),

    /// The request could not be built or sent.
    #[error("failed to send request: {0}")]
    Transport(#[from] HttpClientError),

    /// The response status differs from the expected one.
    #[error("unexpected status code: expected {expected}, got {actual}")]
    UnexpectedStatus {
        /// Expected status code.
        expected: u16,
        /// Actual status code.
        actual: u16,
    },

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    BodyRead(String),

    /// The response body is not valid JSON for the destination.
    #[error("failed to parse JSON: {0}")]
    Deserialization(String),

    /// Dotted-path extraction failed.
    #[error("failed to extract JSON path: {0}")]
    Extraction(#[from] DomainError),

    /// An assertion or extraction ran before any request was sent.
    #[error("no response recorded: send a request before asserting on it")]
    NoResponse,
}

/// Result type alias for actor operations.
pub type ActorResult<T> = Result<T, ActorError>;
