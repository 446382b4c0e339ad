//! HTTP Client port

use thiserror::Error;
use vantage_domain::{RequestSpec, ResponseSpec};

/// Errors reported by an [`HttpClient`] implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A header name or value is not valid on the wire.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// The request did not complete in time.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that elapsed.
        timeout_ms: u64,
    },

    /// The remote host refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The redirect limit was exceeded.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// The configured limit.
        max: usize,
    },

    /// The response body could not be read to the end.
    #[error("failed to read body: {0}")]
    BodyRead(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Port for executing HTTP requests.
///
/// Implementations read the response body in full before returning, so the
/// underlying connection is released as soon as `execute` completes.
pub trait HttpClient {
    /// Executes a request and returns the complete response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or the exchange fails.
    fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError>;
}

impl<C: HttpClient + ?Sized> HttpClient for Box<C> {
    fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        (**self).execute(request)
    }
}
