//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port with reqwest's blocking
//! client, so actors stay synchronous inside ordinary `#[test]` functions.
//! The response body is read in full before `execute` returns, which hands
//! the connection back to reqwest's pool immediately.

use std::time::{Duration, Instant};

use reqwest::Method;
use reqwest::blocking::Client;
use reqwest::header::{HeaderName, HeaderValue};
use url::Url;
use vantage_application::ports::{HttpClient, HttpClientError};
use vantage_domain::{ActorSettings, Headers, HttpMethod, RequestSpec, ResponseSpec};

/// HTTP client implementation using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    timeout_ms: u64,
    max_redirects: usize,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        Self::from_settings(&ActorSettings::default())
    }

    /// Creates a client honouring the timeout, user agent and redirect limit in `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn from_settings(settings: &ActorSettings) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_millis(settings.timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(settings.max_redirects))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self {
            client,
            timeout_ms: settings.timeout_ms,
            max_redirects: settings.max_redirects,
        })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Validates headers before they reach the wire.
    fn header_pairs(headers: &Headers) -> Result<Vec<(HeaderName, HeaderValue)>, HttpClientError> {
        headers
            .iter()
            .map(|header| {
                let name = HeaderName::from_bytes(header.name.as_bytes())
                    .map_err(|e| HttpClientError::InvalidHeader(format!("{}: {e}", header.name)))?;
                let value = HeaderValue::from_str(&header.value)
                    .map_err(|e| HttpClientError::InvalidHeader(format!("{}: {e}", header.name)))?;
                Ok((name, value))
            })
            .collect()
    }

    /// Maps reqwest errors to the port's `HttpClientError`.
    fn map_error(&self, error: &reqwest::Error) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout {
                timeout_ms: self.timeout_ms,
            };
        }

        if error.is_connect() {
            let message = error.to_string();
            if format!("{error:?}").to_lowercase().contains("refused") {
                let url = error.url();
                return HttpClientError::ConnectionRefused {
                    host: url
                        .and_then(Url::host_str)
                        .unwrap_or("unknown")
                        .to_string(),
                    port: url.and_then(Url::port_or_known_default).unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects {
                max: self.max_redirects,
            };
        }

        if error.is_body() || error.is_decode() {
            return HttpClientError::BodyRead(error.to_string());
        }

        HttpClientError::Other(error.to_string())
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        let url = Url::parse(&request.url)
            .map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {}", request.url)))?;

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url);
        for (name, value) in Self::header_pairs(&request.headers)? {
            builder = builder.header(name, value);
        }
        if !request.body.is_none() {
            builder = builder.body(request.body.content.clone());
        }

        let start = Instant::now();
        let response = builder.send().map_err(|e| self.map_error(&e))?;
        let status = response.status().as_u16();

        let mut headers = Headers::new();
        for (name, value) in response.headers() {
            headers.set(name.as_str(), value.to_str().unwrap_or("<binary>"));
        }

        let body = response
            .bytes()
            .map_err(|e| HttpClientError::BodyRead(e.to_string()))?
            .to_vec();

        Ok(ResponseSpec::new(status, headers, body, start.elapsed()))
    }
}
