//! Fluent HTTP actor.
//!
//! A [`RequestActor`] drives one service from one test: it accumulates a
//! base URL and headers, sends requests through an [`HttpClient`], and runs
//! assertions and extractions against the most recent response.
//!
//! The fluent methods abort the current test on any failure. Each has a
//! `try_` counterpart returning an [`ActorResult`] instead.
//!
//! ```
//! # use std::time::Duration;
//! # use vantage_application::RequestActor;
//! # use vantage_application::ports::{HttpClient, HttpClientError};
//! # use vantage_domain::{Headers, RequestSpec, ResponseSpec};
//! # struct Echo;
//! # impl HttpClient for Echo {
//! #     fn execute(&self, _r: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
//! #         let body = br#"{"user":{"id":7}}"#.to_vec();
//! #         Ok(ResponseSpec::new(200, Headers::new(), body, Duration::ZERO))
//! #     }
//! # }
//! let mut id = 0_i64;
//! RequestActor::new(Echo)
//!     .set_base_url("http://localhost:8080")
//!     .have_header("Authorization", "Bearer token")
//!     .send_get("/users/7")
//!     .expect_response(200)
//!     .parse_field_from_json_path("user.id", &mut id);
//! assert_eq!(id, 7);
//! ```

use std::any::Any;
use std::mem;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use vantage_domain::{
    ActorSettings, Document, FromLeaf, Headers, HttpMethod, RequestBody, RequestSpec,
    ResponseSpec, extract_by_path, extract_into,
};

use crate::error::{ActorError, ActorResult};
use crate::ports::HttpClient;
use crate::testing::abort;

/// Fluent HTTP session bound to a single test.
///
/// Not meant to be shared between concurrently running tests.
#[derive(Debug)]
pub struct RequestActor<C> {
    client: C,
    base_url: String,
    headers: Headers,
    last_request: Option<RequestSpec>,
    last_response: Option<ResponseSpec>,
    body_consumed: bool,
}

impl<C: HttpClient> RequestActor<C> {
    /// Creates an actor with no base URL and no headers.
    #[must_use]
    pub const fn new(client: C) -> Self {
        Self {
            client,
            base_url: String::new(),
            headers: Headers::new(),
            last_request: None,
            last_response: None,
            body_consumed: false,
        }
    }

    /// Creates an actor with the base URL and default headers from `settings`.
    #[must_use]
    pub fn with_settings(client: C, settings: &ActorSettings) -> Self {
        let mut actor = Self::new(client);
        if let Some(base_url) = &settings.base_url {
            actor.base_url.clone_from(base_url);
        }
        for (name, value) in &settings.headers {
            actor.headers.set(name.as_str(), value.as_str());
        }
        actor
    }

    /// Sets the prefix prepended to every subsequent request path.
    pub fn set_base_url(&mut self, base_url: impl Into<String>) -> &mut Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets a header sent with every subsequent request, replacing any earlier value.
    pub fn have_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.set(name, value);
        self
    }

    /// Sends a GET request to `base_url + path`.
    pub fn send_get(&mut self, path: &str) -> &mut Self {
        self.send_empty(HttpMethod::Get, path)
    }

    /// Sends a POST request with `body` encoded as JSON.
    pub fn send_post<B: Serialize + ?Sized>(&mut self, path: &str, body: &B) -> &mut Self {
        self.send_json(HttpMethod::Post, path, body)
    }

    /// Sends a PUT request with `body` encoded as JSON.
    pub fn send_put<B: Serialize + ?Sized>(&mut self, path: &str, body: &B) -> &mut Self {
        self.send_json(HttpMethod::Put, path, body)
    }

    /// Sends a PATCH request with `body` encoded as JSON.
    pub fn send_patch<B: Serialize + ?Sized>(&mut self, path: &str, body: &B) -> &mut Self {
        self.send_json(HttpMethod::Patch, path, body)
    }

    /// Sends a DELETE request to `base_url + path`.
    pub fn send_delete(&mut self, path: &str) -> &mut Self {
        self.send_empty(HttpMethod::Delete, path)
    }

    /// Aborts unless the last response has the expected status code.
    pub fn expect_response(&mut self, status: u16) -> &mut Self {
        or_abort(self.try_expect_response(status));
        self
    }

    /// Reads the last response body and decodes it into `destination`.
    pub fn parse_json<T: DeserializeOwned>(&mut self, destination: &mut T) -> &mut Self {
        *destination = or_abort(self.try_parse_json());
        self
    }

    /// Reads the last response body and extracts the leaf at a dotted path.
    ///
    /// `destination` must be a `String`, `i64`, `i32`, `f64` or `bool`; any
    /// other type aborts with an unsupported destination error.
    pub fn parse_field_from_json_path<D: Any>(
        &mut self,
        path: &str,
        destination: &mut D,
    ) -> &mut Self {
        let result = self.try_document().and_then(|document| {
            extract_into(&document, path, destination).map_err(ActorError::from)
        });
        or_abort(result);
        self
    }

    /// Builds and sends a request, replacing the stored request and response.
    ///
    /// Stale state from the previous send is discarded even when this send fails.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::Transport`] if the client fails.
    pub fn try_send(
        &mut self,
        method: HttpMethod,
        path: &str,
        body: RequestBody,
    ) -> ActorResult<&ResponseSpec> {
        self.last_request = None;
        self.last_response = None;
        self.body_consumed = false;

        let mut headers = self.headers.clone();
        if let Some(content_type) = body.content_type() {
            if !headers.contains("Content-Type") {
                headers.set("Content-Type", content_type);
            }
        }
        let request = RequestSpec::new(method, format!("{}{path}", self.base_url))
            .with_headers(headers)
            .with_body(body);

        tracing::debug!(
            method = %request.method,
            url = %request.url,
            headers = request.headers.len(),
            "sending request"
        );
        let response = self.client.execute(&request)?;
        tracing::debug!(
            status = response.status,
            elapsed_ms = u64::try_from(response.duration.as_millis()).unwrap_or(u64::MAX),
            "received response"
        );

        self.last_request = Some(request);
        Ok(&*self.last_response.insert(response))
    }

    /// Checks the status of the last response.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::UnexpectedStatus`] on mismatch and
    /// [`ActorError::NoResponse`] if nothing was sent yet.
    pub fn try_expect_response(&self, status: u16) -> ActorResult<()> {
        let actual = self.response()?.status;
        if actual == status {
            Ok(())
        } else {
            Err(ActorError::UnexpectedStatus {
                expected: status,
                actual,
            })
        }
    }

    /// Reads the last response body and decodes it as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::BodyRead`] if the body was already consumed and
    /// [`ActorError::Deserialization`] if it is not valid JSON for `T`.
    pub fn try_parse_json<T: DeserializeOwned>(&mut self) -> ActorResult<T> {
        let body = self.take_body()?;
        serde_json::from_slice(&body).map_err(|e| ActorError::Deserialization(e.to_string()))
    }

    /// Reads the last response body and extracts the leaf at a dotted path.
    ///
    /// # Errors
    ///
    /// Same as [`Self::try_parse_json`], plus [`ActorError::Extraction`] when
    /// the path cannot be resolved or coerced.
    pub fn try_parse_field_from_json_path<T: FromLeaf>(&mut self, path: &str) -> ActorResult<T> {
        let document = self.try_document()?;
        Ok(extract_by_path(&document, path)?)
    }

    /// Returns the last request sent, if any.
    #[must_use]
    pub const fn last_request(&self) -> Option<&RequestSpec> {
        self.last_request.as_ref()
    }

    /// Returns the last response received, if any.
    ///
    /// Its body is empty once it has been parsed.
    #[must_use]
    pub const fn last_response(&self) -> Option<&ResponseSpec> {
        self.last_response.as_ref()
    }

    /// Returns the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the headers applied to every request.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the underlying client.
    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }

    fn send_empty(&mut self, method: HttpMethod, path: &str) -> &mut Self {
        or_abort(self.try_send(method, path, RequestBody::none()));
        self
    }

    fn send_json<B: Serialize + ?Sized>(
        &mut self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> &mut Self {
        let body = or_abort(encode_body(body));
        or_abort(self.try_send(method, path, body));
        self
    }

    fn response(&self) -> ActorResult<&ResponseSpec> {
        self.last_response.as_ref().ok_or(ActorError::NoResponse)
    }

    fn take_body(&mut self) -> ActorResult<Vec<u8>> {
        let response = self.last_response.as_mut().ok_or(ActorError::NoResponse)?;
        if self.body_consumed {
            return Err(ActorError::BodyRead(
                "response body already consumed".to_string(),
            ));
        }
        self.body_consumed = true;
        Ok(mem::take(&mut response.body))
    }

    fn try_document(&mut self) -> ActorResult<Document> {
        match self.try_parse_json::<Value>()? {
            Value::Object(document) => Ok(document),
            other => Err(ActorError::Deserialization(format!(
                "expected a JSON object, found {other}"
            ))),
        }
    }
}

/// Encodes a value as a JSON request body.
///
/// # Errors
///
/// Returns [`ActorError::Serialization`] if the value cannot be encoded.
pub fn encode_body<B: Serialize + ?Sized>(body: &B) -> ActorResult<RequestBody> {
    serde_json::to_string(body)
        .map(RequestBody::json)
        .map_err(|e| ActorError::Serialization(e.to_string()))
}

fn or_abort<T>(result: ActorResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => abort(err.to_string()),
    }
}
