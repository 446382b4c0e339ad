//! Test doubles for the HTTP client port.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

use vantage_domain::{Headers, RequestSpec, ResponseSpec};

use crate::ports::{HttpClient, HttpClientError};

/// Records every request and answers from a script.
#[derive(Debug, Default)]
pub struct RecordingClient {
    requests: RefCell<Vec<RequestSpec>>,
    script: RefCell<VecDeque<Result<ResponseSpec, HttpClientError>>>,
    fallback: Option<ResponseSpec>,
}

impl RecordingClient {
    /// Answers with the scripted results in order, then fails.
    pub fn new(script: Vec<Result<ResponseSpec, HttpClientError>>) -> Self {
        Self {
            script: RefCell::new(script.into()),
            ..Self::default()
        }
    }

    /// Answers every request with the same status and body.
    pub fn replying(status: u16, body: &str) -> Self {
        let mut headers = Headers::new();
        headers.set("Content-Type", "application/json");
        Self {
            fallback: Some(ResponseSpec::new(
                status,
                headers,
                body.as_bytes().to_vec(),
                Duration::from_millis(1),
            )),
            ..Self::default()
        }
    }

    /// Returns the requests received so far.
    pub fn requests(&self) -> Vec<RequestSpec> {
        self.requests.borrow().clone()
    }
}

impl HttpClient for RecordingClient {
    fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        self.requests.borrow_mut().push(request.clone());
        if let Some(next) = self.script.borrow_mut().pop_front() {
            return next;
        }
        self.fallback
            .clone()
            .ok_or_else(|| HttpClientError::Other("no scripted response left".to_string()))
    }
}
