//! Response specification type
//!
//! A response is captured in full by the transport: the body is read to the
//! end and the connection released before the response reaches the actor.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::request::Headers;

/// HTTP response specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSpec {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Raw response body
    pub body: Vec<u8>,
    /// Time between sending the request and receiving the full body
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

impl ResponseSpec {
    /// Creates a new response.
    #[must_use]
    pub const fn new(status: u16, headers: Headers, body: Vec<u8>, duration: Duration) -> Self {
        Self {
            status,
            headers,
            body,
            duration,
        }
    }

    /// Returns the value of a response header, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }
}

impl Default for ResponseSpec {
    fn default() -> Self {
        Self::new(0, Headers::new(), Vec::new(), Duration::ZERO)
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_header_lookup_ignores_case() {
        let mut headers = Headers::new();
        headers.set("Content-Type", "application/json");
        let response = ResponseSpec::new(
            200,
            headers,
            br#"{"ok":true}"#.to_vec(),
            Duration::from_millis(5),
        );

        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("X-Missing"), None);
    }

    #[test]
    fn test_duration_serialized_as_millis() {
        let duration = Duration::from_millis(42);
        let response = ResponseSpec::new(204, Headers::new(), Vec::new(), duration);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["duration"], 42);

        let back: ResponseSpec = serde_json::from_value(json).unwrap();
        assert_eq!(back, response);
    }
}
