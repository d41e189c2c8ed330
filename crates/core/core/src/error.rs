//! Error types for the HorusPay client.
//!
//! Every request either succeeds with a typed value or fails with exactly one
//! [`HorusPayError`] variant. Transport failures keep the outgoing request and
//! the raw response so callers can decide on their own retry policy.

use serde_json::{Map, Value};
use thiserror::Error;

/// The main error type for HorusPay client operations.
#[derive(Debug, Error)]
pub enum HorusPayError {
    // ==================== Transport Errors ====================
    /// The request failed on the network or the server answered with a non-2xx status.
    #[error(transparent)]
    ApiConnection(Box<ApiConnectionError>),

    // ==================== Usage Errors ====================
    /// The caller passed malformed input.
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// The client configuration cannot be used.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    // ==================== Response Errors ====================
    /// The server answered with a body the protocol cannot unwrap.
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl HorusPayError {
    /// Creates a new invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Returns the HTTP status of a transport error, if a response was received.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::ApiConnection(err) => err.http_status,
            _ => None,
        }
    }

    /// Returns the transport error details, if this is one.
    pub fn as_api_connection(&self) -> Option<&ApiConnectionError> {
        match self {
            Self::ApiConnection(err) => Some(err),
            _ => None,
        }
    }
}

/// A Result type alias using HorusPayError.
pub type HorusPayResult<T> = Result<T, HorusPayError>;

impl From<serde_json::Error> for HorusPayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<ApiConnectionError> for HorusPayError {
    fn from(err: ApiConnectionError) -> Self {
        Self::ApiConnection(Box::new(err))
    }
}

/// The outgoing request as it was sent.
#[derive(Debug, Clone, Default)]
pub struct HttpRequestSnapshot {
    /// Upper-case HTTP method.
    pub method: String,
    /// Full URL without the query string.
    pub url: String,
    /// Headers after merging defaults with caller headers.
    pub headers: Vec<(String, String)>,
    /// Query parameters (GET/HEAD/DELETE).
    pub query: Vec<(String, String)>,
    /// JSON body (other methods).
    pub body: Option<Value>,
}

impl HttpRequestSnapshot {
    /// Looks up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// The raw response received for a failed request.
#[derive(Debug, Clone, Default)]
pub struct HttpResponseSnapshot {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: Vec<(String, String)>,
    /// Parsed JSON body, or the raw text as a JSON string.
    pub body: Value,
}

impl HttpResponseSnapshot {
    /// Looks up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// A request could not be completed.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiConnectionError {
    /// Human-readable message.
    pub message: String,
    /// HTTP status, or `None` if no response was received.
    pub http_status: Option<u16>,
    /// The outgoing request.
    pub http_request: HttpRequestSnapshot,
    /// The response, if one was received.
    pub http_response: Option<HttpResponseSnapshot>,
}

impl ApiConnectionError {
    /// The `message` field of the server's error body.
    pub fn error_message(&self) -> Option<&str> {
        self.http_response
            .as_ref()
            .and_then(|response| response.body.get("message"))
            .and_then(Value::as_str)
    }

    /// The per-field `errors` object of the server's error body.
    pub fn errors(&self) -> Option<&Map<String, Value>> {
        self.http_response
            .as_ref()
            .and_then(|response| response.body.get("errors"))
            .and_then(Value::as_object)
    }

    /// Returns true if the server reported field errors.
    pub fn has_errors(&self) -> bool {
        self.errors().is_some_and(|errors| !errors.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn connection_error(body: Value) -> ApiConnectionError {
        ApiConnectionError {
            message: "Request error: Request failed with status code 422".to_string(),
            http_status: Some(422),
            http_request: HttpRequestSnapshot::default(),
            http_response: Some(HttpResponseSnapshot {
                status: 422,
                headers: vec![("Content-Type".to_string(), "application/json".to_string())],
                body,
            }),
        }
    }

    #[test]
    fn test_error_display() {
        let err = HorusPayError::invalid_request("missing id");
        assert_eq!(err.to_string(), "Invalid request: missing id");

        let err: HorusPayError = connection_error(Value::Null).into();
        assert_eq!(
            err.to_string(),
            "Request error: Request failed with status code 422"
        );
        assert_eq!(err.http_status(), Some(422));
    }

    #[test]
    fn test_server_error_body() {
        let err = connection_error(json!({
            "message": "Customer creation failed",
            "errors": { "lastname": ["lastname field required"] }
        }));

        assert!(err.has_errors());
        assert_eq!(err.error_message(), Some("Customer creation failed"));
        assert!(err.errors().unwrap().contains_key("lastname"));
        assert_eq!(
            err.http_response.as_ref().unwrap().header("content-type"),
            Some("application/json")
        );
    }

    #[test]
    fn test_no_response_body() {
        let err = ApiConnectionError {
            message: "Request error: connection refused".to_string(),
            http_status: None,
            http_request: HttpRequestSnapshot::default(),
            http_response: None,
        };

        assert!(!err.has_errors());
        assert_eq!(err.error_message(), None);
    }
}
