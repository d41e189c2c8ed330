//! HTTP request dispatch.
//!
//! [`Requestor`] turns a [`RequestDescriptor`] into one HTTP call: it resolves
//! the base URL, attaches the authentication and versioning headers, and maps
//! every transport failure or non-2xx status onto [`ApiConnectionError`].
//! It never retries.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{
    ApiConnectionError, HorusPayError, HorusPayResult, HttpRequestSnapshot, HttpResponseSnapshot,
};
use crate::util::query_pairs;

/// Client version sent in `X-Version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Client identifier sent in `X-Source`.
pub const SOURCE: &str = "HorusPay RustLib";

/// Header scoping session-token requests to an account.
pub const ACCOUNT_HEADER: &str = "HorusPay-Account";

/// Caller-supplied headers.
pub type Headers = HashMap<String, String>;

/// Hook applied to every outgoing request, in registration order.
///
/// Runs after the default and caller headers are set, so it may override
/// them. Changes it makes are not reflected in [`HttpRequestSnapshot`].
pub type RequestInterceptor = Arc<dyn Fn(RequestBuilder) -> RequestBuilder + Send + Sync>;

/// One API call, consumed by [`Requestor::send`].
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: Method,
    /// Path below `{base}/{api_version}`, starting with `/`.
    pub path: String,
    /// Query params (GET/HEAD/DELETE) or JSON body (other methods).
    pub params: Value,
    /// Extra headers, overriding the defaults.
    pub headers: Headers,
}

impl RequestDescriptor {
    /// Creates a descriptor without params or headers.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Value::Null,
            headers: Headers::new(),
        }
    }

    /// Sets the params.
    pub fn params(mut self, params: Value) -> Self {
        self.params = params;
        self
    }

    /// Sets all extra headers.
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Adds one extra header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    fn sends_query(&self) -> bool {
        matches!(self.method, Method::GET | Method::HEAD | Method::DELETE)
    }
}

/// A successful response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: Vec<(String, String)>,
    /// JSON body; `null` when empty.
    pub body: Value,
}

/// Sends requests to the HorusPay API.
#[derive(Clone)]
pub struct Requestor {
    config: ClientConfig,
    http_client: Client,
    interceptors: Vec<RequestInterceptor>,
}

impl std::fmt::Debug for Requestor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Requestor")
            .field("config", &self.config)
            .field("http_client", &self.http_client)
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}

impl Requestor {
    /// Creates a requestor with its own HTTP client.
    pub fn new(config: ClientConfig) -> HorusPayResult<Self> {
        let mut builder = Client::builder().danger_accept_invalid_certs(!config.verify_ssl_certs);

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http_client = builder
            .build()
            .map_err(|e| HorusPayError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_http_client(config, http_client))
    }

    /// Creates a requestor sharing an existing HTTP client.
    pub fn with_http_client(config: ClientConfig, http_client: Client) -> Self {
        Self {
            config,
            http_client,
            interceptors: Vec::new(),
        }
    }

    /// Adds a request interceptor.
    pub fn with_interceptor<F>(mut self, interceptor: F) -> Self
    where
        F: Fn(RequestBuilder) -> RequestBuilder + Send + Sync + 'static,
    {
        self.add_interceptor(interceptor);
        self
    }

    /// Adds a request interceptor in place.
    pub fn add_interceptor<F>(&mut self, interceptor: F)
    where
        F: Fn(RequestBuilder) -> RequestBuilder + Send + Sync + 'static,
    {
        self.interceptors.push(Arc::new(interceptor));
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the configuration for modification.
    pub fn config_mut(&mut self) -> &mut ClientConfig {
        &mut self.config
    }

    /// Returns the full URL of `path`.
    pub fn url(&self, path: &str) -> HorusPayResult<String> {
        Ok(format!(
            "{}/{}{}",
            self.config.base_url()?,
            self.config.api_version,
            path
        ))
    }

    /// Returns the headers sent with every request.
    pub fn default_headers(&self) -> Vec<(String, String)> {
        let token = self.config.bearer_token();
        if token.is_none() {
            warn!("no API key or session token configured; sending empty bearer token");
        }

        let mut headers = vec![
            ("X-Version".to_string(), VERSION.to_string()),
            ("X-Source".to_string(), SOURCE.to_string()),
            (
                "Authorization".to_string(),
                format!("Bearer {}", token.unwrap_or_default()),
            ),
        ];

        if let Some(account_id) = self.config.scoped_account_id() {
            headers.push((ACCOUNT_HEADER.to_string(), account_id.to_string()));
        }

        headers
    }

    /// Sends a request built from its parts.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: Value,
        headers: Headers,
    ) -> HorusPayResult<ApiResponse> {
        self.send(
            RequestDescriptor::new(method, path)
                .params(params)
                .headers(headers),
        )
        .await
    }

    /// Sends a request.
    pub async fn send(&self, descriptor: RequestDescriptor) -> HorusPayResult<ApiResponse> {
        let url = self.url(&descriptor.path)?;
        let headers = self.merge_headers(&descriptor.headers)?;

        let mut snapshot = HttpRequestSnapshot {
            method: descriptor.method.to_string(),
            url: url.clone(),
            headers: header_pairs(&headers),
            query: Vec::new(),
            body: None,
        };

        let mut builder = self
            .http_client
            .request(descriptor.method.clone(), &url)
            .headers(headers);

        if descriptor.sends_query() {
            snapshot.query = query_pairs(&descriptor.params);
            if !snapshot.query.is_empty() {
                builder = builder.query(&snapshot.query);
            }
        } else {
            let body = match descriptor.params {
                Value::Null => Value::Object(Default::default()),
                params => params,
            };
            builder = builder.json(&body);
            snapshot.body = Some(body);
        }

        for interceptor in &self.interceptors {
            builder = interceptor(builder);
        }

        debug!(method = %snapshot.method, url = %snapshot.url, "dispatching request");

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(method = %snapshot.method, url = %snapshot.url, error = %err, "request failed");
                return Err(ApiConnectionError {
                    message: format!("Request error: {}", err),
                    http_status: err.status().map(|status| status.as_u16()),
                    http_request: snapshot,
                    http_response: None,
                }
                .into());
            }
        };

        let status = response.status();
        let response_headers = header_pairs(response.headers());

        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => {
                warn!(status = status.as_u16(), error = %err, "failed to read response body");
                return Err(ApiConnectionError {
                    message: format!("Request error: {}", err),
                    http_status: Some(status.as_u16()),
                    http_request: snapshot,
                    http_response: Some(HttpResponseSnapshot {
                        status: status.as_u16(),
                        headers: response_headers,
                        body: Value::Null,
                    }),
                }
                .into());
            }
        };
        let body = parse_body(&text);

        if !status.is_success() {
            warn!(method = %snapshot.method, url = %snapshot.url, status = status.as_u16(), "request rejected");
            return Err(ApiConnectionError {
                message: format!(
                    "Request error: Request failed with status code {}",
                    status.as_u16()
                ),
                http_status: Some(status.as_u16()),
                http_request: snapshot,
                http_response: Some(HttpResponseSnapshot {
                    status: status.as_u16(),
                    headers: response_headers,
                    body,
                }),
            }
            .into());
        }

        debug!(status = status.as_u16(), "received response");

        Ok(ApiResponse {
            status: status.as_u16(),
            headers: response_headers,
            body,
        })
    }

    fn merge_headers(&self, extra: &Headers) -> HorusPayResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        let defaults = self.default_headers();
        let extra = extra.iter().map(|(name, value)| (name.as_str(), value.as_str()));

        for (name, value) in defaults
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .chain(extra)
        {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                HorusPayError::invalid_request(format!("Invalid header name: {}", name))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|_| {
                HorusPayError::invalid_request(format!("Invalid value for header {}", name))
            })?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }
}

fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn requestor_for(server: &mockito::ServerGuard, config: ClientConfig) -> Requestor {
        Requestor::new(config.with_api_base(server.url())).unwrap()
    }

    #[tokio::test]
    async fn test_default_headers_and_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/path")
            .match_query(Matcher::UrlEncoded("foo".into(), "2".into()))
            .match_header("authorization", "Bearer sk_test_123")
            .match_header("x-version", VERSION)
            .match_header("x-source", SOURCE)
            .match_header("x-custom", "foo")
            .match_header("horuspay-account", Matcher::Missing)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok":true}"#)
            .expect(1)
            .create_async()
            .await;

        let requestor = requestor_for(
            &server,
            ClientConfig::new().with_api_key("sk_test_123").with_account_id(898),
        );
        let headers = Headers::from([("X-Custom".to_string(), "foo".to_string())]);
        let response = requestor
            .request(Method::GET, "/path", json!({ "foo": "2" }), headers)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body, json!({ "ok": true }));
    }

    #[tokio::test]
    async fn test_account_header_with_session_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v3/path")
            .match_header("authorization", "Bearer mytoken")
            .match_header("horuspay-account", "898")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let requestor = requestor_for(
            &server,
            ClientConfig::new()
                .with_token("mytoken")
                .with_account_id(898)
                .with_api_version("v3"),
        );
        requestor
            .request(Method::GET, "/path", Value::Null, Headers::new())
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_caller_headers_override_defaults() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/path")
            .match_header("x-source", "my-app")
            .with_status(200)
            .create_async()
            .await;

        let requestor = requestor_for(&server, ClientConfig::new().with_api_key("sk"));
        let response = requestor
            .send(RequestDescriptor::new(Method::GET, "/path").header("x-source", "my-app"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.body, Value::Null);
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/accounts/customers")
            .match_body(Matcher::Json(json!({ "firstname": "Marie" })))
            .with_status(201)
            .with_body(r#"{"v1/customer":{"id":1}}"#)
            .create_async()
            .await;

        let requestor = requestor_for(&server, ClientConfig::new().with_api_key("sk"));
        let response = requestor
            .request(
                Method::POST,
                "/accounts/customers",
                json!({ "firstname": "Marie" }),
                Headers::new(),
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 201);
    }

    #[tokio::test]
    async fn test_error_status_becomes_connection_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/path")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"boom","errors":{"foo":["bad"]}}"#)
            .create_async()
            .await;

        let requestor = requestor_for(&server, ClientConfig::new().with_api_key("sk_test_123"));
        let err = requestor
            .request(
                Method::GET,
                "/path",
                json!({ "foo": "2" }),
                Headers::from([("X-Custom".to_string(), "foo".to_string())]),
            )
            .await
            .unwrap_err();

        let err = err.as_api_connection().unwrap();
        assert_eq!(err.http_status, Some(500));
        assert_eq!(err.http_request.method, "GET");
        assert_eq!(err.http_request.url, format!("{}/v1/path", server.url()));
        assert_eq!(err.http_request.query, vec![("foo".to_string(), "2".to_string())]);
        assert_eq!(err.http_request.header("Authorization"), Some("Bearer sk_test_123"));
        assert_eq!(err.http_request.header("X-Custom"), Some("foo"));
        assert_eq!(err.http_response.as_ref().unwrap().status, 500);
        assert_eq!(err.error_message(), Some("boom"));
        assert!(err.has_errors());
    }

    #[tokio::test]
    async fn test_network_failure_has_no_status() {
        // Nothing listens on port 9 of localhost.
        let requestor = Requestor::new(
            ClientConfig::new()
                .with_api_key("sk")
                .with_api_base("http://127.0.0.1:9")
                .with_timeout_secs(5),
        )
        .unwrap();

        let err = requestor
            .request(Method::GET, "/path", Value::Null, Headers::new())
            .await
            .unwrap_err();

        let err = err.as_api_connection().unwrap();
        assert_eq!(err.http_status, None);
        assert!(err.http_response.is_none());
        assert!(err.message.starts_with("Request error:"));
    }

    #[tokio::test]
    async fn test_invalid_header_is_invalid_request() {
        let requestor = Requestor::new(
            ClientConfig::new()
                .with_api_key("sk")
                .with_api_base("http://127.0.0.1:9"),
        )
        .unwrap();

        let err = requestor
            .send(RequestDescriptor::new(Method::GET, "/path").header("bad header", "x"))
            .await
            .unwrap_err();

        assert!(matches!(err, HorusPayError::InvalidRequest { .. }));
    }

    #[tokio::test]
    async fn test_interceptors_run_on_every_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/accounts/customers")
            .match_header("x-request-id", "req-1")
            .match_header("x-trace", "on")
            .match_header("x-source", "integration-suite")
            .with_status(200)
            .with_body("{}")
            .expect(2)
            .create_async()
            .await;

        let mut requestor = requestor_for(&server, ClientConfig::new().with_api_key("sk"))
            .with_interceptor(|builder| builder.header("X-Request-Id", "req-1"))
            .with_interceptor(|builder| builder.header("X-Trace", "on"));
        requestor.add_interceptor(|mut builder| {
            builder = builder.headers(HeaderMap::from_iter([(
                HeaderName::from_static("x-source"),
                HeaderValue::from_static("integration-suite"),
            )]));
            builder
        });

        for _ in 0..2 {
            requestor
                .request(Method::GET, "/accounts/customers", Value::Null, Headers::new())
                .await
                .unwrap();
        }

        mock.assert_async().await;
    }

    #[test]
    fn test_url_uses_api_version() {
        let requestor = Requestor::new(
            ClientConfig::new()
                .with_api_base("https://test.horuspay.africa")
                .with_api_version("v2"),
        )
        .unwrap();

        assert_eq!(
            requestor.url("/customers").unwrap(),
            "https://test.horuspay.africa/v2/customers"
        );
    }
}
