//! # HorusPay CLI
//!
//! Helpers behind the `horuspay` binary: signing and verifying webhook
//! payloads locally, and sending authenticated GET requests to the API.

use std::path::Path;

use horuspay::core::requestor::Headers;
use horuspay::webhooks::{TestHeaderOptions, WebhookReceiver, generate_test_header};
use horuspay::{ClientConfig, HorusPayResult, Requestor};
use reqwest::Method;
use serde_json::Value;
use tracing::info;

/// Builds a signature header for `payload`, as HorusPay would send it.
pub fn sign(payload: &str, secret: &str, timestamp: Option<i64>, scheme: Option<&str>) -> String {
    let mut options = TestHeaderOptions::new(payload, secret);
    if let Some(timestamp) = timestamp {
        options = options.timestamp(timestamp);
    }
    if let Some(scheme) = scheme {
        options = options.scheme(scheme);
    }

    generate_test_header(&options)
}

/// Verifies a delivery and returns the event body.
pub fn verify(
    payload: &str,
    header: &str,
    secret: &str,
    tolerance: Option<i64>,
    scheme: Option<&str>,
) -> horuspay::Result<Value> {
    let mut receiver = WebhookReceiver::new(secret);
    if let Some(tolerance) = tolerance {
        receiver = receiver.with_tolerance(tolerance);
    }
    if let Some(scheme) = scheme {
        receiver = receiver.with_scheme(scheme);
    }

    let event = receiver.verify(payload, header)?;
    info!(event_type = ?event.get("type"), "webhook signature verified");
    Ok(event)
}

/// Loads the client configuration from a TOML file, or from the environment.
pub fn load_config(path: Option<&Path>) -> HorusPayResult<ClientConfig> {
    match path {
        Some(path) => ClientConfig::from_file(path),
        None => ClientConfig::from_env(),
    }
}

/// Sends a GET request to `path` and returns the raw JSON body.
pub async fn get(config: ClientConfig, path: &str) -> HorusPayResult<Value> {
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };

    let requestor = Requestor::new(config)?;
    let response = requestor
        .request(Method::GET, &path, Value::Null, Headers::new())
        .await?;

    Ok(response.body)
}
