//! Webhook receiver for verifying incoming webhooks.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{SignatureVerificationError, VerificationFailure, VerificationResult};
use crate::signature::{EXPECTED_SCHEME, SignatureHeader, WebhookSigner};

/// Default timestamp tolerance in seconds (5 minutes).
pub const DEFAULT_TOLERANCE: i64 = 300;

/// Webhook receiver for verifying incoming webhooks.
#[derive(Debug, Clone)]
pub struct WebhookReceiver {
    signer: WebhookSigner,
    /// Tolerance for timestamp validation (in seconds). Zero or less disables it.
    tolerance_secs: i64,
}

impl WebhookReceiver {
    /// Creates a new webhook receiver.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            signer: WebhookSigner::new(secret),
            tolerance_secs: DEFAULT_TOLERANCE,
        }
    }

    /// Sets the timestamp tolerance.
    pub fn with_tolerance(mut self, tolerance_secs: i64) -> Self {
        self.tolerance_secs = tolerance_secs;
        self
    }

    /// Accepts signatures under a scheme other than `s`.
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.signer = self.signer.with_scheme(scheme);
        self
    }

    /// Returns the timestamp tolerance in seconds.
    pub fn tolerance(&self) -> i64 {
        self.tolerance_secs
    }

    /// Verifies a webhook signature and parses the payload as JSON.
    pub fn verify(
        &self,
        payload: impl AsRef<[u8]>,
        header: impl AsRef<[u8]>,
    ) -> VerificationResult<Value> {
        self.verify_at(payload, header, chrono::Utc::now().timestamp())
    }

    /// Verifies a webhook and deserializes the payload into `T`.
    pub fn verify_event<T: DeserializeOwned>(
        &self,
        payload: impl AsRef<[u8]>,
        header: impl AsRef<[u8]>,
    ) -> VerificationResult<T> {
        let payload = payload.as_ref();
        let header = header.as_ref();
        let now = chrono::Utc::now().timestamp();

        self.verify_signature_at(payload, header, now)?;
        serde_json::from_slice(payload).map_err(|e| invalid_payload(header, payload, e))
    }

    /// Same as [`verify`](Self::verify) with an explicit current time.
    pub fn verify_at(
        &self,
        payload: impl AsRef<[u8]>,
        header: impl AsRef<[u8]>,
        now: i64,
    ) -> VerificationResult<Value> {
        let payload = payload.as_ref();
        let header = header.as_ref();

        self.verify_signature_at(payload, header, now)?;
        serde_json::from_slice(payload).map_err(|e| invalid_payload(header, payload, e))
    }

    /// Verifies only the signature and timestamp, without parsing.
    pub fn verify_signature_at(
        &self,
        payload: &[u8],
        header: &[u8],
        now: i64,
    ) -> VerificationResult<()> {
        let reject = |reason: VerificationFailure| {
            debug!(?reason, "webhook signature rejected");
            SignatureVerificationError::new(
                reason,
                String::from_utf8_lossy(header),
                String::from_utf8_lossy(payload),
            )
        };

        let details = SignatureHeader::parse_bytes(header, self.signer.scheme())
            .ok_or_else(|| reject(VerificationFailure::MalformedHeader))?;

        let Some(timestamp) = details.timestamp else {
            return Err(reject(VerificationFailure::MalformedHeader));
        };

        if details.signatures.is_empty() {
            return Err(reject(VerificationFailure::NoSignatures));
        }

        let expected = self.signer.sign(timestamp, payload);
        if !details.contains_signature(&expected) {
            return Err(reject(VerificationFailure::NoMatchingSignature));
        }

        // Saturates to i64::MAX for timestamps far in the past, which is always stale
        let age = now.saturating_sub(timestamp);
        if self.tolerance_secs > 0 && age > self.tolerance_secs {
            return Err(reject(VerificationFailure::TimestampOutsideTolerance));
        }

        Ok(())
    }
}

fn invalid_payload(header: &[u8], payload: &[u8], err: serde_json::Error) -> SignatureVerificationError {
    debug!(error = %err, "verified webhook payload is not JSON");
    SignatureVerificationError::new(
        VerificationFailure::InvalidPayload,
        String::from_utf8_lossy(header),
        String::from_utf8_lossy(payload),
    )
    .with_message(format!("Webhook payload is not valid JSON: {}", err))
}

/// Verifies a webhook delivery and returns the parsed event body.
///
/// `tolerance` defaults to [`DEFAULT_TOLERANCE`]; pass `Some(0)` to skip the
/// staleness check.
pub fn construct_event(
    payload: impl AsRef<[u8]>,
    header: impl AsRef<[u8]>,
    secret: &str,
    tolerance: Option<i64>,
) -> VerificationResult<Value> {
    WebhookReceiver::new(secret)
        .with_tolerance(tolerance.unwrap_or(DEFAULT_TOLERANCE))
        .verify(payload, header)
}

/// Options for [`generate_test_header`].
#[derive(Debug, Clone)]
pub struct TestHeaderOptions {
    payload: String,
    secret: String,
    timestamp: Option<i64>,
    scheme: Option<String>,
    signature: Option<String>,
}

impl TestHeaderOptions {
    /// Creates options for signing `payload` with `secret`.
    pub fn new(payload: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            secret: secret.into(),
            timestamp: None,
            scheme: None,
            signature: None,
        }
    }

    /// Sets the timestamp (defaults to now).
    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Sets the scheme (defaults to `s`).
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Uses a fixed signature instead of computing one.
    pub fn signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }
}

/// Generates a signature header for mocking webhook deliveries.
pub fn generate_test_header(options: &TestHeaderOptions) -> String {
    let timestamp = options
        .timestamp
        .unwrap_or_else(|| chrono::Utc::now().timestamp());
    let scheme = options.scheme.as_deref().unwrap_or(EXPECTED_SCHEME);

    let signature = match &options.signature {
        Some(signature) => signature.clone(),
        None => WebhookSigner::new(options.secret.as_str()).sign(timestamp, options.payload.as_bytes()),
    };

    SignatureHeader::format(timestamp, scheme, &signature)
}
