//! Webhook verification error types.

use thiserror::Error;

/// Result type for webhook verification.
pub type VerificationResult<T> = Result<T, SignatureVerificationError>;

/// Why a webhook delivery was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationFailure {
    /// The header has no usable timestamp or could not be decoded.
    MalformedHeader,
    /// No signature with the expected scheme was present.
    NoSignatures,
    /// None of the signatures matched the payload.
    NoMatchingSignature,
    /// The timestamp is older than the allowed tolerance.
    TimestampOutsideTolerance,
    /// The payload was authentic but not valid JSON.
    InvalidPayload,
}

impl VerificationFailure {
    fn message(&self) -> &'static str {
        match self {
            Self::MalformedHeader => "Unable to extract timestamp and signatures from header",
            Self::NoSignatures => "No signatures found with expected scheme",
            Self::NoMatchingSignature => {
                "No signatures found matching the expected signature for payload. \
                 Are you passing the raw request body you received from HorusPay?"
            }
            Self::TimestampOutsideTolerance => "Timestamp outside the tolerance zone",
            Self::InvalidPayload => "Webhook payload is not valid JSON",
        }
    }
}

/// A webhook could not be authenticated.
///
/// Carries the offending header and payload so callers can log them.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct SignatureVerificationError {
    /// Failure category.
    pub reason: VerificationFailure,
    /// Human-readable message.
    pub message: String,
    /// The signature header as received.
    pub header: String,
    /// The payload as received.
    pub payload: String,
}

impl SignatureVerificationError {
    /// Creates an error with the default message for `reason`.
    pub fn new(
        reason: VerificationFailure,
        header: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            reason,
            message: reason.message().to_string(),
            header: header.into(),
            payload: payload.into(),
        }
    }

    /// Replaces the message, keeping the reason.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SignatureVerificationError::new(VerificationFailure::NoSignatures, "t=1", "{}");
        assert_eq!(err.to_string(), "No signatures found with expected scheme");
        assert_eq!(err.header, "t=1");
        assert_eq!(err.payload, "{}");
    }
}
