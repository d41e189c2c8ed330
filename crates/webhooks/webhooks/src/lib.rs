//! # HorusPay Webhooks
//!
//! Authentication of webhook deliveries sent by HorusPay:
//! - HMAC-SHA256 signing of `"{timestamp}.{payload}"`
//! - Parsing and formatting of `t=<timestamp>,s=<signature>` headers
//! - Constant-time signature comparison
//! - Timestamp tolerance against replayed deliveries
//!
//! ## Example
//!
//! ```rust
//! use horuspay_webhooks::{generate_test_header, TestHeaderOptions, WebhookReceiver};
//!
//! let payload = r#"{"id":"evt_1","type":"payout.transferred"}"#;
//! let header = generate_test_header(&TestHeaderOptions::new(payload, "whsec_123"));
//!
//! let receiver = WebhookReceiver::new("whsec_123");
//! let event = receiver.verify(payload, &header).unwrap();
//! assert_eq!(event["type"], "payout.transferred");
//! ```

mod error;
mod receiver;
mod signature;

pub use error::{SignatureVerificationError, VerificationFailure, VerificationResult};
pub use receiver::{
    DEFAULT_TOLERANCE, TestHeaderOptions, WebhookReceiver, construct_event, generate_test_header,
};
pub use signature::{
    EXPECTED_SCHEME, SignatureHeader, WebhookSigner, compute_signature, secure_compare,
};
