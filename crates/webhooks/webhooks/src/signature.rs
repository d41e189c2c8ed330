//! HMAC signature generation and signature header parsing.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Scheme identifying HMAC-SHA256 signatures in the webhook header.
pub const EXPECTED_SCHEME: &str = "s";

/// Computes the lowercase hex HMAC-SHA256 of `message` keyed by `secret`.
pub fn compute_signature(message: &str, secret: &str) -> String {
    hmac_hex(secret, &[message.as_bytes()])
}

fn hmac_hex(secret: &str, parts: &[&[u8]]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");

    for part in parts {
        mac.update(part);
    }

    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time byte comparison to prevent timing attacks.
///
/// Only the length check exits early; every byte pair is visited otherwise.
pub fn secure_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

/// Parsed `t=<timestamp>,<scheme>=<signature>` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp the signatures were computed with, if one was found.
    pub timestamp: Option<i64>,
    /// Hex signatures for the requested scheme, in header order.
    pub signatures: Vec<String>,
}

impl SignatureHeader {
    /// Parses a signature header, keeping only entries for `scheme`.
    ///
    /// Unknown keys and elements without `=` are skipped. When several `t`
    /// entries are present the last one wins, and an unparsable last `t`
    /// leaves the header without a timestamp. Missing parts are not errors
    /// here; the receiver rejects them.
    pub fn parse(header: &str, scheme: &str) -> Self {
        let mut parsed = SignatureHeader::default();

        for item in header.split(',') {
            let Some((key, value)) = item.split_once('=') else {
                continue;
            };

            if key == "t" {
                parsed.timestamp = value.parse::<i64>().ok();
            } else if key == scheme {
                parsed.signatures.push(value.to_string());
            }
        }

        parsed
    }

    /// Parses a header received as raw bytes.
    ///
    /// Returns `None` when the bytes are not UTF-8 text.
    pub fn parse_bytes(header: &[u8], scheme: &str) -> Option<Self> {
        std::str::from_utf8(header)
            .ok()
            .map(|header| Self::parse(header, scheme))
    }

    /// Formats the canonical single-signature header.
    pub fn format(timestamp: i64, scheme: &str, signature: &str) -> String {
        format!("t={},{}={}", timestamp, scheme, signature)
    }

    /// Returns true if any signature matches `expected` in constant time.
    pub fn contains_signature(&self, expected: &str) -> bool {
        // No early exit: every candidate is compared.
        self.signatures
            .iter()
            .fold(false, |found, candidate| {
                secure_compare(candidate.as_bytes(), expected.as_bytes()) | found
            })
    }
}

/// Webhook signer for producing signatures and headers.
#[derive(Clone)]
pub struct WebhookSigner {
    secret: String,
    scheme: String,
}

impl WebhookSigner {
    /// Creates a new signer with the given secret and the default scheme.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            scheme: EXPECTED_SCHEME.to_string(),
        }
    }

    /// Uses a different scheme name in generated headers.
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Returns the scheme name used in headers.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Generates a signature over `"{timestamp}.{payload}"`.
    pub fn sign(&self, timestamp: i64, payload: &[u8]) -> String {
        hmac_hex(
            &self.secret,
            &[timestamp.to_string().as_bytes(), b".", payload],
        )
    }

    /// Generates a full signature header value.
    pub fn sign_header(&self, timestamp: i64, payload: &[u8]) -> String {
        let signature = self.sign(timestamp, payload);
        SignatureHeader::format(timestamp, &self.scheme, &signature)
    }
}

impl std::fmt::Debug for WebhookSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookSigner")
            .field("secret", &"<redacted>")
            .field("scheme", &self.scheme)
            .finish()
    }
}
