use horuspay_core::HorusPayError;
use horuspay_webhooks::SignatureVerificationError;

/// Any error raised by the HorusPay client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration, dispatch or response error.
    #[error(transparent)]
    Api(#[from] HorusPayError),

    /// Webhook signature verification failed.
    #[error(transparent)]
    Signature(#[from] SignatureVerificationError),
}

impl Error {
    /// HTTP status of a failed API call, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Api(err) => err.http_status(),
            Self::Signature(_) => None,
        }
    }
}

/// Result type alias for facade operations.
pub type Result<T> = std::result::Result<T, Error>;
