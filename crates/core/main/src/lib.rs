//! # HorusPay
//!
//! Rust client for the HorusPay payments API.
//!
//! The client dispatches authenticated requests to the HorusPay REST API and
//! exposes typed resources on top of them. Webhook deliveries are verified
//! with [`webhooks::WebhookReceiver`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use horuspay::prelude::*;
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), horuspay::Error> {
//! let client = HorusPayClient::with_api_key("sk_sandbox_...")?;
//!
//! let transaction = client
//!     .transactions()
//!     .create(
//!         json!({ "description": "Order #42", "amount": 2500, "currency": { "iso": "XOF" } }),
//!         Headers::new(),
//!     )
//!     .await?;
//!
//! let token = transaction
//!     .generate_token(client.requestor(), json!({}), Headers::new())
//!     .await?;
//! println!("{:?}", token.get_str("token"));
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
pub mod resources;

pub use client::HorusPayClient;
pub use error::{Error, Result};

pub use horuspay_core as core;
pub use horuspay_core::{
    ApiConnectionError, ApiResource, ClientConfig, Environment, Headers, HorusPayError,
    HorusPayObject, HorusPayResult, Listing, ObjectKind, Page, Requestor, ResourceProtocol,
};
pub use horuspay_webhooks as webhooks;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::resources::{
        Account, ApiKey, Auth, Customer, Payout, Transaction, WebhookEndpoint,
    };
    pub use crate::{Error, HorusPayClient};
    pub use horuspay_core::{
        ApiResource, ClientConfig, Environment, Headers, HorusPayError, HorusPayObject, Listing,
        ObjectKind,
    };
    pub use horuspay_webhooks::{SignatureVerificationError, WebhookReceiver};
}
