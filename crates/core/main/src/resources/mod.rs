//! Typed HorusPay resources.
//!
//! Each resource wraps a [`HorusPayObject`] and implements [`ApiResource`](horuspay_core::ApiResource),
//! so CRUD goes through [`ResourceProtocol`](horuspay_core::ResourceProtocol).
//! Endpoints outside the CRUD set are methods taking the [`Requestor`](horuspay_core::Requestor).

use chrono::{DateTime, Utc};
use horuspay_core::HorusPayObject;

/// Declares a resource wrapper with its name, path prefix and common accessors.
macro_rules! api_resource {
    ($(#[$meta:meta])* $ty:ident, $name:literal, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $ty(horuspay_core::HorusPayObject);

        impl horuspay_core::ApiResource for $ty {
            const NAME: &'static str = $name;
            const PATH_PREFIX: &'static str = $prefix;

            fn from_object(object: horuspay_core::HorusPayObject) -> Self {
                Self(object)
            }

            fn object(&self) -> &horuspay_core::HorusPayObject {
                &self.0
            }

            fn object_mut(&mut self) -> &mut horuspay_core::HorusPayObject {
                &mut self.0
            }
        }

        impl $ty {
            /// Server-assigned identifier.
            pub fn id(&self) -> Option<i64> {
                self.0.get_i64("id")
            }

            /// Creation time, if the server sent a valid RFC 3339 timestamp.
            pub fn created_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
                $crate::resources::timestamp(&self.0, "created_at")
            }

            /// Last update time.
            pub fn updated_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
                $crate::resources::timestamp(&self.0, "updated_at")
            }

            /// Sets a field, to be sent on the next save.
            pub fn set(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
                self.0.set(key, value);
            }
        }
    };
}

pub(crate) use api_resource;

mod account;
mod api_key;
mod auth;
mod customer;
mod payout;
mod transaction;
mod webhook;

pub use account::Account;
pub use api_key::ApiKey;
pub use auth::Auth;
pub use customer::Customer;
pub use payout::Payout;
pub use transaction::Transaction;
pub use webhook::WebhookEndpoint;

pub(crate) fn timestamp(object: &HorusPayObject, key: &str) -> Option<DateTime<Utc>> {
    object
        .get_str(key)
        .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
        .map(|value| value.with_timezone(&Utc))
}
