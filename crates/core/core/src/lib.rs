//! # HorusPay Core
//!
//! Client configuration, the HTTP request dispatcher and the generic resource
//! protocol that typed HorusPay resources are built on.
//!
//! Every request is sent to `{base}/{api_version}{path}` with the library
//! headers attached, and every JSON response is unwrapped from its
//! `"{api_version}/{name}"` envelope into a [`HorusPayObject`].

pub mod config;
pub mod error;
pub mod object;
pub mod requestor;
pub mod resource;
pub mod util;

pub use config::{ClientConfig, Environment};
pub use error::{
    ApiConnectionError, HorusPayError, HorusPayResult, HttpRequestSnapshot, HttpResponseSnapshot,
};
pub use object::{HorusPayObject, ObjectKind};
pub use requestor::{ApiResponse, Headers, RequestDescriptor, RequestInterceptor, Requestor};
pub use resource::{ApiResource, Listing, Page, ResourceProtocol, static_request, validate_params};
