//! Generic CRUD protocol shared by every API resource.
//!
//! A resource only declares its name and path prefix through [`ApiResource`];
//! [`ResourceProtocol`] builds the paths, validates params, dispatches through
//! the [`Requestor`] and unwraps the `"{api_version}/{name}"` envelope.

use std::marker::PhantomData;

use reqwest::Method;
use serde_json::Value;

use crate::error::{HorusPayError, HorusPayResult};
use crate::object::HorusPayObject;
use crate::requestor::{Headers, Requestor};
use crate::util::pluralize;

const PARAMS_HINT: &str = "You must pass an object as the params of HorusPay API method calls. \
     (HINT: an example call to create a customer would be: \
     {\"firstname\": \"toto\", \"lastname\": \"zoro\", \"email\": \"admin@gmail.com\", \"phone\": \"66666666\"})";

/// A typed API resource backed by a [`HorusPayObject`].
pub trait ApiResource: Sized {
    /// Singular resource name, as used in envelope keys (`customer`).
    const NAME: &'static str;

    /// Path prefix placed before the collection (`/accounts`).
    const PATH_PREFIX: &'static str = "";

    /// Wraps an API object.
    fn from_object(object: HorusPayObject) -> Self;

    /// Returns the underlying object.
    fn object(&self) -> &HorusPayObject;

    /// Returns the underlying object for modification.
    fn object_mut(&mut self) -> &mut HorusPayObject;

    /// Returns the plural name used in collection paths and list envelopes.
    fn collection_name() -> String {
        pluralize(Self::NAME)
    }

    /// Returns `"{prefix}/{plural}"`.
    fn collection_path() -> String {
        format!("{}/{}", Self::PATH_PREFIX, Self::collection_name())
    }

    /// Returns `"{collection}/{id}"`, failing on a null or empty id.
    fn item_path(id: impl Into<Value>) -> HorusPayResult<String> {
        let id = id.into();
        let segment = match &id {
            Value::String(s) if !s.is_empty() => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => {
                return Err(HorusPayError::invalid_request(format!(
                    "Could not determine which URL to request: {} instance has invalid ID: {}",
                    Self::NAME,
                    id
                )));
            }
        };

        Ok(format!(
            "{}/{}",
            Self::collection_path(),
            urlencoding::encode(&segment)
        ))
    }

    /// Returns the item path of this instance.
    fn instance_path(&self) -> HorusPayResult<String> {
        Self::item_path(self.object().id().cloned().unwrap_or(Value::Null))
    }
}

/// Result of a list call.
#[derive(Debug, Clone)]
pub enum Listing<R> {
    /// The server returned an array of resources.
    Many(Page<R>),
    /// The server returned a single object.
    One(HorusPayObject),
}

impl<R> Listing<R> {
    /// Returns the page, if the server returned an array.
    pub fn into_page(self) -> Option<Page<R>> {
        match self {
            Self::Many(page) => Some(page),
            Self::One(_) => None,
        }
    }
}

/// A page of resources.
#[derive(Debug, Clone)]
pub struct Page<R> {
    /// Resources in server order.
    pub data: Vec<R>,
    /// Pagination metadata, if the server sent any.
    pub meta: Option<HorusPayObject>,
}

/// Rejects params that are neither null nor a key-value object.
pub fn validate_params(params: &Value) -> HorusPayResult<()> {
    match params {
        Value::Null | Value::Object(_) => Ok(()),
        _ => Err(HorusPayError::invalid_request(PARAMS_HINT)),
    }
}

/// Dispatches a request and converts the envelope into a generic object.
///
/// Used for endpoints outside the CRUD set.
pub async fn static_request(
    requestor: &Requestor,
    method: Method,
    path: &str,
    params: Value,
    headers: Headers,
) -> HorusPayResult<HorusPayObject> {
    let response = requestor.request(method, path, params, headers).await?;
    Ok(HorusPayObject::from_envelope(
        response.body,
        &requestor.config().api_version,
    ))
}

/// CRUD operations of resource `R`.
pub struct ResourceProtocol<'a, R> {
    requestor: &'a Requestor,
    _resource: PhantomData<fn() -> R>,
}

impl<'a, R: ApiResource> ResourceProtocol<'a, R> {
    /// Creates the protocol for `R` over `requestor`.
    pub fn new(requestor: &'a Requestor) -> Self {
        Self {
            requestor,
            _resource: PhantomData,
        }
    }

    /// Lists the collection.
    pub async fn list(&self, params: Value, headers: Headers) -> HorusPayResult<Listing<R>> {
        validate_params(&params)?;

        let response = self
            .requestor
            .request(Method::GET, &R::collection_path(), params, headers)
            .await?;

        if let Value::Array(items) = response.body {
            return Ok(Listing::Many(Page {
                data: items.into_iter().map(to_resource).collect(),
                meta: None,
            }));
        }

        let envelope =
            HorusPayObject::from_envelope(response.body, &self.requestor.config().api_version);

        match envelope.get_objects(&R::collection_name()) {
            Some(items) => Ok(Listing::Many(Page {
                data: items.into_iter().map(R::from_object).collect(),
                meta: envelope.get_object("meta"),
            })),
            None => Ok(Listing::One(envelope)),
        }
    }

    /// Retrieves one resource.
    pub async fn retrieve(
        &self,
        id: impl Into<Value>,
        params: Value,
        headers: Headers,
    ) -> HorusPayResult<R> {
        validate_params(&params)?;
        let path = R::item_path(id)?;
        self.single(Method::GET, &path, params, headers).await
    }

    /// Creates a resource.
    pub async fn create(&self, params: Value, headers: Headers) -> HorusPayResult<R> {
        validate_params(&params)?;
        self.single(Method::POST, &R::collection_path(), params, headers)
            .await
    }

    /// Updates a resource.
    pub async fn update(
        &self,
        id: impl Into<Value>,
        params: Value,
        headers: Headers,
    ) -> HorusPayResult<R> {
        validate_params(&params)?;
        let path = R::item_path(id)?;
        self.single(Method::PUT, &path, params, headers).await
    }

    /// Deletes a resource and returns it unchanged.
    pub async fn delete(&self, resource: R, headers: Headers) -> HorusPayResult<R> {
        let path = resource.instance_path()?;
        self.requestor
            .request(Method::DELETE, &path, Value::Null, headers)
            .await?;
        Ok(resource)
    }

    /// Saves the current fields of `resource` and refreshes it from the response.
    pub async fn save(&self, resource: &mut R, headers: Headers) -> HorusPayResult<()> {
        let path = resource.instance_path()?;
        let params = Value::Object(resource.object().serialize_parameters());

        let object = self.single_object(Method::PUT, &path, params, headers).await?;
        resource.object_mut().refresh_from(Value::Object(object.into_fields()));
        Ok(())
    }

    async fn single(
        &self,
        method: Method,
        path: &str,
        params: Value,
        headers: Headers,
    ) -> HorusPayResult<R> {
        self.single_object(method, path, params, headers)
            .await
            .map(R::from_object)
    }

    async fn single_object(
        &self,
        method: Method,
        path: &str,
        params: Value,
        headers: Headers,
    ) -> HorusPayResult<HorusPayObject> {
        let envelope = static_request(self.requestor, method, path, params, headers).await?;

        envelope.get_object(R::NAME).ok_or_else(|| {
            HorusPayError::invalid_response(format!(
                "Response envelope has no '{}/{}' object",
                self.requestor.config().api_version,
                R::NAME
            ))
        })
    }
}

fn to_resource<R: ApiResource>(value: Value) -> R {
    R::from_object(HorusPayObject::from_value(value))
}
