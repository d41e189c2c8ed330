//! Untyped API objects and the `klass` registry.
//!
//! Every object returned by the API carries a `"klass"` tag such as
//! `"v1/customer"`. [`ObjectKind::from_tag`] maps the tag onto a known
//! resource; unknown or missing tags become [`ObjectKind::Generic`] so that
//! types added server-side still deserialize.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::util::strip_api_version;

/// Resource type of an API object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ObjectKind {
    Account,
    ApiKey,
    Blog,
    Category,
    Continent,
    Country,
    Currency,
    Customer,
    EventDefinition,
    FeeSetting,
    PaymentMethodOption,
    Payout,
    PayoutRequest,
    Permission,
    Role,
    Transaction,
    User,
    Webhook,
    /// Untagged or unknown object.
    #[default]
    Generic,
}

impl ObjectKind {
    /// Resolves a `klass` tag, with or without its version qualifier.
    pub fn from_tag(tag: &str) -> Self {
        let name = tag.rsplit_once('/').map_or(tag, |(_, name)| name);
        Self::from_name(name)
    }

    /// Resolves a bare resource name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "account" => Self::Account,
            "api_key" => Self::ApiKey,
            "blog" => Self::Blog,
            "category" => Self::Category,
            "continent" => Self::Continent,
            "country" => Self::Country,
            "currency" => Self::Currency,
            "customer" => Self::Customer,
            "event_definition" => Self::EventDefinition,
            "fee_setting" => Self::FeeSetting,
            "payment_method_option" => Self::PaymentMethodOption,
            "payout" => Self::Payout,
            "payout_request" => Self::PayoutRequest,
            "permission" => Self::Permission,
            "role" => Self::Role,
            "transaction" => Self::Transaction,
            "user" => Self::User,
            "webhook" => Self::Webhook,
            _ => Self::Generic,
        }
    }
}

/// An API object: its resolved kind plus the raw JSON fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HorusPayObject {
    #[serde(skip)]
    kind: ObjectKind,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl HorusPayObject {
    /// Creates an empty object of the given kind.
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            fields: Map::new(),
        }
    }

    /// Converts a JSON object, resolving its kind from `"klass"`.
    ///
    /// Non-object values become an empty generic object.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self::from_fields(fields),
            _ => Self::default(),
        }
    }

    /// Converts a field map, resolving its kind from `"klass"`.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        let kind = fields
            .get("klass")
            .and_then(Value::as_str)
            .map_or(ObjectKind::Generic, ObjectKind::from_tag);

        Self { kind, fields }
    }

    /// Converts a server envelope, stripping `"{api_version}/"` from its keys.
    pub fn from_envelope(body: Value, api_version: &str) -> Self {
        match body {
            Value::Object(map) => {
                let fields = map
                    .into_iter()
                    .map(|(key, value)| (strip_api_version(&key, api_version).to_string(), value))
                    .collect();
                Self::from_fields(fields)
            }
            _ => Self::default(),
        }
    }

    /// Returns the resolved kind.
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Returns all fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consumes the object and returns its fields.
    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// Returns the `id` field, if present and not null.
    pub fn id(&self) -> Option<&Value> {
        self.get("id").filter(|id| !id.is_null())
    }

    /// Gets a raw field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Gets a string field.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Gets an integer field.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    /// Gets a numeric field, accepting numbers sent as strings.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Gets a boolean field.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Converts a nested object field.
    pub fn get_object(&self, key: &str) -> Option<HorusPayObject> {
        match self.get(key)? {
            Value::Object(map) => Some(Self::from_fields(map.clone())),
            _ => None,
        }
    }

    /// Converts a nested array field, element by element.
    pub fn get_objects(&self, key: &str) -> Option<Vec<HorusPayObject>> {
        match self.get(key)? {
            Value::Array(items) => Some(items.iter().cloned().map(Self::from_value).collect()),
            _ => None,
        }
    }

    /// Sets a field.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Replaces all fields with those of `value` and re-resolves the kind.
    pub fn refresh_from(&mut self, value: Value) {
        *self = Self::from_value(value);
    }

    /// Returns the fields sent when saving: everything but `id` and `klass`.
    pub fn serialize_parameters(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "id" | "klass"))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}
