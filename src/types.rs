//! Type definitions for the REST-to-GraphQL gateway

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// GraphQL request sent upstream
///
/// `variables` is omitted from the serialized body when no variable was bound,
/// rather than being sent as `null`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GraphQLRequest {
    /// GraphQL document
    pub query: String,

    /// Variables for the document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Map<String, Value>>,
}

impl GraphQLRequest {
    /// Create a request without variables
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
        }
    }

    /// Bind a variable (builder pattern)
    pub fn variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables
            .get_or_insert_with(Map::new)
            .insert(name.into(), value.into());
        self
    }

    /// Name of the first operation declared in the document, if any.
    pub fn operation_name(&self) -> Option<&str> {
        let rest = self
            .query
            .trim_start()
            .strip_prefix("query")
            .or_else(|| self.query.trim_start().strip_prefix("mutation"))?;
        let name = rest
            .trim_start()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .next()?;
        (!name.is_empty()).then_some(name)
    }
}

/// JSON error envelope returned by the facade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    /// Envelope with only an `error` message
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    /// Attach `details` (builder pattern)
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Response of `POST /cart/create`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartCreated {
    pub cart_id: String,
}

/// Response of `POST /checkout/start`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutStarted {
    pub success: bool,
    pub cart_id: Value,
    pub redirect_url: String,
}

/// Loosely-typed JSON request body.
///
/// Anything that is not a JSON object (including an empty body) reads as an
/// object with no fields, so absent input surfaces as a missing-field error.
#[derive(Debug, Clone, Default)]
pub struct RequestBody(Map<String, Value>);

impl RequestBody {
    /// Parse a raw body, falling back to an empty object
    pub fn from_slice(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => Self(map),
            _ => Self::default(),
        }
    }

    /// Field value, treating blank values as absent
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field).filter(|value| !is_blank(value))
    }

    /// Required field, or [`Error::MissingField`]
    pub fn require(&self, field: &'static str) -> Result<Value> {
        self.get(field).cloned().ok_or(Error::MissingField(field))
    }
}

/// `null`, `""`, `[]` and `{}` count as not supplied.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

/// Render a JSON scalar the way it should appear inside a URL or header.
pub fn value_to_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}
