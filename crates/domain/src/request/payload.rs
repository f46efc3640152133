//! Persisted request shapes.
//!
//! [`RequestPayload`] is what the persistence collaborator hands back: the
//! four serialized fields may be text or structured. [`SavedRequest`] is the
//! canonical in-memory shape where all four are guaranteed to be text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::HttpMethod;
use crate::field::FieldValue;

/// A persisted request as produced by an upstream layer.
///
/// Fields the playground does not model (timestamps, owner ids, ...) are
/// kept in `extra` so they survive normalization verbatim.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPayload {
    /// Persisted identity.
    #[serde(default)]
    pub id: String,

    /// Human-readable request name.
    #[serde(default)]
    pub name: String,

    /// HTTP method.
    #[serde(default)]
    pub method: HttpMethod,

    /// Target URL.
    #[serde(default)]
    pub url: String,

    /// Owning collection, absent for unsaved requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,

    /// Request headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<FieldValue>,

    /// Request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<FieldValue>,

    /// Query parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<FieldValue>,

    /// Last known response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<FieldValue>,

    /// Any other fields, preserved as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl RequestPayload {
    /// Creates a payload with required fields and every optional field absent.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        method: HttpMethod,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            method,
            url: url.into(),
            ..Self::default()
        }
    }

    /// Sets the owning collection.
    #[must_use]
    pub fn in_collection(mut self, collection_id: impl Into<String>) -> Self {
        self.collection_id = Some(collection_id.into());
        self
    }

    /// Sets the headers field.
    #[must_use]
    pub fn with_headers(mut self, headers: impl Into<FieldValue>) -> Self {
        self.headers = Some(headers.into());
        self
    }

    /// Sets the body field.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<FieldValue>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the parameters field.
    #[must_use]
    pub fn with_parameters(mut self, parameters: impl Into<FieldValue>) -> Self {
        self.parameters = Some(parameters.into());
        self
    }

    /// Sets the response field.
    #[must_use]
    pub fn with_response(mut self, response: impl Into<FieldValue>) -> Self {
        self.response = Some(response.into());
        self
    }

    /// Adds an unmodelled field.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// A persisted request in canonical form.
///
/// Built only by [`crate::normalize_request`] or deserialized from an
/// already-canonical source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRequest {
    /// Persisted identity.
    pub id: String,

    /// Human-readable request name.
    pub name: String,

    /// HTTP method.
    pub method: HttpMethod,

    /// Target URL.
    pub url: String,

    /// Owning collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,

    /// Request headers as text.
    pub headers: String,

    /// Request body as text.
    pub body: String,

    /// Query parameters as text.
    pub parameters: String,

    /// Last known response as text.
    pub response: String,

    /// Unmodelled fields carried through from the payload.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl From<SavedRequest> for RequestPayload {
    fn from(saved: SavedRequest) -> Self {
        Self {
            id: saved.id,
            name: saved.name,
            method: saved.method,
            url: saved.url,
            collection_id: saved.collection_id,
            headers: Some(FieldValue::Text(saved.headers)),
            body: Some(FieldValue::Text(saved.body)),
            parameters: Some(FieldValue::Text(saved.parameters)),
            response: Some(FieldValue::Text(saved.response)),
            extra: saved.extra,
        }
    }
}
