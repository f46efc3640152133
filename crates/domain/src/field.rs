//! Field values that may arrive as text or as structured JSON.
//!
//! Persisted requests store `headers`, `body`, `parameters` and `response`
//! as serialized text, but upstream layers hand them over either way.
//! [`FieldValue`] makes the two shapes an explicit tagged union.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical text for an absent or null structured field.
pub const EMPTY_OBJECT: &str = "{}";

/// A field value in either of its two wire shapes.
///
/// Deserialization is untagged: a JSON string becomes `Text`, anything
/// else (object, array, number, bool, null) becomes `Structured`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Already serialized text.
    Text(String),
    /// Structured data that still needs serializing.
    Structured(Value),
}

impl FieldValue {
    /// Creates a text value.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Creates a structured value.
    #[must_use]
    pub const fn structured(value: Value) -> Self {
        Self::Structured(value)
    }

    /// Converts the value to its canonical text form.
    ///
    /// Text passes through unchanged; structured values are serialized
    /// compactly, with `null` serialized as `{}`.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Structured(Value::Null) => EMPTY_OBJECT.to_string(),
            Self::Structured(value) => value.to_string(),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::Structured(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Canonical text for an optional field; absent counts as `{}`.
#[must_use]
pub fn field_text(value: Option<&FieldValue>) -> String {
    value.map_or_else(|| EMPTY_OBJECT.to_string(), FieldValue::to_text)
}
