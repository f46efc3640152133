//! Editable request draft sent to the persistence collaborator.

use serde::{Deserialize, Serialize};

use super::HttpMethod;
use crate::error::ValidationError;
use crate::field::EMPTY_OBJECT;

/// The fields a tab submits when it saves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDraft {
    /// Request name.
    pub name: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Target URL.
    pub url: String,
    /// Headers as text.
    pub headers: String,
    /// Body as text.
    pub body: String,
    /// Query parameters as text.
    pub parameters: String,
}

impl RequestDraft {
    /// Creates a draft with empty-object headers, body and parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method,
            url: url.into(),
            headers: EMPTY_OBJECT.to_string(),
            body: EMPTY_OBJECT.to_string(),
            parameters: EMPTY_OBJECT.to_string(),
        }
    }

    /// Returns a copy with name and URL trimmed.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            url: self.url.trim().to_string(),
            ..self.clone()
        }
    }

    /// Checks the fields every save needs.
    ///
    /// # Errors
    ///
    /// Returns the first missing field, name before URL.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.url.trim().is_empty() {
            return Err(ValidationError::MissingUrl);
        }
        Ok(())
    }
}
