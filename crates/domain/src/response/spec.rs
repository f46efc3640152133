//! Execution result specification
//!
//! Contains the raw result handed back by the execution collaborator and
//! the canonical form shown in the response viewer, including status
//! codes, headers, body, and timing information.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::field::FieldValue;

/// HTTP status code with semantic helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Creates a new `StatusCode`.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns true if this is a 2xx success status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Returns true if this is a 3xx redirection status.
    #[must_use]
    pub const fn is_redirection(&self) -> bool {
        self.0 >= 300 && self.0 < 400
    }

    /// Returns true if this is a 4xx client error status.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }

    /// Returns true if this is a 5xx server error status.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.0 >= 500 && self.0 < 600
    }

    /// Returns the canonical reason phrase for common status codes.
    #[must_use]
    pub const fn reason_phrase(&self) -> &'static str {
        match self.0 {
            0 => "No Response",
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            304 => "Not Modified",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            409 => "Conflict",
            422 => "Unprocessable Entity",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "Unknown",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0, self.reason_phrase())
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// How the target endpoint answered a delivered run.
///
/// Every variant is a successful pipeline run; only an unreachable
/// execution collaborator is a pipeline error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseOutcome {
    /// The target never answered (DNS, refused, timeout). Status 0.
    NoResponse,
    /// 2xx.
    Success,
    /// 1xx or 3xx.
    Redirect,
    /// 4xx.
    ClientError,
    /// 5xx.
    ServerError,
}

impl From<StatusCode> for ResponseOutcome {
    fn from(status: StatusCode) -> Self {
        match status.as_u16() {
            0 => Self::NoResponse,
            200..=299 => Self::Success,
            400..=499 => Self::ClientError,
            500..=599 => Self::ServerError,
            _ => Self::Redirect,
        }
    }
}

/// A run result as handed back by the execution collaborator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionPayload {
    /// Identity of the run, if the collaborator assigned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// HTTP status returned by the target.
    #[serde(default, alias = "status")]
    pub status_code: u16,

    /// Reason phrase, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,

    /// Response headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<FieldValue>,

    /// Response body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<FieldValue>,

    /// Round-trip time in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,

    /// Any other fields, preserved as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ExecutionPayload {
    /// Creates a payload carrying only a status code.
    #[must_use]
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            ..Self::default()
        }
    }

    /// Sets the run identity.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the status text.
    #[must_use]
    pub fn with_status_text(mut self, text: impl Into<String>) -> Self {
        self.status_text = Some(text.into());
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

    /// Sets the measured duration.
    #[must_use]
    pub const fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

/// A run result in canonical form, as shown in the response viewer.
///
/// Transient: every new run replaces the previous one wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    /// Identity of the run; empty when the collaborator assigned none.
    pub id: String,

    /// HTTP status returned by the target.
    pub status_code: StatusCode,

    /// Reason phrase; absent stays absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,

    /// Response headers as text.
    pub headers: String,

    /// Response body as text.
    pub body: String,

    /// Round-trip time in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,

    /// Unmodelled fields carried through from the payload.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ExecutionResult {
    /// Classifies the target's answer.
    #[must_use]
    pub fn outcome(&self) -> ResponseOutcome {
        ResponseOutcome::from(self.status_code)
    }

    /// Status text for display, empty when absent.
    #[must_use]
    pub fn status_text_or_empty(&self) -> &str {
        self.status_text.as_deref().unwrap_or_default()
    }

    /// Returns a human-readable duration string (e.g., "124 ms").
    #[must_use]
    pub fn duration_display(&self) -> Option<String> {
        self.duration_ms.map(|millis| {
            if millis < 1000 {
                format!("{millis} ms")
            } else {
                #[allow(clippy::cast_precision_loss)]
                let secs = millis as f64 / 1000.0;
                format!("{secs:.2} s")
            }
        })
    }

    /// Attempts to parse the body as JSON.
    #[must_use]
    pub fn body_as_json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

impl From<ExecutionResult> for ExecutionPayload {
    fn from(result: ExecutionResult) -> Self {
        Self {
            id: Some(result.id),
            status_code: result.status_code.as_u16(),
            status_text: result.status_text,
            headers: Some(FieldValue::Text(result.headers)),
            body: Some(FieldValue::Text(result.body)),
            duration_ms: result.duration_ms,
            extra: result.extra,
        }
    }
}
