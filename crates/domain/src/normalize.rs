//! Normalization of heterogeneous payloads into canonical text form.
//!
//! Every ingestion path (save, add, list, run) goes through these two
//! functions before anything reaches a tab or the response viewer. Both
//! borrow their input, return a new value, and are idempotent.

use crate::field::field_text;
use crate::request::{RequestPayload, SavedRequest};
use crate::response::{ExecutionPayload, ExecutionResult, StatusCode};

/// Normalizes a persisted request payload.
///
/// `headers`, `body`, `parameters` and `response` become text; absent or
/// null values become `"{}"`. Every other field is copied verbatim.
#[must_use]
pub fn normalize_request(payload: &RequestPayload) -> SavedRequest {
    SavedRequest {
        id: payload.id.clone(),
        name: payload.name.clone(),
        method: payload.method,
        url: payload.url.clone(),
        collection_id: payload.collection_id.clone(),
        headers: field_text(payload.headers.as_ref()),
        body: field_text(payload.body.as_ref()),
        parameters: field_text(payload.parameters.as_ref()),
        response: field_text(payload.response.as_ref()),
        extra: payload.extra.clone(),
    }
}

/// Normalizes an execution payload.
///
/// `headers` and `body` become text, a missing run identity becomes the
/// empty string and a missing status text stays absent.
#[must_use]
pub fn normalize_execution(payload: &ExecutionPayload) -> ExecutionResult {
    ExecutionResult {
        id: payload.id.clone().unwrap_or_default(),
        status_code: StatusCode::new(payload.status_code),
        status_text: payload.status_text.clone(),
        headers: field_text(payload.headers.as_ref()),
        body: field_text(payload.body.as_ref()),
        duration_ms: payload.duration_ms,
        extra: payload.extra.clone(),
    }
}
