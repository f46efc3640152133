//! Request types: HTTP method, raw payloads, normalized saved requests
//! and editable drafts.

mod draft;
mod method;
mod payload;

pub use draft::RequestDraft;
pub use method::HttpMethod;
pub use payload::{RequestPayload, SavedRequest};
