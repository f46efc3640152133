//! JSON encoding for backend traffic and CLI output.

mod json;

pub use json::*;
