//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while parsing input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),
}

/// Local, pre-network validation failures.
///
/// The `Display` text is shown to the user verbatim.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Request name is empty or blank.
    #[error("Please enter a request name")]
    MissingName,

    /// Request URL is empty or blank.
    #[error("Please enter a request URL")]
    MissingUrl,

    /// No target collection was chosen.
    #[error("Please select a collection")]
    MissingCollection,

    /// No persisted request identity was given.
    #[error("Please save the request before running it")]
    MissingRequestId,
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
