//! Application error types

use relay_domain::ValidationError;
use thiserror::Error;

/// Rejection from the persistence or execution collaborator.
///
/// The variants stay distinguishable for logging, but the gateway treats
/// all of them as "save failed".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    /// The collection or request does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A constraint was violated (e.g. duplicate name).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The collaborator itself could not be reached.
    #[error("collaborator unreachable: {0}")]
    Unreachable(String),

    /// Any other rejection.
    #[error("rejected: {0}")]
    Rejected(String),
}

/// Failure of an add-to-collection or save call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// A required field was empty; no network call was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The persistence collaborator rejected the call.
    #[error("save failed: {0}")]
    Collaborator(#[from] CollaboratorError),
}

/// Failure of a run.
///
/// A non-2xx answer from the target is not an error; it arrives as a
/// normal [`relay_domain::ExecutionResult`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// No persisted request identity was given.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The execution collaborator rejected the call or could not be reached.
    #[error("run failed: {0}")]
    Collaborator(#[from] CollaboratorError),
}

impl ExecutionError {
    /// Returns true if the execution collaborator could not be reached.
    #[must_use]
    pub const fn is_unreachable(&self) -> bool {
        matches!(self, Self::Collaborator(CollaboratorError::Unreachable(_)))
    }
}
