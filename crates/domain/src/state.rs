//! Operation state types for UI binding.
//!
//! Every mutation entry point publishes its progress as an
//! [`OperationState`] so the UI can show "Saving..." or a spinner.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The entry point an operation went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Adding a draft to a collection.
    AddToCollection,
    /// Saving an existing request.
    Save,
    /// Running a persisted request.
    Run,
    /// Fetching a collection's request list.
    LoadRequests,
    /// Fetching a workspace's collection list.
    LoadCollections,
}

/// Identifies one operation: its kind and the entity it targets.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OperationKey {
    /// Entry point.
    pub kind: OperationKind,
    /// Target identity (collection id, request id, ...).
    pub target: String,
}

impl OperationKey {
    /// Creates a new key.
    #[must_use]
    pub fn new(kind: OperationKind, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
        }
    }
}

impl fmt::Display for OperationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind, self.target)
    }
}

/// Represents the current state of an operation in the UI.
///
/// - `Idle`: nothing issued yet
/// - `Pending`: collaborator call in flight, show spinner
/// - `Succeeded`: last call completed
/// - `Failed`: last call failed, show message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OperationState {
    /// No operation has been issued yet.
    #[default]
    Idle,

    /// The operation is in progress.
    Pending,

    /// The operation completed successfully.
    Succeeded,

    /// The operation failed.
    Failed {
        /// Human-readable error message.
        message: String,
    },
}

impl OperationState {
    /// Creates a Failed state.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Returns true if the state is Idle.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true if an operation is in progress.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns true if the last operation succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Returns true if the last operation failed.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Returns the failure message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }
}
