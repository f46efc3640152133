//! Workspaces and collections.

use serde::{Deserialize, Serialize};

/// Top-level scope containing collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl Workspace {
    /// Creates a new workspace reference.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Named group of persisted requests inside one workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// Unique identifier.
    pub id: String,
    /// Owning workspace.
    pub workspace_id: String,
    /// User-editable name.
    pub name: String,
}

impl Collection {
    /// Creates a new collection reference.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        workspace_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            workspace_id: workspace_id.into(),
            name: name.into(),
        }
    }

    /// Case-insensitive substring match on the name.
    #[must_use]
    pub fn name_matches(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
    }
}
