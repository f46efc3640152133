//! Cache keys scoped by workspace, entity kind and owner identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of cached list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Collections of a workspace.
    Collections,
    /// Requests of a collection.
    Requests,
}

impl EntityKind {
    /// Returns the kind as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Collections => "collections",
            Self::Requests => "requests",
        }
    }
}

/// Identifies one cached list, or a whole namespace when `scope` is `None`.
///
/// `workspace` is `None` only when no workspace is selected.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    /// Workspace the entry belongs to.
    pub workspace: Option<String>,
    /// Entity kind.
    pub kind: EntityKind,
    /// Owner identity (collection id for requests, workspace id for collections).
    pub scope: Option<String>,
}

impl CacheKey {
    /// Request list of one collection.
    #[must_use]
    pub fn requests(workspace: Option<&str>, collection_id: impl Into<String>) -> Self {
        Self {
            workspace: workspace.map(str::to_string),
            kind: EntityKind::Requests,
            scope: Some(collection_id.into()),
        }
    }

    /// Every request list in a workspace.
    #[must_use]
    pub fn all_requests(workspace: Option<&str>) -> Self {
        Self {
            workspace: workspace.map(str::to_string),
            kind: EntityKind::Requests,
            scope: None,
        }
    }

    /// Collection list of a workspace.
    #[must_use]
    pub fn collections(workspace_id: impl Into<String>) -> Self {
        let workspace_id = workspace_id.into();
        Self {
            workspace: Some(workspace_id.clone()),
            kind: EntityKind::Collections,
            scope: Some(workspace_id),
        }
    }

    /// Returns true if this key names a whole namespace.
    #[must_use]
    pub const fn is_namespace(&self) -> bool {
        self.scope.is_none()
    }

    /// Returns true if invalidating `self` must invalidate `other`.
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        self.workspace == other.workspace
            && self.kind == other.kind
            && (self.scope.is_none() || self.scope == other.scope)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let workspace = self.workspace.as_deref().unwrap_or("-");
        match &self.scope {
            Some(scope) => write!(f, "{workspace}/{}/{scope}", self.kind.as_str()),
            None => write!(f, "{workspace}/{}/*", self.kind.as_str()),
        }
    }
}
