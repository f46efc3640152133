//! Session collaborator port.

/// Point-in-time view of the session collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    /// Whether an authenticated session exists.
    pub present: bool,
    /// Whether the session lookup is still in flight.
    pub pending: bool,
}

impl SessionSnapshot {
    /// A resolved, authenticated session.
    #[must_use]
    pub const fn signed_in() -> Self {
        Self {
            present: true,
            pending: false,
        }
    }

    /// A resolved lookup with no session.
    #[must_use]
    pub const fn signed_out() -> Self {
        Self {
            present: false,
            pending: false,
        }
    }

    /// A lookup still in flight.
    #[must_use]
    pub const fn loading() -> Self {
        Self {
            present: false,
            pending: true,
        }
    }
}

/// Port exposing the current session.
pub trait SessionPort: Send + Sync {
    /// Returns the current session state.
    fn snapshot(&self) -> SessionSnapshot;
}
