//! Session gate in front of the playground.

use crate::ports::{SessionPort, SessionSnapshot};

/// What the playground may show for a session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The lookup is in flight; show a loading state.
    Loading,
    /// No session; send the user to sign-in.
    RedirectToSignIn,
    /// Signed in; render the playground.
    Ready,
}

/// Maps session state to [`Access`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionGate;

impl SessionGate {
    /// Evaluates a snapshot. A pending lookup always reads as `Loading`.
    #[must_use]
    pub const fn evaluate(snapshot: SessionSnapshot) -> Access {
        if snapshot.pending {
            Access::Loading
        } else if snapshot.present {
            Access::Ready
        } else {
            Access::RedirectToSignIn
        }
    }

    /// Evaluates the session port's current state.
    #[must_use]
    pub fn check<S: SessionPort + ?Sized>(session: &S) -> Access {
        Self::evaluate(session.snapshot())
    }
}
