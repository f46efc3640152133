//! Notifier that writes user-facing messages to the log.
//!
//! Used by the CLI, which has no toast surface: successes go out at
//! `info`, failures at `error`, under the `relay::notify` target.

use relay_application::{Notification, NotificationLevel, Notifier};

/// Forwards notifications to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    /// Creates a new notifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => {
                tracing::info!(target: "relay::notify", "{}", notification.message);
            }
            NotificationLevel::Error => {
                tracing::error!(target: "relay::notify", "{}", notification.message);
            }
        }
    }
}
