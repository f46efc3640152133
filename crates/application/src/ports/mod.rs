//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the playground core and its external
//! collaborators. Each port is a trait implemented by adapters in the
//! infrastructure layer (or by fakes in tests).

mod execution;
mod notifier;
mod persistence;
mod session;

pub use execution::ExecutionPort;
pub use notifier::{Notification, NotificationLevel, Notifier};
pub use persistence::PersistencePort;
pub use session::{SessionPort, SessionSnapshot};
