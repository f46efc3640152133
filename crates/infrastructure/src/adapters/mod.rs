//! Port implementations backed by external systems.

mod rest_backend;
mod tracing_notifier;

pub use rest_backend::{BackendError, RestBackend};
pub use tracing_notifier::TracingNotifier;
