//! Relay Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus runtime configuration.

pub mod adapters;
pub mod config;
pub mod serialization;

pub use adapters::{BackendError, RestBackend, TracingNotifier};
pub use self::config::{BackendConfig, ConfigError, DEFAULT_CONFIG_FILE, LogConfig, RelayConfig};
pub use serialization::{SerializationError, from_json_bytes, to_json_stable};
