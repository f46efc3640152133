//! Relay Application - Playground state engine
//!
//! This crate defines the application layer with:
//! - Port traits for the persistence, execution, session and notification
//!   collaborators
//! - The tab registry, cache coordinator and process-wide playground store
//! - The request-sync gateway and execution pipeline that drive them
//! - Application-level error handling

pub mod cache;
pub mod error;
pub mod gateway;
pub mod notifications;
pub mod pipeline;
pub mod playground;
pub mod ports;
pub mod search;
pub mod session;
pub mod store;
pub mod tab_registry;

pub use cache::{CacheCoordinator, CacheEntry, CachedData, Freshness};
pub use error::{CollaboratorError, ExecutionError, SyncError};
pub use gateway::RequestSyncGateway;
pub use notifications::NotificationQueue;
pub use pipeline::ExecutionPipeline;
pub use playground::Playground;
pub use ports::{
    ExecutionPort, Notification, NotificationLevel, Notifier, PersistencePort, SessionPort,
    SessionSnapshot,
};
pub use search::{default_collection, filter_collections};
pub use session::{Access, SessionGate};
pub use store::{OperationBoard, PlaygroundStore};
pub use tab_registry::TabRegistry;
