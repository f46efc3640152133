//! Relay Domain - Core playground types
//!
//! This crate defines the domain model for the Relay request playground:
//! persisted requests and their payload forms, execution results, tabs,
//! workspaces, cache keys and operation state.
//! All types here are pure Rust with no I/O dependencies.

pub mod cache;
pub mod error;
pub mod field;
pub mod id;
pub mod normalize;
pub mod request;
pub mod response;
pub mod state;
pub mod tab;
pub mod workspace;

pub use cache::{CacheKey, EntityKind};
pub use error::{DomainError, DomainResult, ValidationError};
pub use field::{EMPTY_OBJECT, FieldValue};
pub use id::{TabId, generate_id};
pub use normalize::{normalize_execution, normalize_request};
pub use request::{HttpMethod, RequestDraft, RequestPayload, SavedRequest};
pub use response::{ExecutionPayload, ExecutionResult, ResponseOutcome, StatusCode};
pub use state::{OperationKey, OperationKind, OperationState};
pub use tab::{Tab, TabEdit, TabTemplate};
pub use workspace::{Collection, Workspace};
