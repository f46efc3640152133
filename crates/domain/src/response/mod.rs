//! Execution result types

mod spec;

pub use spec::{ExecutionPayload, ExecutionResult, ResponseOutcome, StatusCode};
