//! Execution collaborator port

use std::future::Future;

use relay_domain::ExecutionPayload;

use crate::error::CollaboratorError;

/// Port for running a persisted request against its target endpoint.
///
/// This trait abstracts the remote-execution primitive, allowing the
/// pipeline to be independent of how the request is actually sent.
/// Timeout policy belongs to the implementation.
pub trait ExecutionPort: Send + Sync {
    /// Runs the persisted request and returns the raw result.
    ///
    /// A target that answers with a non-2xx status, or does not answer at
    /// all, still yields `Ok` with the status recorded in the payload.
    ///
    /// # Errors
    ///
    /// Returns `Unreachable` if the collaborator itself cannot be reached,
    /// `NotFound` if the request does not exist.
    fn run(
        &self,
        request_id: &str,
    ) -> impl Future<Output = Result<ExecutionPayload, CollaboratorError>> + Send;
}
