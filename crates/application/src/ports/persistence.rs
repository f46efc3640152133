//! Persistence collaborator port.

use std::future::Future;

use relay_domain::{Collection, RequestDraft, RequestPayload};

use crate::error::CollaboratorError;

/// Port for the collaborator that stores collections and requests.
///
/// Results come back in raw payload form; the core normalizes them.
pub trait PersistencePort: Send + Sync {
    /// Creates a request inside a collection.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the collection does not exist, `Conflict` on a
    /// constraint violation, or another `CollaboratorError`.
    fn add_request_to_collection(
        &self,
        collection_id: &str,
        request: &RequestDraft,
    ) -> impl Future<Output = Result<RequestPayload, CollaboratorError>> + Send;

    /// Lists the requests of a collection.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the collection does not exist.
    fn get_all_requests_from_collection(
        &self,
        collection_id: &str,
    ) -> impl Future<Output = Result<Vec<RequestPayload>, CollaboratorError>> + Send;

    /// Overwrites an existing request.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the request does not exist, `Conflict` on a
    /// constraint violation, or another `CollaboratorError`.
    fn save_request(
        &self,
        id: &str,
        request: &RequestDraft,
    ) -> impl Future<Output = Result<RequestPayload, CollaboratorError>> + Send;

    /// Lists the collections of a workspace.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the workspace does not exist.
    fn list_collections(
        &self,
        workspace_id: &str,
    ) -> impl Future<Output = Result<Vec<Collection>, CollaboratorError>> + Send;
}
