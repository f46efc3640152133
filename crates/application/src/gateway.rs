//! Request-sync gateway.
//!
//! Pushes tab drafts to the persistence collaborator, normalizes what comes
//! back, invalidates the affected cache keys and merges the result into the
//! tab that issued the call. A failed call leaves tabs and cache exactly as
//! they were.

use std::sync::Arc;

use relay_domain::{
    CacheKey, Collection, OperationKey, OperationKind, OperationState, RequestDraft, SavedRequest,
    TabId, ValidationError, normalize_request,
};
use tracing::{debug, info, warn};

use crate::cache::CachedData;
use crate::error::{CollaboratorError, SyncError};
use crate::ports::{Notification, Notifier, PersistencePort};
use crate::store::PlaygroundStore;

const ADD_FAILED: &str = "Failed to save request to collection";
const SAVE_FAILED: &str = "Failed to save request";
const LOAD_REQUESTS_FAILED: &str = "Failed to load requests";
const LOAD_COLLECTIONS_FAILED: &str = "Failed to load collections";

/// Gateway between open tabs and the persistence collaborator.
pub struct RequestSyncGateway<P, N> {
    store: Arc<PlaygroundStore>,
    persistence: Arc<P>,
    notifier: Arc<N>,
}

impl<P: PersistencePort, N: Notifier> RequestSyncGateway<P, N> {
    /// Creates a gateway over the shared store.
    #[must_use]
    pub const fn new(store: Arc<PlaygroundStore>, persistence: Arc<P>, notifier: Arc<N>) -> Self {
        Self {
            store,
            persistence,
            notifier,
        }
    }

    /// Creates a new request inside a collection from a draft.
    ///
    /// On success the collection's request list is invalidated and, if
    /// `target_tab` is still open, the tab is linked to the new request.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Validation` without calling the collaborator if
    /// the name, URL or collection is blank, or `SyncError::Collaborator`
    /// if the collaborator rejects the call.
    pub async fn add_to_collection(
        &self,
        collection_id: &str,
        draft: &RequestDraft,
        target_tab: Option<&TabId>,
    ) -> Result<SavedRequest, SyncError> {
        let sent = draft;
        let draft = draft.trimmed();
        let collection_id = collection_id.trim();
        if let Err(error) = draft.validate().and_then(|()| {
            if collection_id.is_empty() {
                Err(ValidationError::MissingCollection)
            } else {
                Ok(())
            }
        }) {
            return Err(self.reject(error));
        }

        let operation = OperationKey::new(OperationKind::AddToCollection, collection_id);
        let scope = self.store.workspace_id();
        self.store.begin_operation(operation.clone());
        debug!(collection_id, name = %draft.name, "Adding request to collection");

        let mut payload = match self
            .persistence
            .add_request_to_collection(collection_id, &draft)
            .await
        {
            Ok(payload) => payload,
            Err(error) => return Err(self.fail(operation, ADD_FAILED, error)),
        };
        if payload.collection_id.is_none() {
            payload.collection_id = Some(collection_id.to_string());
        }

        let saved = normalize_request(&payload);
        self.store
            .invalidate(&CacheKey::requests(scope.as_deref(), collection_id));
        self.merge_into_tab(target_tab, &saved, sent);

        let message = match self.store.collection_name(collection_id) {
            Some(name) => format!("Request saved to \"{name}\" collection"),
            None => "Request saved".to_string(),
        };
        self.notifier.notify(Notification::success(message));
        self.store
            .finish_operation(operation, OperationState::Succeeded);
        info!(collection_id, request_id = %saved.id, "Request added to collection");
        Ok(saved)
    }

    /// Overwrites an existing request with a draft.
    ///
    /// If the collaborator's answer leaves out the owning collection, the
    /// collection already known to `target_tab` is assumed.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Validation` if the request id, name or URL is
    /// blank, or `SyncError::Collaborator` if the collaborator rejects it.
    pub async fn save(
        &self,
        request_id: &str,
        draft: &RequestDraft,
        target_tab: Option<&TabId>,
    ) -> Result<SavedRequest, SyncError> {
        let sent = draft;
        let draft = draft.trimmed();
        let request_id = request_id.trim();
        let validation = if request_id.is_empty() {
            Err(ValidationError::MissingRequestId)
        } else {
            draft.validate()
        };
        if let Err(error) = validation {
            return Err(self.reject(error));
        }

        let operation = OperationKey::new(OperationKind::Save, request_id);
        let scope = self.store.workspace_id();
        let known_collection = target_tab
            .and_then(|id| self.store.tab(id))
            .and_then(|tab| tab.collection_id);
        self.store.begin_operation(operation.clone());
        debug!(request_id, "Saving request");

        let mut payload = match self.persistence.save_request(request_id, &draft).await {
            Ok(payload) => payload,
            Err(error) => return Err(self.fail(operation, SAVE_FAILED, error)),
        };
        if payload.collection_id.is_none() {
            payload.collection_id = known_collection;
        }

        let saved = normalize_request(&payload);
        let key = match saved.collection_id.as_deref() {
            Some(collection_id) => CacheKey::requests(scope.as_deref(), collection_id),
            None => CacheKey::all_requests(scope.as_deref()),
        };
        self.store.invalidate(&key);
        self.merge_into_tab(target_tab, &saved, sent);

        self.notifier.notify(Notification::success("Request saved"));
        self.store
            .finish_operation(operation, OperationState::Succeeded);
        info!(request_id = %saved.id, "Request saved");
        Ok(saved)
    }

    /// Requests of a collection, served from cache while fresh.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Validation` for a blank collection id, or
    /// `SyncError::Collaborator` if the fetch fails.
    pub async fn requests_for_collection(
        &self,
        collection_id: &str,
    ) -> Result<Vec<SavedRequest>, SyncError> {
        let collection_id = collection_id.trim();
        if collection_id.is_empty() {
            return Err(self.reject(ValidationError::MissingCollection));
        }

        let scope = self.store.workspace_id();
        let key = CacheKey::requests(scope.as_deref(), collection_id);
        if let Some(cached) = self.store.fresh_requests(&key) {
            debug!(key = %key, "Serving requests from cache");
            return Ok(cached);
        }

        let operation = OperationKey::new(OperationKind::LoadRequests, collection_id);
        let fetched_at = self.store.cache_epoch();
        self.store.begin_operation(operation.clone());

        let payloads = match self
            .persistence
            .get_all_requests_from_collection(collection_id)
            .await
        {
            Ok(payloads) => payloads,
            Err(error) => return Err(self.fail(operation, LOAD_REQUESTS_FAILED, error)),
        };

        let requests: Vec<SavedRequest> = payloads.iter().map(normalize_request).collect();
        self.store
            .store_cached(key, CachedData::Requests(requests.clone()), fetched_at);
        self.store
            .finish_operation(operation, OperationState::Succeeded);
        debug!(collection_id, count = requests.len(), "Requests loaded");
        Ok(requests)
    }

    /// Collections of the selected workspace, served from cache while fresh.
    ///
    /// With no workspace selected the list is empty.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Collaborator` if the fetch fails.
    pub async fn collections(&self) -> Result<Vec<Collection>, SyncError> {
        let Some(workspace_id) = self.store.workspace_id() else {
            return Ok(Vec::new());
        };

        let key = CacheKey::collections(workspace_id.as_str());
        if let Some(cached) = self.store.fresh_collections(&key) {
            return Ok(cached);
        }

        let operation = OperationKey::new(OperationKind::LoadCollections, workspace_id.as_str());
        let fetched_at = self.store.cache_epoch();
        self.store.begin_operation(operation.clone());

        match self.persistence.list_collections(&workspace_id).await {
            Ok(collections) => {
                self.store.store_cached(
                    key,
                    CachedData::Collections(collections.clone()),
                    fetched_at,
                );
                self.store
                    .finish_operation(operation, OperationState::Succeeded);
                Ok(collections)
            }
            Err(error) => Err(self.fail(operation, LOAD_COLLECTIONS_FAILED, error)),
        }
    }

    fn merge_into_tab(
        &self,
        target_tab: Option<&TabId>,
        saved: &SavedRequest,
        sent: &RequestDraft,
    ) {
        let Some(tab_id) = target_tab else {
            return;
        };
        if !self.store.update_tab_from_result(tab_id, saved, sent) {
            debug!(tab_id = %tab_id, request_id = %saved.id, "Tab closed before the save completed");
        }
    }

    fn reject(&self, error: ValidationError) -> SyncError {
        debug!(%error, "Draft rejected");
        self.notifier.notify(Notification::error(error.to_string()));
        SyncError::Validation(error)
    }

    fn fail(
        &self,
        operation: OperationKey,
        message: &'static str,
        error: CollaboratorError,
    ) -> SyncError {
        warn!(operation = %operation, %error, "{message}");
        self.notifier.notify(Notification::error(message));
        self.store
            .finish_operation(operation, OperationState::failed(message));
        SyncError::Collaborator(error)
    }
}
