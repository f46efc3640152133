//! Process-wide playground state.
//!
//! One [`PlaygroundStore`] owns the selected workspace, the tab registry,
//! the response viewer, the cache coordinator and the operation board.
//! Each piece lives in its own `tokio::sync::watch` channel so views can
//! subscribe to exactly what they render. Mutations go through the store
//! and complete before the method returns.

use std::collections::BTreeMap;

use relay_domain::{
    CacheKey, Collection, ExecutionResult, OperationKey, OperationState, RequestDraft,
    SavedRequest, Tab, TabEdit, TabId, TabTemplate, Workspace,
};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::cache::{CacheCoordinator, CachedData};
use crate::tab_registry::TabRegistry;

/// Latest state of every operation issued in the current workspace.
///
/// Calls sharing a key are counted: the key reads `Pending` until the last
/// of them settles, and then shows how that one ended.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OperationBoard {
    settled: BTreeMap<OperationKey, OperationState>,
    in_flight: BTreeMap<OperationKey, usize>,
}

impl OperationBoard {
    /// State of one operation; `Idle` if it was never issued.
    #[must_use]
    pub fn get(&self, key: &OperationKey) -> OperationState {
        if self.in_flight.contains_key(key) {
            return OperationState::Pending;
        }
        self.settled.get(key).cloned().unwrap_or_default()
    }

    /// Records that a call for `key` went out.
    pub fn begin(&mut self, key: OperationKey) {
        *self.in_flight.entry(key).or_default() += 1;
    }

    /// Records that a call for `key` settled in `state`.
    pub fn finish(&mut self, key: OperationKey, state: OperationState) {
        if let Some(count) = self.in_flight.get_mut(&key) {
            *count -= 1;
            if *count == 0 {
                self.in_flight.remove(&key);
            }
        }
        self.settled.insert(key, state);
    }

    /// Returns true if any operation is in flight.
    #[must_use]
    pub fn any_pending(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Number of calls in flight.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.in_flight.values().sum()
    }
}

/// Shared, observable playground state.
#[derive(Debug)]
pub struct PlaygroundStore {
    workspace: watch::Sender<Option<Workspace>>,
    tabs: watch::Sender<TabRegistry>,
    response_viewer: watch::Sender<Option<ExecutionResult>>,
    cache: watch::Sender<CacheCoordinator>,
    operations: watch::Sender<OperationBoard>,
}

impl Default for PlaygroundStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaygroundStore {
    /// Creates a store with no workspace, no tabs and an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            workspace: watch::Sender::new(None),
            tabs: watch::Sender::new(TabRegistry::new()),
            response_viewer: watch::Sender::new(None),
            cache: watch::Sender::new(CacheCoordinator::new()),
            operations: watch::Sender::new(OperationBoard::default()),
        }
    }

    // --- workspace / session -------------------------------------------

    /// The selected workspace.
    #[must_use]
    pub fn workspace(&self) -> Option<Workspace> {
        self.workspace.borrow().clone()
    }

    /// Identity of the selected workspace.
    #[must_use]
    pub fn workspace_id(&self) -> Option<String> {
        self.workspace.borrow().as_ref().map(|ws| ws.id.clone())
    }

    /// Subscribes to workspace changes.
    #[must_use]
    pub fn subscribe_workspace(&self) -> watch::Receiver<Option<Workspace>> {
        self.workspace.subscribe()
    }

    /// Switches the active workspace.
    ///
    /// Selecting the workspace that is already active does nothing.
    /// Otherwise tabs, the response viewer and operation states are reset
    /// and cache entries of other workspaces are dropped.
    pub fn select_workspace(&self, workspace: Workspace) -> bool {
        let id = workspace.id.clone();
        let changed = self.workspace.send_if_modified(|current| {
            if current.as_ref().is_some_and(|ws| ws.id == workspace.id) {
                return false;
            }
            *current = Some(workspace);
            true
        });

        if changed {
            self.tabs.send_replace(TabRegistry::new());
            self.response_viewer.send_replace(None);
            self.operations.send_replace(OperationBoard::default());
            self.cache
                .send_modify(|cache| cache.retain_workspace(Some(id.as_str())));
            info!(workspace_id = %id, "Workspace selected");
        }
        changed
    }

    /// Resets everything to the signed-out state.
    pub fn sign_out(&self) {
        self.workspace.send_replace(None);
        self.tabs.send_replace(TabRegistry::new());
        self.response_viewer.send_replace(None);
        self.operations.send_replace(OperationBoard::default());
        self.cache.send_modify(CacheCoordinator::clear);
        info!("Playground state cleared on sign-out");
    }

    // --- tabs -----------------------------------------------------------

    /// Snapshot of the tab registry.
    #[must_use]
    pub fn tabs(&self) -> TabRegistry {
        self.tabs.borrow().clone()
    }

    /// Subscribes to tab registry changes.
    #[must_use]
    pub fn subscribe_tabs(&self) -> watch::Receiver<TabRegistry> {
        self.tabs.subscribe()
    }

    /// Snapshot of one tab.
    #[must_use]
    pub fn tab(&self, id: &TabId) -> Option<Tab> {
        self.tabs.borrow().get(id).cloned()
    }

    /// Snapshot of the active tab.
    #[must_use]
    pub fn active_tab(&self) -> Option<Tab> {
        self.tabs.borrow().active_tab().cloned()
    }

    /// Opens a blank tab and makes it active.
    pub fn open_tab(&self, template: &TabTemplate) -> TabId {
        let tab = Tab::from_template(template);
        let id = tab.id.clone();
        self.tabs.send_modify(|registry| {
            registry.open(tab);
        });
        id
    }

    /// Opens a persisted request, focusing its tab if one is already open.
    pub fn open_saved(&self, saved: &SavedRequest) -> TabId {
        let tab = Tab::from_saved(saved);
        let mut id = tab.id.clone();
        self.tabs
            .send_modify(|registry| id = registry.open_or_focus(tab));
        id
    }

    /// Opens a persisted request with a run of it recorded on the tab.
    pub fn open_executed(&self, saved: &SavedRequest, result: &ExecutionResult) -> TabId {
        let tab = Tab::from_saved(saved);
        let mut id = tab.id.clone();
        self.tabs.send_modify(|registry| {
            id = registry.open_or_focus(tab);
            registry.record_result(&id, result);
        });
        id
    }

    /// Closes a tab.
    pub fn close_tab(&self, id: &TabId) -> bool {
        self.modify_tabs(|registry| registry.close(id))
    }

    /// Makes a tab active.
    pub fn activate_tab(&self, id: &TabId) -> bool {
        self.modify_tabs(|registry| registry.activate(id))
    }

    /// Applies a local edit to one tab.
    pub fn edit_tab(&self, id: &TabId, edit: TabEdit) -> bool {
        self.modify_tabs(|registry| registry.edit(id, edit))
    }

    /// Merges a saved request into one tab; missing tabs are left alone.
    ///
    /// `sent` is the draft the save was issued with; fields edited since
    /// keep their local value.
    pub fn update_tab_from_result(
        &self,
        id: &TabId,
        saved: &SavedRequest,
        sent: &RequestDraft,
    ) -> bool {
        self.modify_tabs(|registry| registry.update_from_result(id, saved, sent))
    }

    /// Stores a run result on one tab; missing tabs are left alone.
    pub fn record_tab_result(&self, id: &TabId, result: &ExecutionResult) -> bool {
        self.modify_tabs(|registry| registry.record_result(id, result))
    }

    /// Subscribers are woken only when `change` reports a modification.
    fn modify_tabs(&self, change: impl FnOnce(&mut TabRegistry) -> bool) -> bool {
        self.tabs.send_if_modified(change)
    }

    // --- response viewer ------------------------------------------------

    /// The most recent run result.
    #[must_use]
    pub fn response_viewer(&self) -> Option<ExecutionResult> {
        self.response_viewer.borrow().clone()
    }

    /// Subscribes to the response viewer.
    #[must_use]
    pub fn subscribe_response_viewer(&self) -> watch::Receiver<Option<ExecutionResult>> {
        self.response_viewer.subscribe()
    }

    /// Replaces the response viewer content.
    pub fn show_response(&self, result: ExecutionResult) {
        self.response_viewer.send_replace(Some(result));
    }

    // --- cache ------------------------------------------------------------

    /// Snapshot of the cache.
    #[must_use]
    pub fn cache(&self) -> CacheCoordinator {
        self.cache.borrow().clone()
    }

    /// Subscribes to cache changes; a stale key means "refetch".
    #[must_use]
    pub fn subscribe_cache(&self) -> watch::Receiver<CacheCoordinator> {
        self.cache.subscribe()
    }

    /// Current cache epoch, captured before a fetch goes out.
    #[must_use]
    pub fn cache_epoch(&self) -> u64 {
        self.cache.borrow().epoch()
    }

    /// Marks readers of `key` stale.
    ///
    /// Keys of a workspace that is no longer selected hold nothing and are
    /// skipped.
    pub fn invalidate(&self, key: &CacheKey) -> Vec<CacheKey> {
        if key.workspace != self.workspace_id() {
            debug!(key = %key, "Skipping invalidation for a workspace that is no longer selected");
            return Vec::new();
        }
        let mut affected = Vec::new();
        self.cache
            .send_modify(|cache| affected = cache.invalidate(key));
        debug!(key = %key, affected = affected.len(), "Cache invalidated");
        affected
    }

    /// Stores data fetched since `fetched_at` (see [`Self::cache_epoch`]).
    ///
    /// The write is dropped if the workspace changed while fetching, or if
    /// the key was invalidated after the fetch went out.
    pub fn store_cached(&self, key: CacheKey, data: CachedData, fetched_at: u64) -> bool {
        if key.workspace != self.workspace_id() {
            debug!(key = %key, "Discarding fetch for a workspace that is no longer selected");
            return false;
        }
        let mut stored = false;
        self.cache
            .send_modify(|cache| stored = cache.store(key.clone(), data, fetched_at));
        if !stored {
            debug!(key = %key, "Discarding fetch that overlapped an invalidation");
        }
        stored
    }

    /// Fresh cached requests for a key.
    #[must_use]
    pub fn fresh_requests(&self, key: &CacheKey) -> Option<Vec<SavedRequest>> {
        self.cache.borrow().fresh_requests(key).map(<[_]>::to_vec)
    }

    /// Fresh cached collections for a key.
    #[must_use]
    pub fn fresh_collections(&self, key: &CacheKey) -> Option<Vec<Collection>> {
        self.cache.borrow().fresh_collections(key).map(<[_]>::to_vec)
    }

    /// Display name of a collection in the selected workspace, if cached.
    #[must_use]
    pub fn collection_name(&self, collection_id: &str) -> Option<String> {
        let workspace = self.workspace_id();
        self.cache
            .borrow()
            .collection_name(workspace.as_deref(), collection_id)
            .map(str::to_string)
    }

    // --- operations -------------------------------------------------------

    /// State of one operation.
    #[must_use]
    pub fn operation(&self, key: &OperationKey) -> OperationState {
        self.operations.borrow().get(key)
    }

    /// Snapshot of the operation board.
    #[must_use]
    pub fn operations(&self) -> OperationBoard {
        self.operations.borrow().clone()
    }

    /// Subscribes to operation state changes.
    #[must_use]
    pub fn subscribe_operations(&self) -> watch::Receiver<OperationBoard> {
        self.operations.subscribe()
    }

    /// Marks a call for `key` as in flight.
    pub fn begin_operation(&self, key: OperationKey) {
        self.operations.send_modify(|board| board.begin(key));
    }

    /// Records how a call for `key` settled.
    pub fn finish_operation(&self, key: OperationKey, state: OperationState) {
        self.operations
            .send_modify(|board| board.finish(key, state));
    }
}
