//! Ordered registry of open request tabs.
//!
//! All operations are synchronous and complete before the caller observes
//! the new state. Operations addressing a tab that no longer exists are
//! no-ops and report `false`.

use relay_domain::{
    ExecutionResult, RequestDraft, SavedRequest, Tab, TabEdit, TabId, TabTemplate,
};

/// Open tabs in display order, with at most one active.
///
/// Invariant: `active` is `Some` exactly when `tabs` is non-empty, and
/// always names a tab in `tabs`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TabRegistry {
    tabs: Vec<Tab>,
    active: Option<TabId>,
}

impl TabRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open tabs in order.
    #[must_use]
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Number of open tabs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Returns true if no tab is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Identity of the active tab.
    #[must_use]
    pub const fn active_id(&self) -> Option<&TabId> {
        self.active.as_ref()
    }

    /// The active tab.
    #[must_use]
    pub fn active_tab(&self) -> Option<&Tab> {
        self.active.as_ref().and_then(|id| self.get(id))
    }

    /// Looks up a tab by identity.
    #[must_use]
    pub fn get(&self, id: &TabId) -> Option<&Tab> {
        self.tabs.iter().find(|tab| &tab.id == id)
    }

    /// Returns true if the tab is open.
    #[must_use]
    pub fn contains(&self, id: &TabId) -> bool {
        self.get(id).is_some()
    }

    fn get_mut(&mut self, id: &TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|tab| &tab.id == id)
    }

    /// Appends a tab and makes it active.
    pub fn open(&mut self, tab: Tab) -> TabId {
        let id = tab.id.clone();
        self.tabs.push(tab);
        self.active = Some(id.clone());
        id
    }

    /// Opens a blank tab from a template and makes it active.
    pub fn open_template(&mut self, template: &TabTemplate) -> TabId {
        self.open(Tab::from_template(template))
    }

    /// Opens a persisted request, or focuses the tab already editing it.
    pub fn open_saved(&mut self, saved: &SavedRequest) -> TabId {
        self.open_or_focus(Tab::from_saved(saved))
    }

    /// Opens a persisted request together with a run of it, e.g. from the
    /// run history. An existing tab for the request is focused and updated.
    pub fn open_executed(&mut self, saved: &SavedRequest, result: &ExecutionResult) -> TabId {
        let id = self.open_saved(saved);
        self.record_result(&id, result);
        id
    }

    /// Opens `tab` unless another tab already edits the same persisted
    /// request, in which case that one is focused and `tab` is dropped.
    pub fn open_or_focus(&mut self, tab: Tab) -> TabId {
        let existing = tab.request_id.as_deref().and_then(|request_id| {
            self.tabs
                .iter()
                .find(|open| open.request_id.as_deref() == Some(request_id))
                .map(|open| open.id.clone())
        });

        match existing {
            Some(id) => {
                self.active = Some(id.clone());
                id
            }
            None => self.open(tab),
        }
    }

    /// Closes a tab.
    ///
    /// If the closed tab was active, the tab immediately before it becomes
    /// active; when it was the first tab, the new first tab does; when the
    /// registry becomes empty, none is.
    pub fn close(&mut self, id: &TabId) -> bool {
        let Some(index) = self.tabs.iter().position(|tab| &tab.id == id) else {
            return false;
        };
        self.tabs.remove(index);

        if self.active.as_ref() == Some(id) {
            self.active = self
                .tabs
                .get(index.saturating_sub(1))
                .map(|tab| tab.id.clone());
        }
        true
    }

    /// Makes an open tab active.
    pub fn activate(&mut self, id: &TabId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.active = Some(id.clone());
        true
    }

    /// Applies a local edit to one tab.
    pub fn edit(&mut self, id: &TabId, edit: TabEdit) -> bool {
        let Some(tab) = self.get_mut(id) else {
            return false;
        };
        tab.apply_edit(edit);
        true
    }

    /// Merges a normalized saved request into one tab, keeping edits made
    /// after `sent` went out.
    ///
    /// A missing tab (closed while the save was in flight) is a silent no-op.
    pub fn update_from_result(
        &mut self,
        id: &TabId,
        saved: &SavedRequest,
        sent: &RequestDraft,
    ) -> bool {
        let Some(tab) = self.get_mut(id) else {
            return false;
        };
        tab.merge_saved(saved, sent);
        true
    }

    /// Stores a run result on one tab; missing tabs are a silent no-op.
    pub fn record_result(&mut self, id: &TabId, result: &ExecutionResult) -> bool {
        let Some(tab) = self.get_mut(id) else {
            return false;
        };
        tab.record_result(result.clone());
        true
    }
}
