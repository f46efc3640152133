//! Request tabs: independent drafts of a request plus its last run.

use serde::{Deserialize, Serialize};

use crate::field::EMPTY_OBJECT;
use crate::id::TabId;
use crate::request::{HttpMethod, RequestDraft, SavedRequest};
use crate::response::ExecutionResult;

/// Starting point for a blank tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabTemplate {
    /// Initial name.
    pub name: String,
    /// Initial method.
    pub method: HttpMethod,
    /// Initial URL.
    pub url: String,
}

impl Default for TabTemplate {
    fn default() -> Self {
        Self {
            name: "Untitled".to_string(),
            method: HttpMethod::Get,
            url: String::new(),
        }
    }
}

/// A local edit applied to one tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabEdit {
    /// Rename the request.
    Name(String),
    /// Change the HTTP method.
    Method(HttpMethod),
    /// Change the URL.
    Url(String),
    /// Replace the headers text.
    Headers(String),
    /// Replace the body text.
    Body(String),
    /// Replace the parameters text.
    Parameters(String),
}

/// An open, editable draft of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    /// Local identity.
    pub id: TabId,
    /// Persisted request this tab edits, once saved.
    pub request_id: Option<String>,
    /// Owning collection, once saved.
    pub collection_id: Option<String>,
    /// Request name.
    pub name: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Target URL.
    pub url: String,
    /// Headers as text.
    pub headers: String,
    /// Body as text.
    pub body: String,
    /// Query parameters as text.
    pub parameters: String,
    /// Last known response as text.
    pub response: String,
    /// Most recent run from this tab.
    pub last_result: Option<ExecutionResult>,
    /// Whether there are local edits not yet saved.
    pub dirty: bool,
}

impl Tab {
    /// Opens an unlinked tab from a template.
    #[must_use]
    pub fn from_template(template: &TabTemplate) -> Self {
        Self {
            id: TabId::generate(),
            request_id: None,
            collection_id: None,
            name: template.name.clone(),
            method: template.method,
            url: template.url.clone(),
            headers: EMPTY_OBJECT.to_string(),
            body: EMPTY_OBJECT.to_string(),
            parameters: EMPTY_OBJECT.to_string(),
            response: EMPTY_OBJECT.to_string(),
            last_result: None,
            dirty: false,
        }
    }

    /// Opens a tab holding a copy of a persisted request.
    #[must_use]
    pub fn from_saved(saved: &SavedRequest) -> Self {
        let mut tab = Self::from_template(&TabTemplate::default());
        tab.apply_saved(saved);
        tab
    }

    /// Returns true if the tab is linked to a persisted request.
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        self.request_id.is_some()
    }

    /// The fields to submit on save.
    #[must_use]
    pub fn draft(&self) -> RequestDraft {
        RequestDraft {
            name: self.name.clone(),
            method: self.method,
            url: self.url.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
            parameters: self.parameters.clone(),
        }
    }

    /// Applies a local edit and marks the tab dirty.
    pub fn apply_edit(&mut self, edit: TabEdit) {
        match edit {
            TabEdit::Name(name) => self.name = name,
            TabEdit::Method(method) => self.method = method,
            TabEdit::Url(url) => self.url = url,
            TabEdit::Headers(headers) => self.headers = headers,
            TabEdit::Body(body) => self.body = body,
            TabEdit::Parameters(parameters) => self.parameters = parameters,
        }
        self.dirty = true;
    }

    /// Merges a normalized saved request into this tab.
    ///
    /// Server-assigned fields win; the tab keeps its own identity and last
    /// run, and is clean afterwards.
    pub fn apply_saved(&mut self, saved: &SavedRequest) {
        self.link(saved);
        self.name.clone_from(&saved.name);
        self.method = saved.method;
        self.url.clone_from(&saved.url);
        self.headers.clone_from(&saved.headers);
        self.body.clone_from(&saved.body);
        self.parameters.clone_from(&saved.parameters);
        self.response.clone_from(&saved.response);
        self.dirty = false;
    }

    /// Merges the result of a save that was issued with `sent`.
    ///
    /// Fields still holding what was sent take the server's value. Fields
    /// edited while the save was in flight keep the local value, and the
    /// tab stays dirty.
    pub fn merge_saved(&mut self, saved: &SavedRequest, sent: &RequestDraft) {
        self.link(saved);
        let mut kept_local = false;
        kept_local |= !take_if_unchanged(&mut self.name, &sent.name, &saved.name);
        kept_local |= !take_if_unchanged(&mut self.url, &sent.url, &saved.url);
        kept_local |= !take_if_unchanged(&mut self.headers, &sent.headers, &saved.headers);
        kept_local |= !take_if_unchanged(&mut self.body, &sent.body, &saved.body);
        kept_local |= !take_if_unchanged(&mut self.parameters, &sent.parameters, &saved.parameters);
        if self.method == sent.method {
            self.method = saved.method;
        } else {
            kept_local = true;
        }
        self.response.clone_from(&saved.response);
        self.dirty = kept_local;
    }

    fn link(&mut self, saved: &SavedRequest) {
        self.request_id = Some(saved.id.clone());
        if saved.collection_id.is_some() {
            self.collection_id.clone_from(&saved.collection_id);
        }
    }

    /// Replaces the tab's last run.
    pub fn record_result(&mut self, result: ExecutionResult) {
        self.last_result = Some(result);
    }
}

fn take_if_unchanged(local: &mut String, sent: &str, server: &str) -> bool {
    if local != sent {
        return false;
    }
    server.clone_into(local);
    true
}
