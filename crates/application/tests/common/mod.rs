//! In-memory collaborators shared by the application integration tests.
#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use relay_application::{CollaboratorError, ExecutionPort, PersistencePort};
use relay_domain::{Collection, ExecutionPayload, FieldValue, RequestDraft, RequestPayload};
use serde_json::json;
use tokio::sync::Notify;

/// Persistence and execution backend kept in memory.
///
/// Newly created requests come back with structured `{}` fields, the way a
/// JSON backend stores them. A configured failure makes every call reject.
#[derive(Default)]
pub struct FakeBackend {
    requests: Mutex<BTreeMap<String, RequestPayload>>,
    collections: Mutex<Vec<Collection>>,
    failure: Mutex<Option<CollaboratorError>>,
    run_result: Mutex<Option<ExecutionPayload>>,
    gate: Option<Arc<Notify>>,
    list_gate: Option<Arc<Notify>>,
    omit_collection_id: bool,
    next_id: AtomicUsize,
    pub calls: AtomicUsize,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call waits for `gate.notify_one()` before answering.
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    /// Only request-list fetches wait for `gate.notify_one()`.
    pub fn with_list_gate(mut self, gate: Arc<Notify>) -> Self {
        self.list_gate = Some(gate);
        self
    }

    /// Answers to add and save leave out `collectionId`.
    pub fn without_collection_id(mut self) -> Self {
        self.omit_collection_id = true;
        self
    }

    pub fn with_collections(self, collections: Vec<Collection>) -> Self {
        *self.collections.lock() = collections;
        self
    }

    pub fn with_request(self, payload: RequestPayload) -> Self {
        self.requests.lock().insert(payload.id.clone(), payload);
        self
    }

    pub fn with_run_result(self, payload: ExecutionPayload) -> Self {
        *self.run_result.lock() = Some(payload);
        self
    }

    /// Makes every later call reject with `error`.
    pub fn fail_with(&self, error: CollaboratorError) {
        *self.failure.lock() = Some(error);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) -> Result<(), CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match self.failure.lock().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn answer(&self, mut payload: RequestPayload) -> RequestPayload {
        if self.omit_collection_id {
            payload.collection_id = None;
        }
        payload
    }

    fn stored(&self, id: &str, collection_id: Option<&str>, draft: &RequestDraft) -> RequestPayload {
        let mut payload = RequestPayload::new(id, draft.name.clone(), draft.method, draft.url.clone())
            .with_headers(structured_or_text(&draft.headers))
            .with_body(structured_or_text(&draft.body))
            .with_parameters(structured_or_text(&draft.parameters));
        payload.collection_id = collection_id.map(str::to_string);
        payload
    }
}

fn structured_or_text(text: &str) -> FieldValue {
    serde_json::from_str(text).map_or_else(|_| FieldValue::text(text), FieldValue::structured)
}

impl PersistencePort for FakeBackend {
    async fn add_request_to_collection(
        &self,
        collection_id: &str,
        request: &RequestDraft,
    ) -> Result<RequestPayload, CollaboratorError> {
        self.enter().await?;
        if !self.collections.lock().iter().any(|c| c.id == collection_id) {
            return Err(CollaboratorError::NotFound(format!("collection {collection_id}")));
        }
        let id = format!("req-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let payload = self.stored(&id, Some(collection_id), request);
        self.requests.lock().insert(id, payload.clone());
        Ok(self.answer(payload))
    }

    async fn get_all_requests_from_collection(
        &self,
        collection_id: &str,
    ) -> Result<Vec<RequestPayload>, CollaboratorError> {
        self.enter().await?;
        if let Some(gate) = &self.list_gate {
            gate.notified().await;
        }
        Ok(self
            .requests
            .lock()
            .values()
            .filter(|r| r.collection_id.as_deref() == Some(collection_id))
            .cloned()
            .collect())
    }

    async fn save_request(
        &self,
        id: &str,
        request: &RequestDraft,
    ) -> Result<RequestPayload, CollaboratorError> {
        self.enter().await?;
        let mut requests = self.requests.lock();
        let Some(existing) = requests.get(id) else {
            return Err(CollaboratorError::NotFound(format!("request {id}")));
        };
        let payload = self.stored(id, existing.collection_id.as_deref(), request);
        requests.insert(id.to_string(), payload.clone());
        Ok(self.answer(payload))
    }

    async fn list_collections(
        &self,
        workspace_id: &str,
    ) -> Result<Vec<Collection>, CollaboratorError> {
        self.enter().await?;
        Ok(self
            .collections
            .lock()
            .iter()
            .filter(|c| c.workspace_id == workspace_id)
            .cloned()
            .collect())
    }
}

impl ExecutionPort for FakeBackend {
    async fn run(&self, request_id: &str) -> Result<ExecutionPayload, CollaboratorError> {
        self.enter().await?;
        if !self.requests.lock().contains_key(request_id) {
            return Err(CollaboratorError::NotFound(format!("request {request_id}")));
        }
        Ok(self.run_result.lock().clone().unwrap_or_else(|| {
            ExecutionPayload::new(200)
                .with_id(format!("run-{request_id}"))
                .with_status_text("OK")
                .with_headers(json!({"content-type": "application/json"}))
                .with_body(json!({"ok": true}))
                .with_duration_ms(12)
        }))
    }
}

pub fn billing() -> Collection {
    Collection::new("col-1", "ws-1", "Billing")
}

pub fn users() -> Collection {
    Collection::new("col-2", "ws-1", "Users")
}
