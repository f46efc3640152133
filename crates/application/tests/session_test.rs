//! Integration tests for keeping playground state in step with the session.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use std::sync::Arc;

use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use relay_application::{Access, NotificationQueue, Playground, SessionPort, SessionSnapshot};
use relay_domain::{CacheKey, TabTemplate, Workspace};

use common::{FakeBackend, billing};

/// Session whose state the test flips by hand.
struct FakeSession(Mutex<SessionSnapshot>);

impl FakeSession {
    fn new(snapshot: SessionSnapshot) -> Self {
        Self(Mutex::new(snapshot))
    }

    fn set(&self, snapshot: SessionSnapshot) {
        *self.0.lock() = snapshot;
    }
}

impl SessionPort for FakeSession {
    fn snapshot(&self) -> SessionSnapshot {
        *self.0.lock()
    }
}

#[tokio::test]
async fn test_losing_the_session_clears_the_playground() {
    let backend = Arc::new(FakeBackend::new().with_collections(vec![billing()]));
    let playground = Playground::new(
        Arc::clone(&backend),
        Arc::clone(&backend),
        Arc::new(NotificationQueue::new()),
    );
    let store = playground.store();
    let session = FakeSession::new(SessionSnapshot::signed_in());

    assert_eq!(playground.sync_session(&session), Access::Ready);
    store.select_workspace(Workspace::new("ws-1", "Main"));
    playground.gateway().collections().await.unwrap();
    playground
        .gateway()
        .requests_for_collection("col-1")
        .await
        .unwrap();
    store.open_tab(&TabTemplate::default());
    store.invalidate(&CacheKey::all_requests(Some("ws-1")));

    session.set(SessionSnapshot::signed_out());
    let access = playground.sync_session(&session);

    assert_eq!(access, Access::RedirectToSignIn);
    assert!(store.workspace().is_none());
    assert!(store.tabs().is_empty());
    assert!(store.response_viewer().is_none());
    assert!(store.cache().is_empty());
    assert!(!store.operations().any_pending());
}

#[tokio::test]
async fn test_pending_session_keeps_state() {
    let backend = Arc::new(FakeBackend::new());
    let playground = Playground::new(
        Arc::clone(&backend),
        Arc::clone(&backend),
        Arc::new(NotificationQueue::new()),
    );
    let store = playground.store();
    store.select_workspace(Workspace::new("ws-1", "Main"));
    let tab = store.open_tab(&TabTemplate::default());

    let access = playground.sync_session(&FakeSession::new(SessionSnapshot::loading()));

    assert_eq!(access, Access::Loading);
    assert_eq!(store.workspace_id().as_deref(), Some("ws-1"));
    assert!(store.tab(&tab).is_some());
}
