//! Integration tests for saving tabs through the request-sync gateway.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use relay_application::{
    CachedData, CollaboratorError, Freshness, NotificationQueue, Playground, SyncError,
};
use relay_domain::{
    CacheKey, HttpMethod, OperationKey, OperationKind, RequestDraft, RequestPayload, TabEdit,
    TabTemplate, ValidationError, Workspace, normalize_request,
};
use tokio::sync::Notify;

use common::{FakeBackend, billing, users};

type TestPlayground = Playground<FakeBackend, FakeBackend, NotificationQueue>;

fn playground(backend: &Arc<FakeBackend>) -> (TestPlayground, Arc<NotificationQueue>) {
    let notifications = Arc::new(NotificationQueue::new());
    let playground = Playground::new(
        Arc::clone(backend),
        Arc::clone(backend),
        Arc::clone(&notifications),
    );
    playground
        .store()
        .select_workspace(Workspace::new("ws-1", "Main"));
    (playground, notifications)
}

fn backend() -> Arc<FakeBackend> {
    Arc::new(
        FakeBackend::new()
            .with_collections(vec![billing(), users()])
            .with_request(
                RequestPayload::new("req-9", "Existing", HttpMethod::Get, "https://api.test/old")
                    .in_collection("col-2"),
            ),
    )
}

fn messages(notifications: &NotificationQueue) -> Vec<String> {
    notifications
        .snapshot()
        .into_iter()
        .map(|n| n.message)
        .collect()
}

#[tokio::test]
async fn test_add_to_collection_links_tab_and_normalizes_fields() {
    let backend = backend();
    let (playground, notifications) = playground(&backend);
    let store = playground.store();
    playground.gateway().collections().await.unwrap();

    let tab = store.open_tab(&TabTemplate::default());
    store.edit_tab(&tab, TabEdit::Url("https://api.test/x".to_string()));
    store.edit_tab(&tab, TabEdit::Name("Fetch X".to_string()));
    let draft = store.tab(&tab).unwrap().draft();

    let saved = playground
        .gateway()
        .add_to_collection("col-1", &draft, Some(&tab))
        .await
        .unwrap();

    assert_eq!(saved.headers, "{}");
    assert_eq!(saved.body, "{}");
    assert_eq!(saved.parameters, "{}");

    let tab = store.tab(&tab).unwrap();
    assert_eq!(tab.request_id.as_deref(), Some(saved.id.as_str()));
    assert_eq!(tab.collection_id.as_deref(), Some("col-1"));
    assert_eq!(tab.name, "Fetch X");
    assert_eq!(tab.headers, "{}");
    assert!(!tab.dirty);

    assert!(
        store
            .cache()
            .is_stale(&CacheKey::requests(Some("ws-1"), "col-1"))
    );
    assert_eq!(
        messages(&notifications),
        vec!["Request saved to \"Billing\" collection".to_string()]
    );
    assert!(
        store
            .operation(&OperationKey::new(OperationKind::AddToCollection, "col-1"))
            .is_success()
    );
}

#[tokio::test]
async fn test_add_to_collection_invalidates_only_that_collection() {
    let backend = backend();
    let (playground, _) = playground(&backend);
    let gateway = playground.gateway();
    gateway.requests_for_collection("col-1").await.unwrap();
    gateway.requests_for_collection("col-2").await.unwrap();

    let draft = RequestDraft::new("New", HttpMethod::Post, "https://api.test/new");
    gateway.add_to_collection("col-1", &draft, None).await.unwrap();

    let cache = playground.store().cache();
    let col1 = CacheKey::requests(Some("ws-1"), "col-1");
    let col2 = CacheKey::requests(Some("ws-1"), "col-2");
    assert_eq!(cache.stale_keys(), vec![&col1]);
    assert_eq!(cache.freshness(&col2), Freshness::Fresh);
}

#[tokio::test]
async fn test_requests_are_read_through_the_cache() {
    let backend = backend();
    let (playground, _) = playground(&backend);
    let gateway = playground.gateway();

    let first = gateway.requests_for_collection("col-2").await.unwrap();
    let second = gateway.requests_for_collection("col-2").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
    assert_eq!(backend.call_count(), 1);

    let draft = RequestDraft::new("Another", HttpMethod::Get, "https://api.test/a");
    gateway.add_to_collection("col-2", &draft, None).await.unwrap();

    let refreshed = gateway.requests_for_collection("col-2").await.unwrap();
    assert_eq!(refreshed.len(), 2);
    assert_eq!(backend.call_count(), 3);
}

#[tokio::test]
async fn test_failed_add_leaves_state_untouched() {
    let backend = backend();
    let (playground, notifications) = playground(&backend);
    let store = playground.store();
    playground
        .gateway()
        .requests_for_collection("col-1")
        .await
        .unwrap();
    let tab = store.open_tab(&TabTemplate::default());
    store.edit_tab(&tab, TabEdit::Url("https://api.test/x".to_string()));
    let draft = store.tab(&tab).unwrap().draft();

    let tabs_before = store.tabs();
    let cache_before = store.cache();
    backend.fail_with(CollaboratorError::Conflict("duplicate name".to_string()));

    let result = playground
        .gateway()
        .add_to_collection("col-1", &draft, Some(&tab))
        .await;

    assert_eq!(
        result,
        Err(SyncError::Collaborator(CollaboratorError::Conflict(
            "duplicate name".to_string()
        )))
    );
    assert_eq!(store.tabs(), tabs_before);
    assert_eq!(store.cache(), cache_before);
    assert_eq!(
        messages(&notifications),
        vec!["Failed to save request to collection".to_string()]
    );
    assert_eq!(
        store
            .operation(&OperationKey::new(OperationKind::AddToCollection, "col-1"))
            .message(),
        Some("Failed to save request to collection")
    );
}

#[tokio::test]
async fn test_blank_fields_fail_fast_without_a_call() {
    let backend = backend();
    let (playground, notifications) = playground(&backend);
    let gateway = playground.gateway();

    let unnamed = RequestDraft::new("   ", HttpMethod::Get, "https://api.test");
    let no_url = RequestDraft::new("Named", HttpMethod::Get, "");
    let valid = RequestDraft::new("Named", HttpMethod::Get, "https://api.test");

    assert_eq!(
        gateway.add_to_collection("col-1", &unnamed, None).await,
        Err(SyncError::Validation(ValidationError::MissingName))
    );
    assert_eq!(
        gateway.add_to_collection("col-1", &no_url, None).await,
        Err(SyncError::Validation(ValidationError::MissingUrl))
    );
    assert_eq!(
        gateway.add_to_collection(" ", &valid, None).await,
        Err(SyncError::Validation(ValidationError::MissingCollection))
    );

    assert_eq!(backend.call_count(), 0);
    assert_eq!(
        messages(&notifications),
        vec![
            "Please enter a request name".to_string(),
            "Please enter a request URL".to_string(),
            "Please select a collection".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_save_merges_into_tab_and_invalidates_owning_collection() {
    let backend = backend();
    let (playground, notifications) = playground(&backend);
    let store = playground.store();
    let gateway = playground.gateway();
    gateway.requests_for_collection("col-1").await.unwrap();
    let existing = gateway.requests_for_collection("col-2").await.unwrap();

    let tab = store.open_saved(&existing[0]);
    store.edit_tab(&tab, TabEdit::Body("{\"a\":1}".to_string()));
    assert!(store.tab(&tab).unwrap().dirty);
    let draft = store.tab(&tab).unwrap().draft();

    let saved = gateway.save("req-9", &draft, Some(&tab)).await.unwrap();

    assert_eq!(saved.body, "{\"a\":1}");
    assert!(!store.tab(&tab).unwrap().dirty);
    let cache = store.cache();
    assert!(cache.is_stale(&CacheKey::requests(Some("ws-1"), "col-2")));
    assert_eq!(
        cache.freshness(&CacheKey::requests(Some("ws-1"), "col-1")),
        Freshness::Fresh
    );
    assert_eq!(messages(&notifications), vec!["Request saved".to_string()]);
}

#[tokio::test]
async fn test_save_of_unknown_request_reports_failure() {
    let backend = backend();
    let (playground, notifications) = playground(&backend);
    let draft = RequestDraft::new("Named", HttpMethod::Get, "https://api.test");

    let result = playground.gateway().save("req-missing", &draft, None).await;

    assert!(matches!(
        result,
        Err(SyncError::Collaborator(CollaboratorError::NotFound(_)))
    ));
    assert_eq!(messages(&notifications), vec!["Failed to save request".to_string()]);
}

#[tokio::test]
async fn test_save_result_for_closed_tab_is_dropped() {
    let gate = Arc::new(tokio::sync::Notify::new());
    let backend = Arc::new(FakeBackend::gated(Arc::clone(&gate)).with_collections(vec![billing()]));
    let (playground, notifications) = playground(&backend);
    let playground = Arc::new(playground);
    let store = Arc::clone(playground.store());

    let tab = store.open_tab(&TabTemplate::default());
    let other = store.open_tab(&TabTemplate::default());
    store.edit_tab(&tab, TabEdit::Url("https://api.test/x".to_string()));
    let draft = store.tab(&tab).unwrap().draft();

    let task = tokio::spawn({
        let playground = Arc::clone(&playground);
        let tab = tab.clone();
        async move {
            playground
                .gateway()
                .add_to_collection("col-1", &draft, Some(&tab))
                .await
        }
    });

    while backend.call_count() == 0 {
        tokio::task::yield_now().await;
    }
    assert!(
        store
            .operation(&OperationKey::new(OperationKind::AddToCollection, "col-1"))
            .is_pending()
    );
    store.close_tab(&tab);
    gate.notify_one();

    let saved = task.await.unwrap().unwrap();

    let tabs = store.tabs();
    assert!(tabs.get(&tab).is_none());
    assert_eq!(tabs.len(), 1);
    assert_eq!(tabs.active_id(), Some(&other));
    assert!(tabs.tabs().iter().all(|t| t.request_id.as_deref() != Some(saved.id.as_str())));
    assert!(
        store
            .cache()
            .is_stale(&CacheKey::requests(Some("ws-1"), "col-1"))
    );
    assert!(notifications.snapshot().iter().all(|n| !n.is_error()));
}

#[tokio::test]
async fn test_closing_active_tab_keeps_exactly_one_active() {
    let backend = backend();
    let (playground, _) = playground(&backend);
    let store = playground.store();
    let ids: Vec<_> = (0..3)
        .map(|_| store.open_tab(&TabTemplate::default()))
        .collect();

    store.activate_tab(&ids[1]);
    assert!(store.close_tab(&ids[1]));

    let tabs = store.tabs();
    assert_eq!(tabs.len(), 2);
    let active = tabs.active_id().unwrap();
    assert!(tabs.contains(active));
    assert_eq!(active, &ids[0]);
}

#[tokio::test]
async fn test_collections_are_cached_per_workspace() {
    let backend = backend();
    let (playground, _) = playground(&backend);
    let gateway = playground.gateway();

    let collections = gateway.collections().await.unwrap();
    assert_eq!(collections.len(), 2);
    gateway.collections().await.unwrap();
    assert_eq!(backend.call_count(), 1);

    playground
        .store()
        .select_workspace(Workspace::new("ws-2", "Other"));
    assert!(gateway.collections().await.unwrap().is_empty());
    assert_eq!(backend.call_count(), 2);
}

#[tokio::test]
async fn test_added_request_keeps_its_collection_when_the_answer_omits_it() {
    let backend = Arc::new(
        FakeBackend::new()
            .with_collections(vec![billing()])
            .without_collection_id(),
    );
    let (playground, _) = playground(&backend);
    let store = playground.store();
    let gateway = playground.gateway();
    let tab = store.open_tab(&TabTemplate::default());
    store.edit_tab(&tab, TabEdit::Name("Fetch X".to_string()));
    store.edit_tab(&tab, TabEdit::Url("https://api.test/x".to_string()));
    let draft = store.tab(&tab).unwrap().draft();

    let saved = gateway
        .add_to_collection("col-1", &draft, Some(&tab))
        .await
        .unwrap();

    assert_eq!(saved.collection_id.as_deref(), Some("col-1"));
    let linked = store.tab(&tab).unwrap();
    assert_eq!(linked.request_id.as_deref(), Some(saved.id.as_str()));
    assert_eq!(linked.collection_id.as_deref(), Some("col-1"));

    gateway.requests_for_collection("col-1").await.unwrap();
    store.edit_tab(&tab, TabEdit::Body("{\"a\":1}".to_string()));
    let draft = store.tab(&tab).unwrap().draft();
    gateway.save(&saved.id, &draft, Some(&tab)).await.unwrap();

    let col1 = CacheKey::requests(Some("ws-1"), "col-1");
    assert_eq!(store.cache().stale_keys(), vec![&col1]);
}

#[tokio::test]
async fn test_list_fetch_overlapping_an_add_is_not_cached() {
    let gate = Arc::new(Notify::new());
    let backend = Arc::new(
        FakeBackend::new()
            .with_collections(vec![billing()])
            .with_list_gate(Arc::clone(&gate)),
    );
    let (playground, _) = playground(&backend);
    let playground = Arc::new(playground);
    let store = Arc::clone(playground.store());
    let col1 = CacheKey::requests(Some("ws-1"), "col-1");

    let fetch = tokio::spawn({
        let playground = Arc::clone(&playground);
        async move { playground.gateway().requests_for_collection("col-1").await }
    });
    while backend.call_count() == 0 {
        tokio::task::yield_now().await;
    }

    let draft = RequestDraft::new("New", HttpMethod::Post, "https://api.test/new");
    playground
        .gateway()
        .add_to_collection("col-1", &draft, None)
        .await
        .unwrap();
    gate.notify_one();
    fetch.await.unwrap().unwrap();

    assert!(store.cache().is_stale(&col1));

    let calls = backend.call_count();
    gate.notify_one();
    let refreshed = playground
        .gateway()
        .requests_for_collection("col-1")
        .await
        .unwrap();
    assert_eq!(refreshed.len(), 1);
    assert_eq!(backend.call_count(), calls + 1);
    assert_eq!(store.cache().freshness(&col1), Freshness::Fresh);
}

#[tokio::test]
async fn test_edit_made_while_saving_survives_the_merge() {
    let gate = Arc::new(Notify::new());
    let existing = RequestPayload::new("req-1", "Ping", HttpMethod::Get, "https://a")
        .in_collection("col-1");
    let backend = Arc::new(
        FakeBackend::gated(Arc::clone(&gate))
            .with_collections(vec![billing()])
            .with_request(existing.clone()),
    );
    let (playground, _) = playground(&backend);
    let playground = Arc::new(playground);
    let store = Arc::clone(playground.store());
    let tab = store.open_saved(&normalize_request(&existing));
    let draft = store.tab(&tab).unwrap().draft();

    let task = tokio::spawn({
        let playground = Arc::clone(&playground);
        let tab = tab.clone();
        async move { playground.gateway().save("req-1", &draft, Some(&tab)).await }
    });
    while backend.call_count() == 0 {
        tokio::task::yield_now().await;
    }
    store.edit_tab(&tab, TabEdit::Url("https://edited-while-saving".to_string()));
    gate.notify_one();
    task.await.unwrap().unwrap();

    let tab = store.tab(&tab).unwrap();
    assert_eq!(tab.request_id.as_deref(), Some("req-1"));
    assert_eq!(tab.url, "https://edited-while-saving");
    assert!(tab.dirty);
}

#[tokio::test]
async fn test_add_settling_after_workspace_switch_leaves_new_workspace_alone() {
    let gate = Arc::new(Notify::new());
    let backend = Arc::new(FakeBackend::gated(Arc::clone(&gate)).with_collections(vec![billing()]));
    let (playground, _) = playground(&backend);
    let playground = Arc::new(playground);
    let store = Arc::clone(playground.store());
    let draft = RequestDraft::new("New", HttpMethod::Post, "https://api.test/new");

    let task = tokio::spawn({
        let playground = Arc::clone(&playground);
        async move { playground.gateway().add_to_collection("col-1", &draft, None).await }
    });
    while backend.call_count() == 0 {
        tokio::task::yield_now().await;
    }

    store.select_workspace(Workspace::new("ws-2", "Other"));
    let other = CacheKey::requests(Some("ws-2"), "col-1");
    assert!(store.store_cached(
        other.clone(),
        CachedData::Requests(Vec::new()),
        store.cache_epoch()
    ));
    gate.notify_one();
    task.await.unwrap().unwrap();

    let cache = store.cache();
    assert_eq!(cache.freshness(&other), Freshness::Fresh);
    assert!(cache.stale_keys().is_empty());
}
