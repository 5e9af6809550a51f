use std::time::Duration;

use quotebook::SyncPolicy;
use quotebook::core::action::{Action, Effect, update};
use quotebook::core::quote::Quote;
use quotebook::core::state::{App, SyncSettings};
use quotebook::core::storage::MemoryStore;
use quotebook::core::store::QuoteStore;
use quotebook::sync::{HttpRemote, RemoteSource, SyncError, SyncJob, SyncOutcome, run_cycle};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn remote_for(server: &MockServer) -> HttpRemote {
    HttpRemote::new(server.uri(), Duration::from_secs(5)).unwrap()
}

fn quote(text: &str, category: &str) -> Quote {
    Quote::new(text, category).unwrap()
}

/// A JSONPlaceholder-style `/posts` payload with `n` records.
fn posts(n: usize) -> serde_json::Value {
    let records: Vec<_> = (1..=n)
        .map(|i| {
            json!({
                "userId": 1,
                "id": i,
                "title": format!("remote title {i}"),
                "body": "ignored"
            })
        })
        .collect();
    json!(records)
}

fn app_with(quotes: Vec<Quote>, policy: SyncPolicy) -> App {
    let store = QuoteStore::with_quotes(Box::new(MemoryStore::new()), quotes);
    App::new(
        store,
        SyncSettings {
            policy,
            ..SyncSettings::default()
        },
    )
}

/// Drives one cycle the way the event loop does: request, run, apply.
async fn sync_once(app: &mut App, remote: &dyn RemoteSource) {
    let Effect::SpawnSync(job) = update(app, Action::SyncRequested) else {
        panic!("sync request did not produce a job");
    };
    let action = match run_cycle(remote, &job).await {
        Ok(outcome) => Action::SyncCompleted(outcome),
        Err(e) => Action::SyncFailed(e.to_string()),
    };
    update(app, action);
}

// ============================================================================
// HttpRemote
// ============================================================================

#[tokio::test]
async fn test_fetch_sends_limit_and_maps_titles() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("_limit", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts(3)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let records = remote_for(&mock_server).fetch_records(3).await.unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].title, "remote title 1");
}

#[tokio::test]
async fn test_fetch_truncates_oversized_response() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts(25)))
        .mount(&mock_server)
        .await;

    let records = remote_for(&mock_server).fetch_records(10).await.unwrap();
    assert_eq!(records.len(), 10);
}

#[tokio::test]
async fn test_fetch_server_error_is_api_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let result = remote_for(&mock_server).fetch_records(10).await;
    match result {
        Err(SyncError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("Internal Server Error"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_malformed_body_is_parse_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&mock_server)
        .await;

    let result = remote_for(&mock_server).fetch_records(10).await;
    assert!(matches!(result, Err(SyncError::Parse(_))));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    // Port 9 (discard) on localhost is expected to refuse connections.
    let remote = HttpRemote::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
    let result = remote.fetch_records(1).await;
    assert!(matches!(result, Err(SyncError::Network(_))));
}

#[tokio::test]
async fn test_push_posts_quote_json() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts"))
        .and(body_json(json!({"text": "Be kind.", "category": "Ethics"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(
            json!({"text": "Be kind.", "category": "Ethics", "id": 101}),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ack = remote_for(&mock_server)
        .push_quote(&quote("Be kind.", "Ethics"))
        .await
        .unwrap();
    assert_eq!(ack["id"], 101);
}

// ============================================================================
// Full cycles
// ============================================================================

#[tokio::test]
async fn test_replace_cycle_leaves_exactly_remote_quotes() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts(3)))
        .mount(&mock_server)
        .await;

    let mut app = app_with(
        vec![quote("Mine.", "Local"), quote("Also mine.", "Local")],
        SyncPolicy::Replace,
    );
    sync_once(&mut app, &remote_for(&mock_server)).await;

    assert_eq!(app.store.len(), 3);
    assert!(app.store.quotes().iter().all(|q| q.category == "Server"));
    assert!(!app.store.quotes().iter().any(|q| q.text == "Mine."));
    assert_eq!(app.categories, vec!["Server"]);
    assert!(!app.is_syncing());
}

#[tokio::test]
async fn test_append_cycle_keeps_local_quotes() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts(2)))
        .mount(&mock_server)
        .await;

    let mut app = app_with(vec![quote("Mine.", "Local")], SyncPolicy::Append);
    sync_once(&mut app, &remote_for(&mock_server)).await;

    assert_eq!(app.store.len(), 3);
    assert_eq!(app.store.quotes()[0], quote("Mine.", "Local"));
    assert_eq!(app.categories, vec!["Local", "Server"]);
}

#[tokio::test]
async fn test_push_unsynced_posts_each_local_quote() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 101})))
        .expect(2)
        .mount(&mock_server)
        .await;

    let mut app = app_with(
        vec![
            quote("One.", "Local"),
            quote("From server.", "Server"),
            quote("Two.", "Other"),
        ],
        SyncPolicy::PushUnsynced,
    );
    sync_once(&mut app, &remote_for(&mock_server)).await;

    // Store untouched; only non-server quotes were sent.
    assert_eq!(app.store.len(), 3);
    assert_eq!(
        app.notifications.back().unwrap().message,
        "Quotes synced with server: 2 sent."
    );
}

#[tokio::test]
async fn test_failed_cycle_keeps_store_and_reports_once() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let mut app = app_with(vec![quote("Mine.", "Local")], SyncPolicy::Replace);
    sync_once(&mut app, &remote_for(&mock_server)).await;

    assert_eq!(app.store.quotes(), &[quote("Mine.", "Local")]);
    assert!(!app.is_syncing());
    let last = &app.notifications.back().unwrap().message;
    assert!(last.starts_with("Failed to sync quotes with server"));
    assert!(last.contains("503"));
}

#[tokio::test]
async fn test_run_cycle_directly_with_batch_size() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("_limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts(2)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let job = SyncJob::plan(SyncPolicy::Replace, &[], 2, "Remote");
    let outcome = run_cycle(&remote_for(&mock_server), &job).await.unwrap();
    assert_eq!(
        outcome,
        SyncOutcome::Replace(vec![
            quote("remote title 1", "Remote"),
            quote("remote title 2", "Remote"),
        ])
    );
}
