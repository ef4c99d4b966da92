//! Tests for stream protocols and the job-completion watcher

use super::*;
use crate::config::{ApiLayout, StreamProtocolVersion};
use crate::error::CatchError;
use crate::mocks::MockTransport;
use crate::services::caught::CaughtServiceImpl;
use crate::services::search::SearchResponse;
use bytes::Bytes;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::{Arc, Mutex};
use url::Url;

const JOB_ID: &str = "abcdef01-0000-4000-8000-000000000000";

/// Observer that collects progress text for assertions
struct CollectingObserver {
    texts: Mutex<Vec<String>>,
}

impl CollectingObserver {
    fn new() -> Self {
        Self {
            texts: Mutex::new(Vec::new()),
        }
    }

    fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

impl ProgressObserver for CollectingObserver {
    fn on_progress(&self, text: &str) {
        self.texts.lock().unwrap().push(text.to_string());
    }
}

fn watcher(
    transport: Arc<MockTransport>,
    version: StreamProtocolVersion,
    observer: Arc<CollectingObserver>,
) -> JobWatcher {
    let base_url = Url::parse("https://catch-api.astro.umd.edu").unwrap();
    let caught = Arc::new(CaughtServiceImpl::new(
        transport.clone(),
        base_url.clone(),
        ApiLayout::V3,
    ));
    JobWatcher::new(
        transport,
        caught,
        base_url,
        ApiLayout::V3,
        protocol_for(version),
    )
    .with_observer(observer)
}

fn queued_response() -> SearchResponse {
    serde_json::from_value(json!({
        "queued": true,
        "job_id": JOB_ID,
        "results": "https://x/y"
    }))
    .unwrap()
}

fn cached_response() -> SearchResponse {
    serde_json::from_value(json!({
        "queued": false,
        "job_id": JOB_ID,
        "results": "https://x/y"
    }))
    .unwrap()
}

// ============================================================================
// Protocol: prefix/status records
// ============================================================================

#[test]
fn test_prefix_protocol_matching_running_is_not_terminal() {
    let update = PrefixStatusProtocol
        .interpret(
            r#"{"job_prefix":"abcdef01","status":"running","text":"working"}"#,
            JOB_ID,
        )
        .unwrap();

    assert_eq!(update.state, Some(JobState::Running));
    assert_eq!(update.text.as_deref(), Some("working"));
    assert!(!update.is_terminal());
}

#[test]
fn test_prefix_protocol_success_and_error_are_terminal() {
    for status in ["success", "error"] {
        let payload = format!(r#"{{"job_prefix":"abcdef01","status":"{}","text":"t"}}"#, status);
        let update = PrefixStatusProtocol.interpret(&payload, JOB_ID).unwrap();
        assert!(update.is_terminal(), "{} must be terminal", status);
    }

    for status in ["queued", "running"] {
        let payload = format!(r#"{{"job_prefix":"abcdef01","status":"{}","text":"t"}}"#, status);
        let update = PrefixStatusProtocol.interpret(&payload, JOB_ID).unwrap();
        assert!(!update.is_terminal(), "{} must not be terminal", status);
    }
}

#[test]
fn test_prefix_protocol_ignores_other_jobs() {
    let payload = r#"{"job_prefix":"01fedcba","status":"success","text":"done"}"#;
    assert_eq!(PrefixStatusProtocol.interpret(payload, JOB_ID), None);
}

#[test]
fn test_prefix_protocol_skips_keepalives_and_malformed() {
    // non-JSON
    assert_eq!(PrefixStatusProtocol.interpret("not json {", JOB_ID), None);
    // JSON but not an object
    assert_eq!(PrefixStatusProtocol.interpret("[1, 2]", JOB_ID), None);
    assert_eq!(PrefixStatusProtocol.interpret("42", JOB_ID), None);
    assert_eq!(PrefixStatusProtocol.interpret("\"ping\"", JOB_ID), None);
    // object without a prefix
    assert_eq!(PrefixStatusProtocol.interpret("{}", JOB_ID), None);
}

#[test]
fn test_prefix_protocol_unknown_status_surfaces_but_never_terminates() {
    let payload = r#"{"job_prefix":"abcdef01","status":"mystery","text":"odd"}"#;
    let update = PrefixStatusProtocol.interpret(payload, JOB_ID).unwrap();
    assert_eq!(update.state, None);
    assert_eq!(update.text.as_deref(), Some("odd"));
    assert!(!update.is_terminal());
}

// ============================================================================
// Protocol: bare job-ID echo
// ============================================================================

#[test]
fn test_bare_protocol_exact_match_is_terminal() {
    let update = BareJobIdProtocol.interpret(JOB_ID, JOB_ID).unwrap();
    assert!(update.is_terminal());
    assert_eq!(update.text, None);
}

#[test]
fn test_bare_protocol_tolerates_surrounding_whitespace() {
    let payload = format!("{}\n", JOB_ID);
    assert!(BareJobIdProtocol.interpret(&payload, JOB_ID).is_some());
}

#[test]
fn test_bare_protocol_ignores_everything_else() {
    assert_eq!(
        BareJobIdProtocol.interpret("ffffffff-0000-4000-8000-000000000000", JOB_ID),
        None
    );
    assert_eq!(BareJobIdProtocol.interpret("abcdef01", JOB_ID), None);
    assert_eq!(BareJobIdProtocol.interpret("", JOB_ID), None);
}

// ============================================================================
// Watcher
// ============================================================================

#[tokio::test]
async fn test_cached_response_skips_stream_and_fetches_once() {
    let transport = Arc::new(MockTransport::new());
    transport.push_json(json!({"count": 1, "data": [{"a": 1}]}));

    let observer = Arc::new(CollectingObserver::new());
    let watcher = watcher(
        transport.clone(),
        StreamProtocolVersion::PrefixStatus,
        observer,
    );

    let caught = watcher.await_completion(&cached_response()).await.unwrap();

    assert_eq!(caught.count, 1);
    assert_eq!(transport.stream_subscription_count(), 0);
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].1, "https://x/y");
}

#[tokio::test]
async fn test_missing_results_url_fails_with_server_message() {
    let transport = Arc::new(MockTransport::new());
    let observer = Arc::new(CollectingObserver::new());
    let watcher = watcher(
        transport.clone(),
        StreamProtocolVersion::PrefixStatus,
        observer,
    );

    let response: SearchResponse =
        serde_json::from_value(json!({"queued": false, "message": "queue is full"})).unwrap();

    match watcher.await_completion(&response).await {
        Err(CatchError::SearchFailed { message }) => assert_eq!(message, "queue is full"),
        other => panic!("expected SearchFailed, got {:?}", other),
    }
    assert_eq!(transport.stream_subscription_count(), 0);
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_missing_results_url_without_message_uses_fallback() {
    let transport = Arc::new(MockTransport::new());
    let observer = Arc::new(CollectingObserver::new());
    let watcher = watcher(transport, StreamProtocolVersion::PrefixStatus, observer);

    let response: SearchResponse = serde_json::from_value(json!({"queued": true})).unwrap();

    match watcher.await_completion(&response).await {
        Err(CatchError::SearchFailed { message }) => assert_eq!(message, "unknown error"),
        other => panic!("expected SearchFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_queued_job_consumes_stream_until_success_then_fetches() {
    let transport = Arc::new(MockTransport::new());
    transport.push_stream(vec![
        "data: {\"job_prefix\":\"abcdef01\",\"status\":\"running\",\"text\":\"searching\"}\n\n",
        "data: {\"job_prefix\":\"abcdef01\",\"status\":\"success\",\"text\":\"done\"}\n\n",
    ]);
    transport.push_json(json!({"count": 2, "data": [{"a": 1}, {"a": 2}]}));

    let observer = Arc::new(CollectingObserver::new());
    let watcher = watcher(
        transport.clone(),
        StreamProtocolVersion::PrefixStatus,
        observer.clone(),
    );

    let caught = watcher.await_completion(&queued_response()).await.unwrap();

    assert_eq!(caught.count, 2);
    assert_eq!(observer.texts(), vec!["searching", "done"]);
    assert_eq!(transport.stream_subscription_count(), 1);
    // exactly one plain request: the results fetch
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].1, "https://x/y");
}

#[tokio::test]
async fn test_watcher_stops_at_first_terminal_message() {
    let transport = Arc::new(MockTransport::new());
    transport.push_stream(vec![
        "data: {\"job_prefix\":\"abcdef01\",\"status\":\"success\",\"text\":\"done\"}\n\n",
        "data: {\"job_prefix\":\"abcdef01\",\"status\":\"running\",\"text\":\"late\"}\n\n",
    ]);
    transport.push_json(json!({"count": 0, "data": []}));

    let observer = Arc::new(CollectingObserver::new());
    let watcher = watcher(
        transport.clone(),
        StreamProtocolVersion::PrefixStatus,
        observer.clone(),
    );

    watcher.await_completion(&queued_response()).await.unwrap();

    // nothing after the terminal message is surfaced
    assert_eq!(observer.texts(), vec!["done"]);
}

#[tokio::test]
async fn test_watcher_ignores_other_jobs_and_keepalives() {
    let transport = Arc::new(MockTransport::new());
    transport.push_stream(vec![
        // keep-alive comment event, empty data event
        ": ping\n\n",
        "data: \n\n",
        // JSON scalar keep-alive and malformed JSON
        "data: 7\n\n",
        "data: {{{\n\n",
        // another job reaching success must not terminate our wait
        "data: {\"job_prefix\":\"01fedcba\",\"status\":\"success\",\"text\":\"other\"}\n\n",
        // finally ours
        "data: {\"job_prefix\":\"abcdef01\",\"status\":\"error\",\"text\":\"ephemeris failed\"}\n\n",
    ]);
    transport.push_json(json!({"message": "job failed"}));

    let observer = Arc::new(CollectingObserver::new());
    let watcher = watcher(
        transport.clone(),
        StreamProtocolVersion::PrefixStatus,
        observer.clone(),
    );

    // error status ends the wait; the results fetch then reports the failure
    let result = watcher.await_completion(&queued_response()).await;
    match result {
        Err(CatchError::SearchFailed { message }) => assert_eq!(message, "job failed"),
        other => panic!("expected SearchFailed, got {:?}", other),
    }
    assert_eq!(observer.texts(), vec!["ephemeris failed"]);
}

#[tokio::test]
async fn test_event_split_across_chunks() {
    let transport = Arc::new(MockTransport::new());
    transport.push_stream(vec![
        "data: {\"job_prefix\":\"abc",
        "def01\",\"status\":\"succ",
        "ess\",\"text\":\"done\"}\n\n",
    ]);
    transport.push_json(json!({"count": 0, "data": []}));

    let observer = Arc::new(CollectingObserver::new());
    let watcher = watcher(
        transport.clone(),
        StreamProtocolVersion::PrefixStatus,
        observer.clone(),
    );

    watcher.await_completion(&queued_response()).await.unwrap();
    assert_eq!(observer.texts(), vec!["done"]);
}

#[tokio::test]
async fn test_stream_ending_early_is_stream_unavailable() {
    let transport = Arc::new(MockTransport::new());
    transport.push_stream(vec![
        "data: {\"job_prefix\":\"abcdef01\",\"status\":\"running\",\"text\":\"searching\"}\n\n",
    ]);

    let observer = Arc::new(CollectingObserver::new());
    let watcher = watcher(
        transport.clone(),
        StreamProtocolVersion::PrefixStatus,
        observer,
    );

    let result = watcher.await_completion(&queued_response()).await;
    assert!(matches!(result, Err(CatchError::StreamUnavailable(_))));
    // no results fetch after a failed wait
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_stream_transport_error_propagates() {
    let transport = Arc::new(MockTransport::new());
    transport.push_stream_items(vec![
        Ok(Bytes::from_static(b"data: 1\n\n")),
        Err(CatchError::StreamUnavailable("connection reset".to_string())),
    ]);

    let observer = Arc::new(CollectingObserver::new());
    let watcher = watcher(
        transport.clone(),
        StreamProtocolVersion::PrefixStatus,
        observer,
    );

    let result = watcher.await_completion(&queued_response()).await;
    assert!(matches!(result, Err(CatchError::StreamUnavailable(_))));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_bare_id_protocol_end_to_end() {
    let transport = Arc::new(MockTransport::new());
    transport.push_stream(vec![
        "data: ffffffff-0000-4000-8000-000000000000\n\n",
        "data: abcdef01-0000-4000-8000-000000000000\n\n",
    ]);
    transport.push_json(json!({"count": 1, "data": [{"a": 1}]}));

    let observer = Arc::new(CollectingObserver::new());
    let watcher = watcher(
        transport.clone(),
        StreamProtocolVersion::BareJobId,
        observer.clone(),
    );

    let caught = watcher.await_completion(&queued_response()).await.unwrap();
    assert_eq!(caught.count, 1);
    // the echo protocol has no progress text
    assert!(observer.texts().is_empty());
}

#[tokio::test]
async fn test_zero_count_results_are_empty_not_error() {
    let transport = Arc::new(MockTransport::new());
    transport.push_json(json!({"count": 0, "data": []}));

    let observer = Arc::new(CollectingObserver::new());
    let watcher = watcher(transport, StreamProtocolVersion::PrefixStatus, observer);

    let caught = watcher.await_completion(&cached_response()).await.unwrap();
    assert!(caught.is_empty());
}

#[tokio::test]
async fn test_results_without_data_fail_with_exact_message() {
    let transport = Arc::new(MockTransport::new());
    transport.push_json(json!({"message": "rate limited"}));

    let observer = Arc::new(CollectingObserver::new());
    let watcher = watcher(transport, StreamProtocolVersion::PrefixStatus, observer);

    match watcher.await_completion(&cached_response()).await {
        Err(CatchError::SearchFailed { message }) => assert_eq!(message, "rate limited"),
        other => panic!("expected SearchFailed, got {:?}", other),
    }
}
