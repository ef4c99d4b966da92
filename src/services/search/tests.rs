//! Tests for the moving-target search service

use super::*;
use crate::config::ApiLayout;
use crate::error::CatchError;
use crate::mocks::MockTransport;
use http::Method;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use url::Url;

fn service(transport: Arc<MockTransport>, layout: ApiLayout) -> SearchServiceImpl {
    let base_url = Url::parse("https://catch-api.astro.umd.edu").unwrap();
    SearchServiceImpl::new(transport, base_url, layout)
}

#[tokio::test]
async fn test_query_hits_v3_search_route() {
    let transport = Arc::new(MockTransport::new());
    transport.push_json(json!({
        "job_id": "abcdef01-0000-4000-8000-000000000000",
        "queued": false,
        "results": "https://catch-api.astro.umd.edu/caught/abcdef01"
    }));

    let service = service(transport.clone(), ApiLayout::V3);
    let response = service.query(&MovingTargetQuery::new("65P")).await.unwrap();

    assert!(!response.queued);
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, Method::GET);
    assert!(requests[0].1.starts_with("https://catch-api.astro.umd.edu/catch?"));
    assert!(requests[0].1.contains("target=65P"));
    assert!(requests[0].1.contains("cached=true"));
}

#[tokio::test]
async fn test_query_hits_legacy_moving_route() {
    let transport = Arc::new(MockTransport::new());
    transport.push_json(json!({"job_id": "x", "queued": false}));

    let service = service(transport.clone(), ApiLayout::V2Moving);
    service.query(&MovingTargetQuery::new("65P")).await.unwrap();

    let url = &transport.requests()[0].1;
    assert!(url.starts_with("https://catch-api.astro.umd.edu/query/moving?"));
}

#[tokio::test]
async fn test_query_encodes_optional_parameters() {
    let transport = Arc::new(MockTransport::new());
    transport.push_json(json!({"queued": false}));

    let query = MovingTargetQuery::new("65P")
        .with_source("neat_palomar_tricam")
        .with_source("neat_maui_geodss")
        .with_start_date("2020-01-01")
        .with_stop_date("2021-01-01")
        .with_padding(2.0)
        .with_uncertainty_ellipse()
        .force();

    let service = service(transport.clone(), ApiLayout::V3);
    service.query(&query).await.unwrap();

    let url = &transport.requests()[0].1;
    assert!(url.contains("sources=neat_palomar_tricam"));
    assert!(url.contains("sources=neat_maui_geodss"));
    assert!(url.contains("start_date=2020-01-01"));
    assert!(url.contains("stop_date=2021-01-01"));
    assert!(url.contains("padding=2"));
    assert!(url.contains("uncertainty_ellipse=true"));
    assert!(url.contains("cached=false"));
}

#[tokio::test]
async fn test_query_omits_unset_parameters() {
    let transport = Arc::new(MockTransport::new());
    transport.push_json(json!({"queued": false}));

    let service = service(transport.clone(), ApiLayout::V3);
    service.query(&MovingTargetQuery::new("65P")).await.unwrap();

    let url = &transport.requests()[0].1;
    assert!(!url.contains("sources="));
    assert!(!url.contains("padding="));
    assert!(!url.contains("uncertainty_ellipse"));
    assert!(!url.contains("start_date"));
}

#[tokio::test]
async fn test_query_rejects_empty_target() {
    let transport = Arc::new(MockTransport::new());
    let service = service(transport.clone(), ApiLayout::V3);

    let result = service.query(&MovingTargetQuery::new("")).await;
    assert!(matches!(result, Err(CatchError::Configuration(_))));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_query_surfaces_api_error() {
    let transport = Arc::new(MockTransport::new());
    transport.push_response(500, "internal server error");

    let service = service(transport, ApiLayout::V3);
    let result = service.query(&MovingTargetQuery::new("65P")).await;

    match result {
        Err(CatchError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "internal server error");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}
