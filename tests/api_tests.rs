// End-to-end tests for the HTTP surface: frames go in through the ingest
// path, responses come out through the router.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use fm_monitor::control::{ControlError, ControlPlane, ControlResult};
use fm_monitor::{
    apply_frame, create_router, AppState, MonitorStore, ScopeKind, SelectionCoordinator,
    StationCatalog, Topic, SCOPE_MAX_SAMPLES,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct StubControlPlane {
    fail_station_code: bool,
}

#[async_trait]
impl ControlPlane for StubControlPlane {
    async fn set_source_file(&self, _file: &str) -> ControlResult<()> {
        Ok(())
    }

    async fn set_station_code(&self, _code: &str) -> ControlResult<()> {
        if self.fail_station_code {
            Err(ControlError::InvalidResponse(
                "flowgraph offline".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

fn test_app(fail_station_code: bool) -> (axum::Router, Arc<MonitorStore>) {
    let store = Arc::new(MonitorStore::new());
    let catalog = Arc::new(StationCatalog::builtin());
    let selection = Arc::new(SelectionCoordinator::new(
        catalog.clone(),
        Arc::new(StubControlPlane { fail_station_code }),
        store.clone(),
    ));
    let router = create_router(AppState {
        store: store.clone(),
        catalog,
        selection,
    });
    (router, store)
}

async fn get_json(router: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .expect("request failed");

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap_or(json!({}));
    (status, json)
}

async fn post_json(router: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .expect("request failed");

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap_or(json!({}));
    (status, json)
}

#[tokio::test]
async fn test_state_starts_with_defaults() {
    let (router, _) = test_app(false);
    let (status, body) = get_json(&router, "/api/state").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ps"], "");
    assert_eq!(body["rt"], "");
    assert_eq!(body["t"], 0.0);
    assert_eq!(body["last_rx"], 0.0);
    assert_eq!(body["selected"], Value::Null);
}

#[tokio::test]
async fn test_text_ingest_is_visible_over_http() {
    let (router, store) = test_app(false);

    apply_frame(
        &store,
        Topic::Text,
        &serde_json::to_vec(&json!({"ps": "FRANCEINTER", "rt": "hello", "t": 100.0})).unwrap(),
    )
    .unwrap();
    apply_frame(
        &store,
        Topic::Text,
        &serde_json::to_vec(&json!({"ps": "FRANCEINTER", "rt": "hello2", "t": 100.5})).unwrap(),
    )
    .unwrap();

    let (status, body) = get_json(&router, "/api/state").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ps"], "FRANCEINTER");
    assert_eq!(body["rt"], "hello2");
    assert_eq!(body["t"], 100.5);
    assert!(body["last_rx"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_scope_truncation_visible_over_http() {
    let (router, store) = test_app(false);

    let samples: Vec<f64> = (1..=1500).map(|v| v as f64).collect();
    let frame = json!({"y": samples, "sr": 44100.0, "rms": 0.1, "peak": 0.9, "t": 7.0});
    apply_frame(
        &store,
        Topic::Scope(ScopeKind::Audio),
        &serde_json::to_vec(&frame).unwrap(),
    )
    .unwrap();

    let (status, body) = get_json(&router, "/api/audio").await;
    assert_eq!(status, StatusCode::OK);
    let y = body["y"].as_array().unwrap();
    assert_eq!(y.len(), SCOPE_MAX_SAMPLES);
    assert_eq!(y[0].as_f64().unwrap(), 101.0);
    assert_eq!(y[y.len() - 1].as_f64().unwrap(), 1500.0);
}

#[tokio::test]
async fn test_all_returns_composite_snapshot() {
    let (router, store) = test_app(false);

    apply_frame(
        &store,
        Topic::Text,
        &serde_json::to_vec(&json!({"ps": "FIP", "rt": "jazz", "t": 1.0})).unwrap(),
    )
    .unwrap();
    apply_frame(
        &store,
        Topic::Constellation,
        &serde_json::to_vec(&json!({"i": [1.0, -1.0], "q": [0.5, -0.5], "t": 2.0})).unwrap(),
    )
    .unwrap();

    let (status, body) = get_json(&router, "/api/all").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["ps"], "FIP");
    assert!(body["audio"]["y"].as_array().unwrap().is_empty());
    assert!(body["rds_scope"].is_object());
    assert_eq!(body["const"]["n"], 2);
    assert_eq!(body["const"]["i"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_stations_listing_has_no_flowgraph_parameters() {
    let (router, _) = test_app(false);
    let (status, body) = get_json(&router, "/api/stations").await;

    assert_eq!(status, StatusCode::OK);
    let stations = body.as_array().unwrap();
    assert_eq!(stations.len(), 4);
    assert_eq!(stations[0]["name"], "France Inter");
    assert_eq!(stations[0]["freq"], 87.8);
    assert!(stations[0].get("file").is_none());
    assert!(stations[0].get("code").is_none());
}

#[tokio::test]
async fn test_select_success_records_station() {
    let (router, _) = test_app(false);

    let (status, body) = post_json(&router, "/api/select", json!({"name": "France Musique"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert!(body.get("error").is_none());

    let (_, state) = get_json(&router, "/api/state").await;
    assert_eq!(state["selected"], "France Musique");
}

#[tokio::test]
async fn test_select_unknown_station_is_rejected() {
    let (router, _) = test_app(false);

    let (status, body) = post_json(&router, "/api/select", json!({"name": "Radio Nowhere"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "unknown station");

    let (_, state) = get_json(&router, "/api/state").await;
    assert_eq!(state["selected"], Value::Null);
}

#[tokio::test]
async fn test_select_missing_name_is_rejected() {
    let (router, _) = test_app(false);
    let (status, body) = post_json(&router, "/api/select", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "unknown station");
}

#[tokio::test]
async fn test_select_control_failure_keeps_previous_selection() {
    let (router, store) = test_app(true);
    store.set_selected("France Musique");

    let (status, body) = post_json(&router, "/api/select", json!({"name": "France Inter"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["ok"], false);
    assert!(body["error"].as_str().unwrap().contains("flowgraph offline"));

    let (_, state) = get_json(&router, "/api/state").await;
    assert_eq!(state["selected"], "France Musique");
}

#[tokio::test]
async fn test_api_responses_are_not_cacheable() {
    let (router, _) = test_app(false);

    for uri in ["/api/state", "/api/all", "/api/stations", "/api/health"] {
        let response = router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-store, no-cache, must-revalidate, max-age=0",
            "missing no-store on {}",
            uri
        );
        assert_eq!(response.headers().get(header::PRAGMA).unwrap(), "no-cache");
    }
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let (router, _) = test_app(false);
    let (status, body) = get_json(&router, "/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn test_health_endpoint() {
    let (router, _) = test_app(false);
    let (status, body) = get_json(&router, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].as_str().is_some());
}
