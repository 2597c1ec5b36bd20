// Request handlers
//
// Every handler is a thin read or command against the shared state; the
// ingestion pipeline keeps the store current in the background.

use crate::api::AppState;
use crate::catalog::StationListing;
use crate::selection::SelectError;
use crate::telemetry::{ConstellationState, MonitorSnapshot, ScopeKind, ScopeState, TextState};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub async fn get_text_state(State(state): State<AppState>) -> Json<TextState> {
    Json(state.store.text())
}

pub async fn get_audio_scope(State(state): State<AppState>) -> Json<ScopeState> {
    Json(state.store.scope(ScopeKind::Audio))
}

pub async fn get_rds_scope(State(state): State<AppState>) -> Json<ScopeState> {
    Json(state.store.scope(ScopeKind::Rds))
}

pub async fn get_constellation(State(state): State<AppState>) -> Json<ConstellationState> {
    Json(state.store.constellation())
}

/// One request for everything: the composite snapshot.
pub async fn get_all(State(state): State<AppState>) -> Json<MonitorSnapshot> {
    Json(state.store.snapshot())
}

pub async fn get_stations(State(state): State<AppState>) -> Json<Vec<StationListing>> {
    Json(state.catalog.listing())
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct SelectResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn post_select(
    State(state): State<AppState>,
    Json(request): Json<SelectRequest>,
) -> (StatusCode, Json<SelectResponse>) {
    match state.selection.select(&request.name).await {
        Ok(()) => (
            StatusCode::OK,
            Json(SelectResponse {
                ok: true,
                error: None,
            }),
        ),
        Err(e) => {
            warn!("station select {:?} failed: {}", request.name, e);
            let status = match e {
                SelectError::UnknownStation(_) => StatusCode::BAD_REQUEST,
                SelectError::ControlPlane(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (
                status,
                Json(SelectResponse {
                    ok: false,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
