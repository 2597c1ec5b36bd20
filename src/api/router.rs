// Route table and response middleware

use crate::api::{handlers, AppState};
use axum::extract::Request;
use axum::http::header::{CACHE_CONTROL, PRAGMA};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/state", get(handlers::get_text_state))
        .route("/api/audio", get(handlers::get_audio_scope))
        .route("/api/rds_scope", get(handlers::get_rds_scope))
        .route("/api/const", get(handlers::get_constellation))
        .route("/api/all", get(handlers::get_all))
        .route("/api/stations", get(handlers::get_stations))
        .route("/api/select", post(handlers::post_select))
        .route("/api/health", get(handlers::health_check))
        .fallback(handle_404)
        .layer(middleware::from_fn(no_store_headers))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Polling clients must always see fresh data, never a cached response.
async fn no_store_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate, max-age=0"),
    );
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    response
}

async fn handle_404() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not found" })),
    )
}
