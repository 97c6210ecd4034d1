//! HTTP API routes
//!
//! Each route reads or drives the single shared location screen.

use crate::error::Error;
use crate::format::json::Snapshot;
use crate::server::state::AppState;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/screen", get(screen_handler))
        .route("/api/search", post(search_handler))
        .route("/api/refresh", post(refresh_handler))
        .route("/api/status", get(status_handler))
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code.as_str() {
            "SCREEN_CLOSED" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::BAD_REQUEST,
        };
        (status, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::ScreenClosed => "SCREEN_CLOSED",
            Error::Config(_) => "CONFIG_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

fn snapshot(state: &AppState) -> Snapshot {
    Snapshot::from(&state.screen.state())
}

/// Current screen
///
/// GET /api/screen
async fn screen_handler(State(state): State<Arc<AppState>>) -> Json<Snapshot> {
    Json(snapshot(&state))
}

/// Search request body
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Free-text place name; empty shows the validation error
    #[serde(default)]
    pub query: String,
}

/// Type a place name and submit it
///
/// POST /api/search
async fn search_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Result<(StatusCode, Json<Snapshot>), ApiError> {
    state.screen.search(req.query)?;
    Ok((StatusCode::ACCEPTED, Json(snapshot(&state))))
}

/// Press the refresh button
///
/// POST /api/refresh
async fn refresh_handler(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<Snapshot>), ApiError> {
    state.screen.refresh()?;
    Ok((StatusCode::ACCEPTED, Json(snapshot(&state))))
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Location provider in use
    pub provider: String,
    /// Geocoding service host
    pub geocoder: String,
    /// Whether the geocoder has an API key
    pub geocoder_configured: bool,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider: state.provider.clone(),
        geocoder: state.geocoder_url.clone(),
        geocoder_configured: state.geocoder_configured,
    })
}
