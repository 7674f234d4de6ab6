// handlers/system.rs - Service description and health probe

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// GET / - Name, version and route map
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Daily Bright API",
            "version": version,
            "description": "Journaling API with per-account reflection entries and heuristic feedback",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "public_auth": "/auth/signup, /auth/signin, /auth/refresh (public - token acquisition)",
                "auth": "/auth/whoami (protected)",
                "entries": "/entries[/:id] (protected)",
                "feedback": "/feedback (public, saves to an entry when authenticated)",
            }
        }
    }))
}

/// GET /health - 200 when storage answers, 503 otherwise
pub async fn health(State(state): State<AppState>) -> Response {
    match state.entries.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": chrono::Utc::now(),
                    "database": "ok"
                }
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            ApiError::service_unavailable("database unavailable").into_response()
        }
    }
}
