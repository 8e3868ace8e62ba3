// GET /health — cache connectivity plus competency-framework load state.
//
// Always answers 200 so container healthchecks can read the JSON body;
// the status field carries the actual verdict.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::web::AppState;

pub async fn health(State(state): State<AppState>) -> Response {
    match state.cache.ping().await {
        Ok(()) => Json(serde_json::json!({
            "status": "healthy",
            "redis": "connected",
            "competency_framework": if state.framework.is_some() { "loaded" } else { "not_loaded" },
        }))
        .into_response(),
        Err(e) => Json(serde_json::json!({
            "status": "unhealthy",
            "error": e.to_string(),
        }))
        .into_response(),
    }
}
