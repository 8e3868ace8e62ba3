// Web server — Axum JSON API.
//
// All routes serve JSON. State is a bundle of explicitly constructed
// services shared via Arc — no process-wide singletons, no lazy statics.
// Classifier engines that failed to load at startup are simply absent and
// their endpoints answer with a structured 500.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::cache::traits::Cache;
use crate::classify::fasttext::FastTextClassifier;
use crate::classify::router::TransformerSuite;
use crate::config::Config;
use crate::llm::traits::GenerativeModel;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cache: Arc<dyn Cache>,
    pub llm: Arc<dyn GenerativeModel>,
    pub fasttext: Option<Arc<FastTextClassifier>>,
    pub transformers: Arc<TransformerSuite>,
    pub framework: Option<Arc<serde_json::Value>>,
}

/// Start the web server and block until it exits.
pub async fn run_server(state: AppState, port: u16, bind: &str) -> Result<()> {
    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("muzzle listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/fasttext", post(handlers::profanity::check_fasttext))
        .route("/profanity_validator", post(handlers::profanity::check_llm))
        .route("/transformer", post(handlers::profanity::check_transformer))
        .route("/detect_language", post(handlers::language::detect_language))
        .route(
            "/map_competencies",
            post(handlers::role_mapping::map_competencies),
        )
        .route("/health", get(handlers::health::health))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Structured error payload shared by the profanity endpoints.
pub fn service_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        axum::Json(serde_json::json!({
            "status": "error",
            "message": message,
            "responseData": null,
        })),
    )
        .into_response()
}
