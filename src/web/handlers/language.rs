// POST /detect_language — script-bucket detection with a minimum-length
// gate. No model involved: this is the pure script counter exposed
// directly.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::language::detect_script;

/// Texts shorter than this (after trimming) carry too little signal for
/// the per-script ratio to mean anything.
const MIN_CHARS: usize = 5;

#[derive(Deserialize)]
pub struct DetectLanguageRequest {
    pub text: String,
}

pub async fn detect_language(Json(req): Json<DetectLanguageRequest>) -> Response {
    if req.text.trim().chars().count() < MIN_CHARS {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "status": "error",
                "message": format!("Input text must be at least {MIN_CHARS} characters."),
                "detected_language": null,
            })),
        )
            .into_response();
    }

    let bucket = detect_script(&req.text);

    Json(serde_json::json!({
        "status": "success",
        "detected_language": bucket.group().as_str(),
        "raw": bucket.as_plain_english(),
    }))
    .into_response()
}
