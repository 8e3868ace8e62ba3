// Profanity check handlers — one endpoint per classifier backend.
//
// POST /fasttext            — local fastText supervised model
// POST /profanity_validator — hosted LLM judgment
// POST /transformer         — language-routed transformer models
//
// Each handler converts engine failures into the structured
// {status, message, responseData} payload instead of propagating; nothing
// here is retried or fatal to the process.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::{error, info};

use crate::classify::fasttext::OFFENSIVE_LABEL;
use crate::classify::router::round2;
use crate::language::LanguageGroup;
use crate::llm::profanity as llm_profanity;
use crate::output::truncate_chars;
use crate::web::{service_error, AppState};

#[derive(Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Deserialize)]
pub struct TransformerRequest {
    pub text: String,
    /// Caller's claimed language group ("english" or "indic").
    pub language: Option<String>,
}

/// POST /fasttext — binary offensive-language check.
pub async fn check_fasttext(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Response {
    info!(text = %truncate_chars(&req.text, 80), "fastText profanity check");

    let Some(classifier) = state.fasttext.as_ref() else {
        error!("fastText model not loaded");
        return service_error(StatusCode::INTERNAL_SERVER_ERROR, "fastText model not loaded");
    };

    match classifier.predict(&req.text) {
        Ok(verdict) => {
            let profane = verdict.label == OFFENSIVE_LABEL;
            Json(serde_json::json!({
                "status": "success",
                "message": "Profanity check completed",
                "responseData": {
                    "word": req.text,
                    "isProfane": profane,
                    "confidence": round2(verdict.confidence * 100.0),
                    "category": if profane { "profane" } else { "clean" },
                }
            }))
            .into_response()
        }
        Err(e) => {
            error!(error = %e, "fastText prediction failed");
            service_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

/// POST /profanity_validator — free-form judgment by the hosted LLM.
pub async fn check_llm(State(state): State<AppState>, Json(req): Json<TextRequest>) -> Response {
    info!(text = %truncate_chars(&req.text, 80), "LLM profanity check");

    let prompt = llm_profanity::prompt(&req.text);
    let schema = llm_profanity::schema();

    let reply = match state.llm.generate_json(&prompt, &schema).await {
        Ok(reply) => reply,
        Err(e) => {
            error!(error = %e, "LLM profanity call failed");
            return service_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string());
        }
    };

    match llm_profanity::parse_judgment(&reply) {
        Ok(judgment) => Json(serde_json::json!({
            "status": "success",
            "message": "Profanity check completed",
            "responseData": {
                "word": req.text,
                "isProfane": judgment.contains_profanity,
                "confidence": judgment.confidence,
                "category": if judgment.contains_profanity { "profane" } else { "clean" },
                "reasoning": judgment.reasoning,
            }
        }))
        .into_response(),
        Err(e) => {
            error!(error = %e, "LLM profanity reply unparsable");
            service_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

/// POST /transformer — language-routed transformer check.
pub async fn check_transformer(
    State(state): State<AppState>,
    Json(req): Json<TransformerRequest>,
) -> Response {
    if req.text.trim().is_empty() {
        return service_error(StatusCode::BAD_REQUEST, "Input text is empty");
    }

    let user_language = match req.language.as_deref() {
        None => None,
        Some("english") => Some(LanguageGroup::English),
        Some("indic") => Some(LanguageGroup::Indic),
        Some(other) => {
            return service_error(
                StatusCode::BAD_REQUEST,
                &format!("Unrecognized language '{other}' — expected 'english' or 'indic'"),
            );
        }
    };

    info!(text = %truncate_chars(&req.text, 80), "transformer profanity check");

    match state.transformers.classify(&req.text).await {
        Ok(verdict) => {
            let language_match = user_language.map(|claimed| claimed == verdict.group);

            let mut payload = serde_json::json!({
                "status": "success",
                "message": "Profanity check completed (transformer)",
                "responseData": {
                    "word": req.text,
                    "isProfane": verdict.profane,
                    "confidence": verdict.confidence,
                    "category": verdict.category,
                    "detected_language": verdict.bucket.as_mixed_english(),
                    "detected_language_group": verdict.group.as_str(),
                    "user_language": req.language,
                    "language_match": language_match,
                }
            });
            // toxic_labels only exists on the English branch.
            if verdict.group == LanguageGroup::English {
                payload["responseData"]["toxic_labels"] =
                    serde_json::json!(verdict.toxic_labels);
            }

            Json(payload).into_response()
        }
        Err(e) => {
            error!(error = %e, "transformer classification failed");
            service_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Transformer model error: {e}"),
            )
        }
    }
}
