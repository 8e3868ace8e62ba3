// POST /map_competencies — role → competency mapping via the hosted LLM,
// memoized in the cache.
//
// Cache key: role_mapping:{organization}:{role_title}. A hit returns the
// stored payload without touching the LLM; a miss calls the model, stores
// the parsed result with the configured TTL, and returns it. Any LLM or
// parse failure collapses to the fixed "Malformed LLM response" payload.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::framework::CompetencyItem;
use crate::llm::role_mapping as llm_mapping;
use crate::web::AppState;

#[derive(Deserialize)]
pub struct RoleMappingRequest {
    pub organization: String,
    pub role_title: String,
    pub department: Option<String>,
}

/// Build the cache key for one organization/role pair.
pub fn cache_key(organization: &str, role_title: &str) -> String {
    format!("role_mapping:{organization}:{role_title}")
}

pub async fn map_competencies(
    State(state): State<AppState>,
    Json(req): Json<RoleMappingRequest>,
) -> Response {
    let Some(framework) = state.framework.as_ref() else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "status": "error",
                "message": "Competency framework not loaded",
            })),
        )
            .into_response();
    };

    let key = cache_key(&req.organization, &req.role_title);
    match state.cache.get(&key).await {
        Ok(Some(cached)) => {
            if let Ok(responsedata) = serde_json::from_str::<serde_json::Value>(&cached) {
                info!(key = %key, "role mapping cache hit");
                return success_envelope(responsedata);
            }
            warn!(key = %key, "cached role mapping unreadable, remapping");
        }
        Ok(None) => info!(key = %key, "role mapping cache miss"),
        Err(e) => warn!(error = %e, key = %key, "cache lookup failed, mapping without it"),
    }

    let prompt = llm_mapping::prompt(
        &framework.to_string(),
        &req.organization,
        &req.role_title,
        req.department.as_deref(),
    );
    let schema = llm_mapping::schema();

    let reply = match state.llm.generate_json(&prompt, &schema).await {
        Ok(reply) => reply,
        Err(e) => {
            error!(error = %e, "LLM role mapping call failed");
            return malformed_llm_response();
        }
    };

    let parsed = match llm_mapping::parse_reply(&reply) {
        Ok(parsed) => parsed,
        Err(e) => {
            error!(error = %e, "Malformed LLM response");
            return malformed_llm_response();
        }
    };

    let mapped: Vec<CompetencyItem> = parsed
        .mapped_competencies
        .into_iter()
        .map(|c| CompetencyItem {
            category: c.category,
            theme: c.theme,
            sub_themes: c.sub_themes,
            relevance: Some(c.confidence.map_or_else(String::new, |v| v.to_string())),
        })
        .collect();

    let responsedata = serde_json::json!({
        "organization": parsed.organization,
        "role_title": parsed.role_title,
        "mapped_competencies": mapped,
        "mapping_rationale": parsed.mapping_rationale,
    });

    if let Err(e) = state
        .cache
        .set_with_expiry(&key, &responsedata.to_string(), state.config.cache_expiry_secs)
        .await
    {
        warn!(error = %e, key = %key, "failed to cache role mapping");
    }

    success_envelope(responsedata)
}

fn success_envelope(responsedata: serde_json::Value) -> Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "success",
            "status_code": 200,
            "responsedata": responsedata,
        })),
    )
        .into_response()
}

fn malformed_llm_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "status": "error",
            "status_code": 500,
            "status_msg": "Malformed LLM response",
            "responsedata": null,
        })),
    )
        .into_response()
}
