// Router-level tests — exercise the axum service with oneshot requests, a
// memory cache, and a counting mock LLM. No model files, no network, no
// Redis.
//
// The transformer/fastText success paths need real ONNX weights and are
// not exercised here; what is covered is every validation branch, the
// degraded no-model behavior, and the full role-mapping flow including the
// cache-hit guarantee (second identical request must not re-invoke the
// LLM).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use muzzle::cache::memory::MemoryCache;
use muzzle::classify::router::TransformerSuite;
use muzzle::config::Config;
use muzzle::llm::traits::GenerativeModel;
use muzzle::web::{build_router, AppState};

// ============================================================
// Test doubles and plumbing
// ============================================================

/// Mock LLM returning a canned reply and counting invocations.
struct MockModel {
    reply: String,
    calls: Arc<AtomicUsize>,
}

impl MockModel {
    fn new(reply: &str) -> (Arc<Self>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let model = Arc::new(Self {
            reply: reply.to_string(),
            calls: Arc::clone(&calls),
        });
        (model, calls)
    }
}

#[async_trait]
impl GenerativeModel for MockModel {
    async fn generate_json(&self, _prompt: &str, _schema: &serde_json::Value) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

/// State with no loaded models: memory cache, mock LLM, engines absent.
fn test_state(llm: Arc<dyn GenerativeModel>, framework: Option<serde_json::Value>) -> AppState {
    AppState {
        config: Arc::new(Config::load().unwrap()),
        cache: Arc::new(MemoryCache::new()),
        llm,
        fasttext: None,
        transformers: Arc::new(TransformerSuite {
            english: None,
            indic: None,
        }),
        framework: framework.map(Arc::new),
    }
}

fn noop_llm() -> Arc<dyn GenerativeModel> {
    let (model, _) = MockModel::new("{}");
    model
}

async fn request_json(
    router: axum::Router,
    method: &str,
    path: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    let request = builder
        .body(match body {
            Some(json) => Body::from(json.to_string()),
            None => Body::empty(),
        })
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

async fn post_json(
    router: axum::Router,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    request_json(router, "POST", path, Some(body)).await
}

/// A minimal valid mapping reply the mock LLM hands back.
fn mapping_reply() -> String {
    serde_json::json!({
        "organization": "Acme",
        "role_title": "Data Engineer",
        "mapped_competencies": [{
            "category": "Functional",
            "theme": "Data Engineering",
            "sub_themes": ["Pipelines", "Modeling"],
            "confidence": 92
        }],
        "mapping_rationale": "Core build-and-run data role."
    })
    .to_string()
}

// ============================================================
// /health
// ============================================================

#[tokio::test]
async fn health_reports_framework_not_loaded() {
    let router = build_router(test_state(noop_llm(), None));
    let (status, body) = request_json(router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["redis"], "connected");
    assert_eq!(body["competency_framework"], "not_loaded");
}

#[tokio::test]
async fn health_reports_framework_loaded() {
    let state = test_state(noop_llm(), Some(serde_json::json!({"themes": []})));
    let router = build_router(state);
    let (_, body) = request_json(router, "GET", "/health", None).await;
    assert_eq!(body["competency_framework"], "loaded");
}

// ============================================================
// /detect_language
// ============================================================

#[tokio::test]
async fn detect_language_rejects_short_text() {
    let router = build_router(test_state(noop_llm(), None));
    let (status, body) = post_json(router, "/detect_language", serde_json::json!({"text": "hi"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert!(body["detected_language"].is_null());
}

#[tokio::test]
async fn detect_language_trims_before_counting() {
    // Surrounding whitespace is stripped before the length check, so the
    // seven-character raw string still fails the five-character gate.
    let router = build_router(test_state(noop_llm(), None));
    let (status, _) = post_json(router, "/detect_language", serde_json::json!({"text": "  hi   "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn detect_language_identifies_indic() {
    let router = build_router(test_state(noop_llm(), None));
    let (status, body) =
        post_json(router, "/detect_language", serde_json::json!({"text": "नमस्ते"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["detected_language"], "indic");
    assert_eq!(body["raw"], "hindi");
}

#[tokio::test]
async fn detect_language_identifies_english() {
    let router = build_router(test_state(noop_llm(), None));
    let (status, body) = post_json(
        router,
        "/detect_language",
        serde_json::json!({"text": "hello there"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["detected_language"], "english");
    assert_eq!(body["raw"], "english");
}

// ============================================================
// /transformer validation and degraded paths
// ============================================================

#[tokio::test]
async fn transformer_rejects_empty_text() {
    let router = build_router(test_state(noop_llm(), None));
    let (status, body) = post_json(router, "/transformer", serde_json::json!({"text": "   "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Input text is empty");
}

#[tokio::test]
async fn transformer_rejects_unknown_language_hint() {
    let router = build_router(test_state(noop_llm(), None));
    let (status, body) = post_json(
        router,
        "/transformer",
        serde_json::json!({"text": "hello world", "language": "french"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn transformer_without_models_is_resource_error() {
    let router = build_router(test_state(noop_llm(), None));
    let (status, body) = post_json(
        router,
        "/transformer",
        serde_json::json!({"text": "hello world"}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("English toxicity model not loaded"));
}

// ============================================================
// /fasttext degraded path
// ============================================================

#[tokio::test]
async fn fasttext_without_model_is_resource_error() {
    let router = build_router(test_state(noop_llm(), None));
    let (status, body) = post_json(router, "/fasttext", serde_json::json!({"text": "whatever"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "fastText model not loaded");
    assert!(body["responseData"].is_null());
}

// ============================================================
// /profanity_validator
// ============================================================

#[tokio::test]
async fn profanity_validator_reports_llm_judgment() {
    let (model, calls) = MockModel::new(
        r#"{"contains_profanity": true, "confidence": 97, "reasoning": "contains an explicit slur"}"#,
    );
    let router = build_router(test_state(model, None));
    let (status, body) = post_json(
        router,
        "/profanity_validator",
        serde_json::json!({"text": "some offensive text"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["responseData"]["isProfane"], true);
    assert_eq!(body["responseData"]["category"], "profane");
    assert_eq!(body["responseData"]["confidence"], 97.0);
    assert_eq!(
        body["responseData"]["reasoning"],
        "contains an explicit slur"
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn profanity_validator_clean_verdict() {
    let (model, _) = MockModel::new(
        r#"{"contains_profanity": false, "confidence": 88, "reasoning": "ordinary greeting"}"#,
    );
    let router = build_router(test_state(model, None));
    let (status, body) = post_json(
        router,
        "/profanity_validator",
        serde_json::json!({"text": "good morning"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["responseData"]["isProfane"], false);
    assert_eq!(body["responseData"]["category"], "clean");
}

#[tokio::test]
async fn profanity_validator_unparsable_reply_is_error() {
    let (model, _) = MockModel::new("sorry, I can't help with that");
    let router = build_router(test_state(model, None));
    let (status, body) = post_json(
        router,
        "/profanity_validator",
        serde_json::json!({"text": "hello"}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
}

// ============================================================
// /map_competencies
// ============================================================

#[tokio::test]
async fn map_competencies_without_framework_is_500() {
    let router = build_router(test_state(noop_llm(), None));
    let (status, body) = post_json(
        router,
        "/map_competencies",
        serde_json::json!({"organization": "Acme", "role_title": "Analyst"}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Competency framework not loaded");
}

#[tokio::test]
async fn map_competencies_returns_parsed_mapping() {
    let (model, _) = MockModel::new(&mapping_reply());
    let state = test_state(model, Some(serde_json::json!({"themes": []})));
    let router = build_router(state);

    let (status, body) = post_json(
        router,
        "/map_competencies",
        serde_json::json!({"organization": "Acme", "role_title": "Data Engineer"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["status_code"], 200);
    let data = &body["responsedata"];
    assert_eq!(data["organization"], "Acme");
    assert_eq!(data["role_title"], "Data Engineer");
    assert_eq!(data["mapped_competencies"][0]["category"], "Functional");
    // LLM confidence integer is stringified into relevance.
    assert_eq!(data["mapped_competencies"][0]["relevance"], "92");
    assert_eq!(data["mapping_rationale"], "Core build-and-run data role.");
}

#[tokio::test]
async fn map_competencies_second_call_hits_cache() {
    let (model, calls) = MockModel::new(&mapping_reply());
    let state = test_state(model, Some(serde_json::json!({"themes": []})));
    let router = build_router(state);

    let body = serde_json::json!({"organization": "Acme", "role_title": "Data Engineer"});

    let (status_first, first) = post_json(router.clone(), "/map_competencies", body.clone()).await;
    assert_eq!(status_first, StatusCode::OK);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let (status_second, second) = post_json(router, "/map_competencies", body).await;
    assert_eq!(status_second, StatusCode::OK);
    assert_eq!(
        calls.load(Ordering::SeqCst),
        1,
        "cache hit must not re-invoke the LLM"
    );
    assert_eq!(first["responsedata"], second["responsedata"]);
}

#[tokio::test]
async fn map_competencies_distinct_roles_do_not_share_cache() {
    let (model, calls) = MockModel::new(&mapping_reply());
    let state = test_state(model, Some(serde_json::json!({"themes": []})));
    let router = build_router(state);

    post_json(
        router.clone(),
        "/map_competencies",
        serde_json::json!({"organization": "Acme", "role_title": "Analyst"}),
    )
    .await;
    post_json(
        router,
        "/map_competencies",
        serde_json::json!({"organization": "Acme", "role_title": "Engineer"}),
    )
    .await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn map_competencies_malformed_reply_is_500() {
    let (model, _) = MockModel::new("not json at all");
    let state = test_state(model, Some(serde_json::json!({"themes": []})));
    let router = build_router(state);

    let (status, body) = post_json(
        router,
        "/map_competencies",
        serde_json::json!({"organization": "Acme", "role_title": "Analyst"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    assert_eq!(body["status_code"], 500);
    assert_eq!(body["status_msg"], "Malformed LLM response");
    assert!(body["responsedata"].is_null());
}
