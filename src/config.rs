use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Model identifier used when GEMINI_MODEL is not set.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-04-17";

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    pub redis_host: String,
    pub redis_port: u16,
    pub redis_db: u32,
    /// TTL for cached role-mapping results, in seconds.
    pub cache_expiry_secs: u64,
    pub gemini_api_key: String,
    pub gemini_model: String,
    /// Path to the fastText supervised model (.bin).
    pub fasttext_model_path: PathBuf,
    /// Directory containing the English toxicity ONNX model files.
    pub english_model_dir: PathBuf,
    /// Directory containing the Indic abusive-speech ONNX model files.
    pub indic_model_dir: PathBuf,
    /// Path to the competency framework JSON document.
    pub framework_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default except the Gemini API key — the service
    /// starts without it, but the LLM-backed endpoints will fail per-request.
    pub fn load() -> Result<Self> {
        let model_root = default_model_root();

        Ok(Self {
            redis_host: env::var("REDIS_HOST").unwrap_or_else(|_| "localhost".to_string()),
            redis_port: env::var("REDIS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(6379),
            redis_db: env::var("REDIS_DB")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            cache_expiry_secs: env::var("REDIS_CACHE_EXPIRY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            fasttext_model_path: env::var("FASTTEXT_PROFANITY_MODEL")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("models/profanity_model_english.bin")),
            english_model_dir: env::var("MUZZLE_ENGLISH_MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| model_root.join("english")),
            indic_model_dir: env::var("MUZZLE_INDIC_MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| model_root.join("indic")),
            framework_path: env::var("COMPETENCY_FRAMEWORK_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("competency_framework.json")),
        })
    }

    /// Check that the Gemini API key is configured.
    /// Call this before any operation that goes through the hosted LLM.
    pub fn require_gemini(&self) -> Result<()> {
        if self.gemini_api_key.is_empty() {
            anyhow::bail!(
                "GEMINI_API_KEY not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }
}

/// Default root for transformer model directories: a `muzzle/models`
/// subdirectory of the platform data dir, falling back to the working
/// directory when no data dir exists (e.g. stripped-down containers).
fn default_model_root() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("muzzle")
        .join("models")
}
