use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, warn};

use muzzle::cache::redis::RedisCache;
use muzzle::classify::english::EnglishScorer;
use muzzle::classify::fasttext::{FastTextClassifier, OFFENSIVE_LABEL};
use muzzle::classify::indic::IndicScorer;
use muzzle::classify::router::{round2, TransformerSuite};
use muzzle::config::Config;
use muzzle::framework;
use muzzle::llm::gemini::GeminiClient;
use muzzle::llm::profanity as llm_profanity;
use muzzle::llm::traits::GenerativeModel;
use muzzle::output::print_verdict;
use muzzle::web::{self, AppState};

/// Muzzle: profanity screening and role-to-competency mapping service.
///
/// Routes text to local fastText and transformer classifiers or a hosted
/// LLM, and maps organizational roles onto a competency framework.
#[derive(Parser)]
#[command(name = "muzzle", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8000")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Classify a single text from the command line
    Check {
        /// The text to classify
        text: String,

        /// Engine to use: transformer | fasttext | llm
        #[arg(long, default_value = "transformer")]
        engine: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("muzzle=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Serve { port, bind } => {
            let state = build_state(config)?;
            web::run_server(state, port, &bind).await
        }
        Commands::Check { text, engine } => run_check(config, &text, &engine).await,
    }
}

/// Construct every shared service once. Classifier engines and the
/// framework degrade to absent on load failure — their endpoints then fail
/// closed per-request while the rest of the service keeps working.
fn build_state(config: Config) -> Result<AppState> {
    let cache = RedisCache::new(&config.redis_host, config.redis_port, config.redis_db)?;

    if config.gemini_api_key.is_empty() {
        warn!("GEMINI_API_KEY not set — /profanity_validator and /map_competencies will fail");
    }
    let llm = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_model.clone());

    let fasttext = match FastTextClassifier::load(&config.fasttext_model_path) {
        Ok(classifier) => Some(Arc::new(classifier)),
        Err(e) => {
            warn!(error = %e, "fastText model unavailable");
            None
        }
    };

    let english = match EnglishScorer::load(&config.english_model_dir) {
        Ok(scorer) => Some(scorer),
        Err(e) => {
            warn!(error = %e, "English toxicity model unavailable");
            None
        }
    };

    let indic = match IndicScorer::load(&config.indic_model_dir) {
        Ok(scorer) => Some(scorer),
        Err(e) => {
            warn!(error = %e, "Indic abusive-speech model unavailable");
            None
        }
    };

    let framework = match framework::load_framework(&config.framework_path) {
        Ok(doc) => Some(Arc::new(doc)),
        Err(e) => {
            error!(error = %e, "Failed to load competency framework");
            None
        }
    };

    Ok(AppState {
        config: Arc::new(config),
        cache: Arc::new(cache),
        llm: Arc::new(llm),
        fasttext,
        transformers: Arc::new(TransformerSuite { english, indic }),
        framework,
    })
}

/// One-off classification from the command line, bypassing HTTP.
async fn run_check(config: Config, text: &str, engine: &str) -> Result<()> {
    match engine {
        "transformer" => {
            let suite = TransformerSuite {
                english: EnglishScorer::load(&config.english_model_dir).ok(),
                indic: IndicScorer::load(&config.indic_model_dir).ok(),
            };
            let verdict = suite.classify(text).await?;
            print_verdict("transformer", verdict.profane, verdict.confidence, verdict.category);
            println!("        language: {}", verdict.bucket.as_mixed_english());
            if let Some(labels) = verdict.toxic_labels {
                println!("        labels: {labels}");
            }
            Ok(())
        }
        "fasttext" => {
            let classifier = FastTextClassifier::load(&config.fasttext_model_path)?;
            let verdict = classifier.predict(text)?;
            let profane = verdict.label == OFFENSIVE_LABEL;
            print_verdict(
                "fasttext",
                profane,
                round2(verdict.confidence * 100.0),
                if profane { "profane" } else { "clean" },
            );
            Ok(())
        }
        "llm" => {
            config.require_gemini()?;
            let client = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_model.clone());
            let reply = client
                .generate_json(&llm_profanity::prompt(text), &llm_profanity::schema())
                .await?;
            let judgment = llm_profanity::parse_judgment(&reply)?;
            print_verdict(
                "llm",
                judgment.contains_profanity,
                judgment.confidence,
                if judgment.contains_profanity { "profane" } else { "clean" },
            );
            if !judgment.reasoning.is_empty() {
                println!("        {}", judgment.reasoning);
            }
            Ok(())
        }
        other => anyhow::bail!("Unknown engine '{other}' — expected transformer, fasttext, or llm"),
    }
}
