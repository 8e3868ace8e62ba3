// fastText profanity classifier — supervised .bin model.
//
// The model is a binary English offensive-language classifier whose labels
// follow the fastText convention ("__label__offensive" / "__label__clean").
// Prediction is a linear pass over averaged word vectors, cheap enough to
// run inline on the request path.

use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use fasttext::FastText;
use tracing::debug;

/// Label the supervised model emits for offensive text.
pub const OFFENSIVE_LABEL: &str = "__label__offensive";

/// Top-1 prediction for one text.
#[derive(Debug, Clone)]
pub struct FastTextVerdict {
    pub label: String,
    pub confidence: f64,
}

/// Wrapper around a loaded fastText supervised model.
///
/// The FFI handle sits behind a Mutex so the classifier is Sync and can be
/// shared across request handlers.
pub struct FastTextClassifier {
    model: Mutex<FastText>,
}

impl FastTextClassifier {
    /// Load the supervised model from a .bin file.
    pub fn load(model_path: &Path) -> Result<Self> {
        if !model_path.exists() {
            anyhow::bail!(
                "fastText model not found: {}\nSet FASTTEXT_PROFANITY_MODEL to the .bin file.",
                model_path.display()
            );
        }

        let path = model_path
            .to_str()
            .context("fastText model path is not valid UTF-8")?;

        let mut model = FastText::new();
        model
            .load_model(path)
            .map_err(|e| anyhow::anyhow!("Failed to load fastText model: {}", e))?;

        debug!("Loaded fastText model from {}", model_path.display());

        Ok(Self {
            model: Mutex::new(model),
        })
    }

    /// Predict the top label for one text.
    pub fn predict(&self, text: &str) -> Result<FastTextVerdict> {
        // fastText treats newlines as document separators; keep one document.
        let line = text.replace('\n', " ");

        let predictions = {
            let model = self
                .model
                .lock()
                .map_err(|e| anyhow::anyhow!("Model lock poisoned: {}", e))?;
            model
                .predict(&line, 1, 0.0)
                .map_err(|e| anyhow::anyhow!("fastText prediction failed: {}", e))?
        };

        let top = predictions
            .into_iter()
            .next()
            .context("fastText returned no prediction")?;

        Ok(FastTextVerdict {
            label: top.label,
            confidence: top.prob as f64,
        })
    }
}
