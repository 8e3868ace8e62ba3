// English toxicity scorer — toxic-bert via ONNX Runtime.
//
// Runs entirely on the local CPU. The model is a multi-label classifier:
// six toxicity categories with independent sigmoid probabilities, so a text
// can be both an insult and a threat. The routing layer turns the raw
// per-label probabilities into a Profane/Non-Profane verdict.
//
// Model: unitary/toxic-bert exported to ONNX (model.onnx + tokenizer.json).

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::debug;

/// Labels output by toxic-bert, in the order the model returns them.
pub const LABEL_ORDER: [&str; 6] = [
    "toxic",
    "severe_toxic",
    "obscene",
    "threat",
    "insult",
    "identity_hate",
];

/// Longest token sequence fed to the model; longer inputs are truncated.
const MAX_SEQ_LEN: usize = 512;

/// Local ONNX-based English toxicity scorer. Holds the model session and
/// tokenizer behind Arc<Mutex> so inference can be offloaded to
/// spawn_blocking without blocking the async runtime.
pub struct EnglishScorer {
    // Arc+Mutex because ort::Session::run takes &mut self and the
    // spawn_blocking closure needs 'static shared ownership. Inference is
    // CPU-bound and serialized through the lock.
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
}

impl EnglishScorer {
    /// Load the ONNX model and tokenizer from the given directory.
    ///
    /// Expects `model.onnx` and `tokenizer.json` to exist in `model_dir`.
    pub fn load(model_dir: &Path) -> Result<Self> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        if !model_path.exists() {
            anyhow::bail!(
                "English model file not found: {}\nSet MUZZLE_ENGLISH_MODEL_DIR to the toxic-bert export.",
                model_path.display()
            );
        }
        if !tokenizer_path.exists() {
            anyhow::bail!(
                "English tokenizer file not found: {}\nSet MUZZLE_ENGLISH_MODEL_DIR to the toxic-bert export.",
                tokenizer_path.display()
            );
        }

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(&model_path)
            .with_context(|| format!("Failed to load ONNX model from {}", model_path.display()))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;

        debug!("Loaded English toxicity model from {}", model_dir.display());

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
        })
    }

    /// Score one text, returning (label, sigmoid probability) pairs in
    /// model output order.
    ///
    /// Tokenization and inference are CPU-bound and run on spawn_blocking
    /// so the async runtime stays responsive.
    pub async fn score(&self, text: &str) -> Result<Vec<(&'static str, f64)>> {
        let session = Arc::clone(&self.session);
        let tokenizer = Arc::clone(&self.tokenizer);
        let text = text.to_string();

        tokio::task::spawn_blocking(move || {
            let encoding = tokenizer
                .encode(text.as_str(), true)
                .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))?;

            let seq_len = encoding.get_ids().len().min(MAX_SEQ_LEN);
            let input_ids: Vec<i64> = encoding.get_ids()[..seq_len]
                .iter()
                .map(|&id| id as i64)
                .collect();
            let attention_mask: Vec<i64> = encoding.get_attention_mask()[..seq_len]
                .iter()
                .map(|&m| m as i64)
                .collect();
            let token_type_ids: Vec<i64> = encoding.get_type_ids()[..seq_len]
                .iter()
                .map(|&t| t as i64)
                .collect();

            let shape = [1i64, seq_len as i64];
            let input_ids_tensor =
                Tensor::from_array((shape, input_ids)).context("Failed to create input_ids tensor")?;
            let attention_mask_tensor = Tensor::from_array((shape, attention_mask))
                .context("Failed to create attention_mask tensor")?;
            let token_type_ids_tensor = Tensor::from_array((shape, token_type_ids))
                .context("Failed to create token_type_ids tensor")?;

            let logits = {
                let mut session = session
                    .lock()
                    .map_err(|e| anyhow::anyhow!("Session lock poisoned: {}", e))?;

                let outputs = session
                    .run(ort::inputs! {
                        "input_ids" => input_ids_tensor,
                        "attention_mask" => attention_mask_tensor,
                        "token_type_ids" => token_type_ids_tensor
                    })
                    .context("ONNX inference failed")?;

                // Output shape: [1, 6] — raw logits (pre-sigmoid)
                let (_shape, data) = outputs[0]
                    .try_extract_tensor::<f32>()
                    .context("Failed to extract output tensor")?;
                data.to_vec()
            };

            if logits.len() < LABEL_ORDER.len() {
                anyhow::bail!(
                    "Model returned {} logits, expected {}",
                    logits.len(),
                    LABEL_ORDER.len()
                );
            }

            let scores: Vec<(&'static str, f64)> = LABEL_ORDER
                .iter()
                .zip(logits.iter())
                .map(|(&label, &logit)| (label, sigmoid(logit as f64)))
                .collect();

            debug!(
                toxic = scores[0].1,
                text_preview = %crate::output::truncate_chars(&text, 50),
                "English model scored text"
            );

            Ok(scores)
        })
        .await
        .context("spawn_blocking panicked")?
    }
}

/// Sigmoid activation: maps any real number to (0, 1).
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_zero_is_half() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn sigmoid_saturates() {
        assert!(sigmoid(10.0) > 0.999);
        assert!(sigmoid(-10.0) < 0.001);
    }

    #[test]
    fn sigmoid_symmetry() {
        for x in [0.5, 1.0, 2.0, 5.0] {
            let sum = sigmoid(x) + sigmoid(-x);
            assert!((sum - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn label_order_count() {
        assert_eq!(LABEL_ORDER.len(), 6, "toxic-bert outputs 6 categories");
    }
}
