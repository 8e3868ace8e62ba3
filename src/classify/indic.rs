// Indic abusive-speech scorer — MuRIL via ONNX Runtime.
//
// Unlike the English model this is a plain 2-class classifier: softmax over
// two logits, argmax picks the class. Class 0 is clean text, class 1 is
// abusive. The reported confidence is the winning class's softmax
// probability, unmodified — the confidence-floor correction applies to the
// English branch only.
//
// Model: Hate-speech-CNERG/indic-abusive-allInOne-MuRIL exported to ONNX
// (model.onnx + tokenizer.json).

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::debug;

/// The model was trained with fixed-length inputs; shorter sequences are
/// right-padded to this length, longer ones truncated.
const MAX_SEQ_LEN: usize = 512;

/// BERT pad token id (also the attention-mask and type-id padding value).
const PAD_ID: i64 = 0;

/// Argmax class and its softmax probability for one text.
#[derive(Debug, Clone, Copy)]
pub struct IndicScores {
    pub class_index: usize,
    pub confidence: f64,
}

/// Local ONNX-based Indic abusive-speech scorer. Same ownership shape as
/// the English scorer: session behind Arc<Mutex>, inference on
/// spawn_blocking.
pub struct IndicScorer {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
}

impl IndicScorer {
    /// Load the ONNX model and tokenizer from the given directory.
    ///
    /// Expects `model.onnx` and `tokenizer.json` to exist in `model_dir`.
    pub fn load(model_dir: &Path) -> Result<Self> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        if !model_path.exists() {
            anyhow::bail!(
                "Indic model file not found: {}\nSet MUZZLE_INDIC_MODEL_DIR to the MuRIL export.",
                model_path.display()
            );
        }
        if !tokenizer_path.exists() {
            anyhow::bail!(
                "Indic tokenizer file not found: {}\nSet MUZZLE_INDIC_MODEL_DIR to the MuRIL export.",
                tokenizer_path.display()
            );
        }

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(&model_path)
            .with_context(|| format!("Failed to load ONNX model from {}", model_path.display()))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;

        debug!("Loaded Indic abusive-speech model from {}", model_dir.display());

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
        })
    }

    /// Score one text: argmax class over the two logits plus its softmax
    /// probability.
    pub async fn score(&self, text: &str) -> Result<IndicScores> {
        let session = Arc::clone(&self.session);
        let tokenizer = Arc::clone(&self.tokenizer);
        let text = text.to_string();

        tokio::task::spawn_blocking(move || {
            let encoding = tokenizer
                .encode(text.as_str(), true)
                .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))?;

            let seq_len = encoding.get_ids().len().min(MAX_SEQ_LEN);

            // Fixed-length inputs: copy the (possibly truncated) sequence,
            // then right-pad to MAX_SEQ_LEN.
            let mut input_ids = vec![PAD_ID; MAX_SEQ_LEN];
            let mut attention_mask = vec![0i64; MAX_SEQ_LEN];
            let mut token_type_ids = vec![0i64; MAX_SEQ_LEN];
            for i in 0..seq_len {
                input_ids[i] = encoding.get_ids()[i] as i64;
                attention_mask[i] = encoding.get_attention_mask()[i] as i64;
                token_type_ids[i] = encoding.get_type_ids()[i] as i64;
            }

            let shape = [1i64, MAX_SEQ_LEN as i64];
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

                // Output shape: [1, 2] — raw logits (pre-softmax)
                let (_shape, data) = outputs[0]
                    .try_extract_tensor::<f32>()
                    .context("Failed to extract output tensor")?;
                data.to_vec()
            };

            if logits.len() < 2 {
                anyhow::bail!("Model returned {} logits, expected 2", logits.len());
            }

            let probs = softmax(&[logits[0] as f64, logits[1] as f64]);
            let class_index = if probs[1] > probs[0] { 1 } else { 0 };

            debug!(
                class = class_index,
                confidence = probs[class_index],
                text_preview = %crate::output::truncate_chars(&text, 50),
                "Indic model scored text"
            );

            Ok(IndicScores {
                class_index,
                confidence: probs[class_index],
            })
        })
        .await
        .context("spawn_blocking panicked")?
    }
}

/// Numerically stable softmax.
fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|&l| (l - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.iter().map(|&e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn softmax_sums_to_one() {
        let probs = softmax(&[1.5, -0.3]);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn softmax_equal_logits_split_evenly() {
        let probs = softmax(&[2.0, 2.0]);
        assert!((probs[0] - 0.5).abs() < 1e-10);
        assert!((probs[1] - 0.5).abs() < 1e-10);
    }

    #[test]
    fn softmax_preserves_order() {
        let probs = softmax(&[0.2, 3.1]);
        assert!(probs[1] > probs[0]);
    }

    #[test]
    fn softmax_stable_for_large_logits() {
        let probs = softmax(&[1000.0, 999.0]);
        assert!(probs[0].is_finite() && probs[1].is_finite());
        assert!(probs[0] > probs[1]);
    }
}
