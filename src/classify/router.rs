// Routing and confidence adjustment for the transformer branch.
//
// Language detection picks the branch: the default bucket goes to the
// English multi-label model, any recognized Indic script goes to the MuRIL
// 2-class model. The English branch then passes through the
// confidence-floor correction, which can invert a borderline verdict —
// callers depend on the corrected labels, so the rule is preserved as-is.
// The Indic branch reports the model's raw argmax label and softmax
// confidence.

use anyhow::{Context, Result};

use crate::classify::english::EnglishScorer;
use crate::classify::indic::IndicScorer;
use crate::language::{detect_script, LanguageGroup, ScriptBucket};

/// Sigmoid probability at or above which a toxic-bert label counts as toxic.
const TOXIC_LABEL_THRESHOLD: f64 = 0.4;

/// Confidence floor below which a verdict flips to its opposite.
const CONFIDENCE_FLOOR: f64 = 0.8;

pub const LABEL_PROFANE: &str = "Profane";
pub const LABEL_NON_PROFANE: &str = "Non-Profane";
pub const LABEL_CLEAN: &str = "Clean";
pub const LABEL_PROFANE_ABUSIVE: &str = "Profane/Abusive";

/// Outcome of routing one text through the transformer branch.
#[derive(Debug, Clone)]
pub struct TransformerVerdict {
    pub bucket: ScriptBucket,
    pub group: LanguageGroup,
    pub profane: bool,
    pub category: &'static str,
    /// Percentage in [0, 100], two-decimal rounding.
    pub confidence: f64,
    /// Comma-joined labels at or above threshold. English branch only;
    /// None when nothing cleared the threshold.
    pub toxic_labels: Option<String>,
}

/// Both transformer engines. Either may be absent when its model failed to
/// load at startup; the matching branch then errors per-request instead of
/// the process dying.
pub struct TransformerSuite {
    pub english: Option<EnglishScorer>,
    pub indic: Option<IndicScorer>,
}

impl TransformerSuite {
    pub async fn classify(&self, text: &str) -> Result<TransformerVerdict> {
        let bucket = detect_script(text);
        match bucket.group() {
            LanguageGroup::English => self.classify_english(text, bucket).await,
            LanguageGroup::Indic => self.classify_indic(text, bucket).await,
        }
    }

    async fn classify_english(&self, text: &str, bucket: ScriptBucket) -> Result<TransformerVerdict> {
        let scorer = self
            .english
            .as_ref()
            .context("English toxicity model not loaded")?;
        let scores = scorer.score(text).await?;

        let toxic: Vec<&'static str> = scores
            .iter()
            .filter(|(_, p)| *p >= TOXIC_LABEL_THRESHOLD)
            .map(|(label, _)| *label)
            .collect();
        let max_prob = scores.iter().map(|(_, p)| *p).fold(0.0, f64::max);

        let (profane, confidence) = adjust_english(!toxic.is_empty(), max_prob);

        Ok(TransformerVerdict {
            bucket,
            group: LanguageGroup::English,
            profane,
            category: if profane { LABEL_PROFANE } else { LABEL_NON_PROFANE },
            confidence: round2(confidence * 100.0),
            toxic_labels: if toxic.is_empty() {
                None
            } else {
                Some(toxic.join(","))
            },
        })
    }

    async fn classify_indic(&self, text: &str, bucket: ScriptBucket) -> Result<TransformerVerdict> {
        let scorer = self
            .indic
            .as_ref()
            .context("Indic abusive-speech model not loaded")?;
        let scored = scorer.score(text).await?;

        let category = match scored.class_index {
            0 => LABEL_CLEAN,
            1 => LABEL_PROFANE_ABUSIVE,
            _ => "Processing Error",
        };

        Ok(TransformerVerdict {
            bucket,
            group: LanguageGroup::Indic,
            profane: category != LABEL_CLEAN,
            category,
            confidence: round2(scored.confidence * 100.0),
            toxic_labels: None,
        })
    }
}

/// The confidence-floor correction, applied once to the raw decision.
///
/// A Profane call whose max label probability sits under the floor flips to
/// Non-Profane at 1 - p; otherwise a Non-Profane call whose confidence sits
/// under the floor flips to Profane at 1 - c. Returns the final
/// (profane, confidence-in-[0,1]) pair.
pub fn adjust_english(raw_profane: bool, max_prob: f64) -> (bool, f64) {
    if raw_profane {
        if max_prob < CONFIDENCE_FLOOR {
            (false, 1.0 - max_prob)
        } else {
            (true, max_prob)
        }
    } else {
        let confidence = 1.0 - max_prob;
        if confidence < CONFIDENCE_FLOOR {
            (true, 1.0 - confidence)
        } else {
            (false, confidence)
        }
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
