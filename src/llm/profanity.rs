// LLM profanity judgment — prompt, response schema, and reply parsing.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;

/// The model's structured verdict on one text.
#[derive(Debug, Deserialize)]
pub struct ProfanityJudgment {
    #[serde(default)]
    pub contains_profanity: bool,
    /// Confidence percentage (0-100), as reported by the model.
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub reasoning: String,
}

/// Build the analysis prompt for one text.
pub fn prompt(text: &str) -> String {
    format!(
        "Analyze the following text for profanity, keeping the context of the entire \
         sentence in mind, and respond with a JSON object containing:\n\
         - 'contains_profanity': boolean (true if profanity is detected, false otherwise)\n\
         - 'confidence': number between 0-100 (confidence percentage in your assessment)\n\
         - 'reasoning': string (brief explanation of your decision, mentioning specific \
         words or patterns if profanity is found)\n\n\
         Text to analyze: \"{text}\"\n\n\
         Respond only with the JSON object, no additional text."
    )
}

/// Response schema passed to the provider's structured-output mode.
pub fn schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "required": ["contains_profanity", "confidence", "reasoning"],
        "properties": {
            "contains_profanity": {
                "type": "BOOLEAN",
                "description": "Whether profanity was detected in the text"
            },
            "confidence": {
                "type": "NUMBER",
                "description": "Confidence percentage (0-100) in the profanity assessment"
            },
            "reasoning": {
                "type": "STRING",
                "description": "Brief explanation of the decision, mentioning specific words or patterns if profanity is found"
            }
        }
    })
}

/// Parse the model's JSON reply.
pub fn parse_judgment(reply: &str) -> Result<ProfanityJudgment> {
    serde_json::from_str(reply).context("LLM profanity reply is not the expected JSON")
}
