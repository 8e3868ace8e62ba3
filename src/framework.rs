// Competency framework — the JSON taxonomy loaded at startup, plus the
// typed item shape returned by the role-mapping endpoint.
//
// The framework document is opaque to the service: it is substituted
// verbatim into the mapping prompt, never interpreted. A load failure at
// startup leaves it unset and the mapping endpoint fails closed.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One mapped competency in a role-mapping response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetencyItem {
    pub category: String,
    pub theme: String,
    pub sub_themes: Vec<String>,
    /// Stringified confidence from the LLM mapping reply.
    pub relevance: Option<String>,
}

/// Load the competency framework JSON document from disk.
pub fn load_framework(path: &Path) -> Result<serde_json::Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read competency framework from {}", path.display()))?;
    serde_json::from_str(&raw).context("Competency framework is not valid JSON")
}
