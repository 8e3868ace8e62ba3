// Generative model trait — the swap-ready abstraction over hosted LLMs.

use anyhow::Result;
use async_trait::async_trait;

/// A hosted generative model that answers with a JSON document.
///
/// Implementations must be Send + Sync so handlers can share them as
/// `Arc<dyn GenerativeModel>`.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Generate a JSON reply for the given prompt. `schema` constrains the
    /// reply shape when the provider supports structured output; providers
    /// that don't may ignore it.
    async fn generate_json(&self, prompt: &str, schema: &serde_json::Value) -> Result<String>;
}
