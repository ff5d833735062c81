//! Language model trait.

use async_trait::async_trait;

use crate::error::ExtractionResult;

/// A hosted language model that answers a single prompt with free text.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send one prompt and return the raw reply text.
    async fn complete(&self, prompt: &str) -> ExtractionResult<String>;

    /// Get the model name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
