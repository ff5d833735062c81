//! Gemini implementation of the [`LanguageModel`] trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use offer_hunter::ai::GeminiModel;
//!
//! let model = GeminiModel::new(&config.model.api_key).with_model("gemini-1.5-flash");
//! let reply = model.complete("List the offers in this text: ...").await?;
//! ```

use async_trait::async_trait;
use gemini_client::GeminiClient;
use tracing::debug;

use crate::error::{ExtractionError, ExtractionResult};
use crate::security::SecretString;
use crate::traits::model::LanguageModel;

/// Model used when none is configured.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Hosted Gemini model, called with temperature 0.
#[derive(Clone)]
pub struct GeminiModel {
    client: GeminiClient,
    model: String,
}

impl GeminiModel {
    /// Create a model handle from an API key.
    pub fn new(api_key: &SecretString) -> Self {
        Self {
            client: GeminiClient::new(api_key.expose()),
            model: DEFAULT_GEMINI_MODEL.to_string(),
        }
    }

    /// Set the model name (default: gemini-1.5-flash).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point the client at another endpoint (a proxy or a local mock server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.client = self.client.with_base_url(url);
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LanguageModel for GeminiModel {
    async fn complete(&self, prompt: &str) -> ExtractionResult<String> {
        debug!(model = %self.model, prompt_chars = prompt.chars().count(), "Calling Gemini");

        self.client
            .generate_text(&self.model, prompt)
            .await
            .map_err(|e| ExtractionError::Model(Box::new(e)))
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

    #[tokio::test]
    async fn test_complete_returns_reply_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_header("x-goog-api-key", "AIza-test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"[]"}]},"finishReason":"STOP"}]}"#,
            )
            .create_async()
            .await;

        let model = GeminiModel::new(&SecretString::new("AIza-test")).with_base_url(server.url());
        let reply = model.complete("find offers").await.unwrap();

        assert_eq!(reply, "[]");
        assert_eq!(model.name(), "gemini-1.5-flash");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_api_error_becomes_model_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-pro:generateContent")
            .with_status(429)
            .with_body(r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#)
            .create_async()
            .await;

        let model = GeminiModel::new(&SecretString::new("AIza-test"))
            .with_model("gemini-pro")
            .with_base_url(server.url());

        let err = model.complete("find offers").await.unwrap_err();
        assert!(matches!(err, ExtractionError::Model(_)));
        assert!(err.to_string().contains("Resource has been exhausted"));
    }
}
