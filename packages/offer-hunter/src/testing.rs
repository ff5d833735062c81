//! Testing utilities including mock implementations.
//!
//! Useful for exercising the pipeline without real model calls. See also
//! [`crate::fetchers::MockFetcher`] and [`crate::stores::MemoryStore`].

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, RwLock};

use crate::error::{ExtractionError, ExtractionResult};
use crate::traits::model::LanguageModel;

/// A mock language model with scripted replies.
///
/// Replies are consumed in order, one per call. Once the script runs out,
/// every call returns the default reply (`[]` unless changed).
#[derive(Clone)]
pub struct MockModel {
    /// Scripted replies; `Err` holds a failure message
    script: Arc<Mutex<VecDeque<Result<String, String>>>>,

    /// Reply once the script is exhausted
    default_reply: String,

    /// Prompts received, for assertions
    prompts: Arc<RwLock<Vec<String>>>,
}

impl Default for MockModel {
    fn default() -> Self {
        Self::new()
    }
}

impl MockModel {
    /// Create a mock that answers every prompt with `[]`.
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            default_reply: "[]".to_string(),
            prompts: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Queue a reply.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Ok(reply.into()));
        self
    }

    /// Queue a failed call.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Err(message.into()));
        self
    }

    /// Set the reply used after the script runs out.
    pub fn with_default_reply(mut self, reply: impl Into<String>) -> Self {
        self.default_reply = reply.into();
        self
    }

    /// Get the number of calls made.
    pub fn call_count(&self) -> usize {
        self.prompts.read().unwrap().len()
    }

    /// Get every prompt received, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    async fn complete(&self, prompt: &str) -> ExtractionResult<String> {
        self.prompts.write().unwrap().push(prompt.to_string());

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(ExtractionError::Model(message.into())),
            None => Ok(self.default_reply.clone()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_script_then_default() {
        let model = MockModel::new()
            .with_reply("[1]")
            .with_failure("boom")
            .with_default_reply("nothing");

        assert_eq!(model.complete("a").await.unwrap(), "[1]");
        assert!(model.complete("b").await.is_err());
        assert_eq!(model.complete("c").await.unwrap(), "nothing");
        assert_eq!(model.prompts(), vec!["a", "b", "c"]);
    }
}
