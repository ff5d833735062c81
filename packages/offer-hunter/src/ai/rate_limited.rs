//! Rate-limited model wrapper.
//!
//! Wraps any [`LanguageModel`] so calls are spaced at least a fixed interval
//! apart, using the governor crate.

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use std::sync::Arc;
use std::time::Duration;

use crate::error::ExtractionResult;
use crate::traits::model::LanguageModel;

type DefaultRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// A model wrapper that enforces a minimum spacing between calls.
///
/// The first call goes through immediately. A zero interval disables the
/// limiter entirely.
pub struct RateLimitedModel<M: LanguageModel> {
    inner: M,
    limiter: Option<Arc<DefaultRateLimiter>>,
}

impl<M: LanguageModel> RateLimitedModel<M> {
    /// Allow one call per `interval`.
    pub fn new(model: M, interval: Duration) -> Self {
        Self {
            inner: model,
            limiter: Quota::with_period(interval).map(|quota| Arc::new(RateLimiter::direct(quota))),
        }
    }

    /// Check if calls are being throttled.
    pub fn is_throttled(&self) -> bool {
        self.limiter.is_some()
    }

    /// Get the wrapped model.
    pub fn inner(&self) -> &M {
        &self.inner
    }

    async fn wait_for_permit(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}

#[async_trait]
impl<M: LanguageModel> LanguageModel for RateLimitedModel<M> {
    async fn complete(&self, prompt: &str) -> ExtractionResult<String> {
        self.wait_for_permit().await;
        self.inner.complete(prompt).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockModel;
    use std::time::Instant;

    #[tokio::test]
    async fn test_calls_are_spaced() {
        let model = RateLimitedModel::new(MockModel::new(), Duration::from_millis(100));
        assert!(model.is_throttled());

        let start = Instant::now();
        for _ in 0..3 {
            model.complete("prompt").await.unwrap();
        }

        assert!(start.elapsed() >= Duration::from_millis(180));
        assert_eq!(model.inner().call_count(), 3);
    }

    #[tokio::test]
    async fn test_zero_interval_disables_limiter() {
        let model = RateLimitedModel::new(MockModel::new(), Duration::ZERO);
        assert!(!model.is_throttled());

        for _ in 0..5 {
            model.complete("prompt").await.unwrap();
        }
        assert_eq!(model.inner().call_count(), 5);
    }
}
