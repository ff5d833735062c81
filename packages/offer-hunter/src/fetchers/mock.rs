//! Mock fetcher for testing.
//!
//! Serves canned page text by URL and records every requested URL.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{FetchError, FetchResult};
use crate::traits::fetcher::PageFetcher;
use crate::types::page::PageText;

/// Mock page fetcher.
///
/// URLs without a canned page or failure fail with a navigation error.
///
/// # Example
///
/// ```rust
/// use offer_hunter::fetchers::MockFetcher;
///
/// let fetcher = MockFetcher::new()
///     .with_page("https://www.sc.com/bd/promotions/", "20% off at Spice & Rice")
///     .with_failure("https://www.ucb.com.bd/cards/card-privileges", "net::ERR_TIMED_OUT");
/// ```
#[derive(Default, Clone)]
pub struct MockFetcher {
    /// Canned text indexed by URL
    pages: Arc<RwLock<HashMap<String, String>>>,
    /// Failure reasons indexed by URL
    failures: Arc<RwLock<HashMap<String, String>>>,
    /// Requested URLs, in order
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page that fetch will return.
    pub fn add_page(&self, url: impl Into<String>, text: impl Into<String>) {
        self.pages.write().unwrap().insert(url.into(), text.into());
    }

    /// Make fetch fail for a URL.
    pub fn add_failure(&self, url: impl Into<String>, reason: impl Into<String>) {
        self.failures.write().unwrap().insert(url.into(), reason.into());
    }

    /// Add a page (builder pattern).
    pub fn with_page(self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.add_page(url, text);
        self
    }

    /// Add a failure (builder pattern).
    pub fn with_failure(self, url: impl Into<String>, reason: impl Into<String>) -> Self {
        self.add_failure(url, reason);
        self
    }

    /// Get the URLs fetched so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Get the number of fetches.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<PageText> {
        self.calls.write().unwrap().push(url.to_string());

        if let Some(reason) = self.failures.read().unwrap().get(url) {
            return Err(FetchError::Navigation {
                url: url.to_string(),
                reason: reason.clone(),
            });
        }

        match self.pages.read().unwrap().get(url) {
            Some(text) => Ok(PageText::new(url, text.clone())),
            None => Err(FetchError::Navigation {
                url: url.to_string(),
                reason: "no canned page".to_string(),
            }),
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
    async fn test_mock_fetcher_serves_pages_and_failures() {
        let fetcher = MockFetcher::new()
            .with_page("https://a.test/", "hello")
            .with_failure("https://b.test/", "boom");

        assert_eq!(fetcher.fetch("https://a.test/").await.unwrap().text, "hello");
        assert!(matches!(
            fetcher.fetch("https://b.test/").await,
            Err(FetchError::Navigation { reason, .. }) if reason == "boom"
        ));
        assert!(fetcher.fetch("https://c.test/").await.is_err());
        assert_eq!(fetcher.call_count(), 3);
    }
}
