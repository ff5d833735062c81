//! Page fetcher trait.

use async_trait::async_trait;

use crate::error::FetchResult;
use crate::types::page::PageText;

/// Turns a target URL into its rendered visible text.
///
/// Implementations must release any browser or connection they acquire
/// before returning, on success and on failure alike.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one page. No retries; the caller skips the target on error.
    async fn fetch(&self, url: &str) -> FetchResult<PageText>;

    /// Get the fetcher name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
