//! Page fetcher implementations.
//!
//! - [`BrowserFetcher`] renders pages in headless Chrome
//! - [`MockFetcher`] serves canned text for tests

pub mod browser;
pub mod mock;

pub use browser::{html_to_text, BrowserFetcher, BrowserOptions};
pub use mock::MockFetcher;
