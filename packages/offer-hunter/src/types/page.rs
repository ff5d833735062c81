//! Page text produced by a fetcher.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Visible text of one rendered target page.
///
/// Produced once per target, consumed by the extractor, then dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageText {
    /// Target URL the text was rendered from
    pub url: String,

    /// Visible text, one trimmed text node per line
    pub text: String,

    /// When the page was rendered
    pub fetched_at: DateTime<Utc>,
}

impl PageText {
    /// Create page text stamped with the current time.
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
            fetched_at: Utc::now(),
        }
    }

    /// Set the fetched timestamp.
    pub fn with_fetched_at(mut self, fetched_at: DateTime<Utc>) -> Self {
        self.fetched_at = fetched_at;
        self
    }

    /// Length in characters, the unit the chunker works in.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if this page has any visible text.
    pub fn has_content(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_count_counts_characters_not_bytes() {
        let page = PageText::new("https://example.com", "৳500 off");
        assert_eq!(page.char_count(), 8);
        assert_eq!(page.text.len(), 10);
    }

    #[test]
    fn test_whitespace_only_has_no_content() {
        assert!(!PageText::new("https://example.com", " \n\t").has_content());
        assert!(PageText::new("https://example.com", "Dining").has_content());
    }
}
