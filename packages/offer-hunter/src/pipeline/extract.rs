//! Offer extraction: chunk the page, ask the model, recover the JSON.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{ExtractionResult, ReplyError};
use crate::pipeline::chunk::TextSplitter;
use crate::pipeline::prompts::format_offer_prompt;
use crate::traits::model::LanguageModel;
use crate::types::{config::ChunkConfig, offer::OfferRecord, page::PageText};

/// Locate the JSON array embedded in a free-form reply.
///
/// Returns the span from the first `[` to the last `]`, inclusive. Models
/// often wrap the array in prose or code fences; everything outside the
/// span is ignored.
pub fn extract_json_array(reply: &str) -> Option<&str> {
    let start = reply.find('[')?;
    let end = reply.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&reply[start..=end])
}

/// Parse a model reply into offer records tagged with `source_url`.
///
/// Elements of the array that are not JSON objects are skipped.
pub fn parse_offer_reply(reply: &str, source_url: &str) -> Result<Vec<OfferRecord>, ReplyError> {
    let span = extract_json_array(reply).ok_or(ReplyError::NoJsonArray)?;

    let items = match serde_json::from_str::<Value>(span)? {
        Value::Array(items) => items,
        _ => return Err(ReplyError::NotAnArray),
    };

    let total = items.len();
    let offers: Vec<OfferRecord> = items
        .iter()
        .filter_map(|item| item.as_object())
        .map(|object| OfferRecord::from_model_object(object, source_url))
        .collect();

    if offers.len() < total {
        debug!(
            skipped = total - offers.len(),
            "Skipped non-object entries in model reply"
        );
    }

    Ok(offers)
}

/// Outcome of extracting one page.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Records from every chunk that parsed
    pub offers: Vec<OfferRecord>,

    /// Number of chunks sent to the model
    pub chunks: usize,

    /// Chunks whose call or reply failed
    pub failed_chunks: usize,
}

impl ExtractionReport {
    /// Check if no chunk failed.
    pub fn is_complete(&self) -> bool {
        self.failed_chunks == 0
    }
}

/// Extracts offer records from page text with a language model.
pub struct OfferExtractor<M: LanguageModel> {
    model: M,
    splitter: TextSplitter,
}

impl<M: LanguageModel> OfferExtractor<M> {
    /// Create an extractor. Fails if the chunk settings are unusable.
    pub fn new(model: M, chunking: ChunkConfig) -> ExtractionResult<Self> {
        Ok(Self {
            model,
            splitter: TextSplitter::new(chunking)?,
        })
    }

    /// Get the underlying model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Extract offers from a page, one model call per chunk.
    ///
    /// A failed chunk contributes nothing; the remaining chunks still run.
    pub async fn extract(&self, page: &PageText) -> ExtractionReport {
        let chunks = self.splitter.split(&page.text);
        let total = chunks.len();

        info!(
            url = %page.url,
            chars = page.char_count(),
            chunks = total,
            model = self.model.name(),
            "Analyzing page text"
        );

        let mut report = ExtractionReport {
            chunks: total,
            ..Default::default()
        };

        for (i, chunk) in chunks.iter().enumerate() {
            debug!(url = %page.url, chunk = i + 1, total, "Analyzing chunk");

            match self.extract_chunk(chunk, &page.url).await {
                Ok(offers) => {
                    info!(
                        url = %page.url,
                        chunk = i + 1,
                        total,
                        count = offers.len(),
                        "Found potential offers in chunk"
                    );
                    report.offers.extend(offers);
                }
                Err(e) => {
                    warn!(
                        url = %page.url,
                        chunk = i + 1,
                        total,
                        error = %e,
                        "Chunk yielded no offers, skipping"
                    );
                    report.failed_chunks += 1;
                }
            }
        }

        report
    }

    async fn extract_chunk(&self, chunk: &str, source_url: &str) -> ExtractionResult<Vec<OfferRecord>> {
        let prompt = format_offer_prompt(chunk);
        let reply = self.model.complete(&prompt).await?;
        Ok(parse_offer_reply(&reply, source_url)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockModel;
    use crate::types::offer::{DISCLAIMER, NOT_SPECIFIED};

    const URL: &str = "https://www.bracbank.com/en/retail/card/extra/dining";

    #[test]
    fn test_extract_json_array_from_prose() {
        let reply = "Sure! Here you go:\n```json\n[{\"a\": 1}]\n```\nAnything else?";
        assert_eq!(extract_json_array(reply), Some("[{\"a\": 1}]"));
    }

    #[test]
    fn test_extract_json_array_spans_first_to_last_bracket() {
        let reply = "[1] and also [2]";
        assert_eq!(extract_json_array(reply), Some("[1] and also [2]"));
    }

    #[test]
    fn test_extract_json_array_missing_brackets() {
        assert_eq!(extract_json_array("No offers here."), None);
        assert_eq!(extract_json_array("only an opener ["), None);
        assert_eq!(extract_json_array("only a closer ]"), None);
        assert_eq!(extract_json_array("] reversed ["), None);
    }

    #[test]
    fn test_parse_single_offer_reply() {
        let reply = r#"Sure! [{"bank_name":"X","card_name":"Y","merchant_name":"Z","offer_details":"10% off"}]"#;
        let offers = parse_offer_reply(reply, URL).unwrap();

        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].bank_name, "X");
        assert_eq!(offers[0].card_name, "Y");
        assert_eq!(offers[0].merchant_name, "Z");
        assert_eq!(offers[0].offer_details, "10% off");
        assert_eq!(offers[0].source_url, URL);
        assert_eq!(offers[0].disclaimer, DISCLAIMER);
    }

    #[test]
    fn test_parse_reply_without_array_is_error() {
        let err = parse_offer_reply("I could not find any offers.", URL).unwrap_err();
        assert!(matches!(err, ReplyError::NoJsonArray));
    }

    #[test]
    fn test_parse_reply_with_broken_json_is_error() {
        let err = parse_offer_reply(r#"[{"bank_name": "X",]"#, URL).unwrap_err();
        assert!(matches!(err, ReplyError::InvalidJson(_)));
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_offer_reply("[]", URL).unwrap().is_empty());
    }

    #[test]
    fn test_parse_skips_non_objects_and_fills_missing_keys() {
        let reply = r#"["stray", {"offer_details": "Free dessert"}, 3]"#;
        let offers = parse_offer_reply(reply, URL).unwrap();

        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].bank_name, NOT_SPECIFIED);
        assert_eq!(offers[0].offer_details, "Free dessert");
    }

    #[tokio::test]
    async fn test_extract_aggregates_chunks_and_survives_failures() {
        let model = MockModel::new()
            .with_reply(r#"[{"bank_name":"EBL","offer_details":"15% off"}]"#)
            .with_reply("Sorry, nothing useful.")
            .with_failure("quota exhausted")
            .with_reply(r#"Here: [{"offer_details":"BOGO buffet"},{"offer_details":"Not specified"}]"#);

        let extractor = OfferExtractor::new(model, ChunkConfig::new(10, 0)).unwrap();
        let page = PageText::new(URL, "aaaaaaaaa\nbbbbbbbbb\nccccccccc\nddddddddd");

        let report = extractor.extract(&page).await;

        assert_eq!(report.chunks, 4);
        assert_eq!(report.failed_chunks, 2);
        assert!(!report.is_complete());
        assert_eq!(report.offers.len(), 3);
        assert!(report.offers.iter().all(|o| o.source_url == URL));
        assert_eq!(extractor.model().call_count(), 4);
    }

    #[tokio::test]
    async fn test_each_chunk_is_sent_inside_the_prompt() {
        let model = MockModel::new();
        let extractor = OfferExtractor::new(model, ChunkConfig::new(10, 0)).unwrap();
        let page = PageText::new(URL, "first\n\nsecond");

        let report = extractor.extract(&page).await;

        assert_eq!(report.chunks, 2);
        assert!(report.offers.is_empty());
        let prompts = extractor.model().prompts();
        assert!(prompts[0].ends_with("TEXT TO ANALYZE:\nfirst"));
        assert!(prompts[1].ends_with("TEXT TO ANALYZE:\nsecond"));
    }
}
