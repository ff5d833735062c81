//! LLM prompts for offer extraction.

use crate::types::offer::NOT_SPECIFIED;

/// Instruction sent with every chunk. `{text}` is replaced by the chunk.
pub const OFFER_EXTRACTION_PROMPT: &str = r#"From the text below, extract all credit card offers into a JSON list.
Each object in the list MUST have these keys: "bank_name", "card_name", "merchant_name", "offer_details".
If a value is not found, use the string "{not_specified}".
If there are absolutely no offers in the text, you MUST respond with an empty list: [].

TEXT TO ANALYZE:
{text}"#;

/// Render the extraction prompt for one chunk.
pub fn format_offer_prompt(chunk: &str) -> String {
    OFFER_EXTRACTION_PROMPT
        .replace("{not_specified}", NOT_SPECIFIED)
        .replace("{text}", chunk)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_chunk_and_keys() {
        let prompt = format_offer_prompt("20% off at Star Kabab");

        assert!(prompt.ends_with("TEXT TO ANALYZE:\n20% off at Star Kabab"));
        for key in ["bank_name", "card_name", "merchant_name", "offer_details"] {
            assert!(prompt.contains(key));
        }
        assert!(prompt.contains(r#"use the string "Not specified""#));
        assert!(prompt.contains("empty list: []"));
        assert!(!prompt.contains("{text}"));
    }

    #[test]
    fn test_chunk_braces_are_left_alone() {
        let prompt = format_offer_prompt("template {not_specified} literal");
        assert!(prompt.ends_with("template {not_specified} literal"));
    }
}
