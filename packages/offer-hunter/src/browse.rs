//! Reading stored offers back for people.
//!
//! Offers are grouped by bank, in the order each bank first appears in the
//! listing. Missing or empty fields get readable fallbacks.

use indexmap::IndexMap;
use std::fmt::Write;

use crate::types::offer::StoredOffer;

/// Group label for offers without a bank name.
pub const OTHER_BANK: &str = "Other";

/// Shown when the merchant is unknown.
pub const GENERAL_OFFER: &str = "General Offer";

/// Shown when the bank is unknown.
pub const UNKNOWN_BANK: &str = "Not specified";

/// Shown when the card is unknown.
pub const ALL_CARDS: &str = "All Cards";

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Group key for an offer.
pub fn bank_group(offer: &StoredOffer) -> &str {
    present(&offer.bank_name).unwrap_or(OTHER_BANK)
}

pub fn merchant_label(offer: &StoredOffer) -> &str {
    present(&offer.merchant_name).unwrap_or(GENERAL_OFFER)
}

pub fn bank_label(offer: &StoredOffer) -> &str {
    present(&offer.bank_name).unwrap_or(UNKNOWN_BANK)
}

pub fn card_label(offer: &StoredOffer) -> &str {
    present(&offer.card_name).unwrap_or(ALL_CARDS)
}

/// Group offers by bank, keeping first-seen bank order and listing order
/// within each group.
pub fn group_by_bank(offers: &[StoredOffer]) -> IndexMap<&str, Vec<&StoredOffer>> {
    let mut groups: IndexMap<&str, Vec<&StoredOffer>> = IndexMap::new();
    for offer in offers {
        groups.entry(bank_group(offer)).or_default().push(offer);
    }
    groups
}

/// Plain-text listing of grouped offers.
pub fn render_listing(offers: &[StoredOffer]) -> String {
    if offers.is_empty() {
        return "No offers stored yet.\n".to_string();
    }

    let mut out = String::new();
    for (bank, group) in group_by_bank(offers) {
        let _ = writeln!(out, "== {} ({}) ==", bank, group.len());
        for offer in group {
            let _ = writeln!(out, "  {}", merchant_label(offer));
            let _ = writeln!(
                out,
                "    Bank: {} | Card: {}",
                bank_label(offer),
                card_label(offer)
            );
            if let Some(details) = present(&offer.offer_details) {
                let _ = writeln!(out, "    {}", details);
            }
            if let Some(source) = present(&offer.source_url) {
                let _ = writeln!(out, "    Source: {}", source);
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(bank: Option<&str>, merchant: Option<&str>, details: &str) -> StoredOffer {
        StoredOffer {
            bank_name: bank.map(String::from),
            merchant_name: merchant.map(String::from),
            offer_details: Some(details.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_group_by_bank_keeps_first_seen_order() {
        let offers = vec![
            stored(Some("EBL"), None, "a"),
            stored(Some("BRAC Bank"), None, "b"),
            stored(None, None, "c"),
            stored(Some("EBL"), None, "d"),
            stored(Some(""), None, "e"),
        ];

        let groups = group_by_bank(&offers);

        let banks: Vec<_> = groups.keys().copied().collect();
        assert_eq!(banks, vec!["EBL", "BRAC Bank", OTHER_BANK]);

        let ebl: Vec<_> = groups["EBL"]
            .iter()
            .filter_map(|o| o.offer_details.as_deref())
            .collect();
        assert_eq!(ebl, vec!["a", "d"]);
        assert_eq!(groups[OTHER_BANK].len(), 2);
    }

    #[test]
    fn test_display_fallbacks() {
        let offer = stored(None, Some(""), "x");
        assert_eq!(merchant_label(&offer), GENERAL_OFFER);
        assert_eq!(bank_label(&offer), UNKNOWN_BANK);
        assert_eq!(card_label(&offer), ALL_CARDS);

        let offer = StoredOffer {
            card_name: Some("Amex Gold".to_string()),
            ..stored(Some("City Bank"), Some("Hotel Agrabad"), "x")
        };
        assert_eq!(merchant_label(&offer), "Hotel Agrabad");
        assert_eq!(bank_label(&offer), "City Bank");
        assert_eq!(card_label(&offer), "Amex Gold");
    }

    #[test]
    fn test_render_listing() {
        let offers = vec![stored(Some("UCB"), Some("Sultan's Dine"), "15% off on dine-in")];

        assert_eq!(
            render_listing(&offers),
            "== UCB (1) ==\n  Sultan's Dine\n    Bank: UCB | Card: All Cards\n    15% off on dine-in\n\n"
        );
        assert_eq!(render_listing(&[]), "No offers stored yet.\n");
    }
}
