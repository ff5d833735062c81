//! Offer records: what the model extracts and what the store keeps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sentinel the model uses for a field it could not determine.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Disclaimer attached to every extracted record.
pub const DISCLAIMER: &str =
    "This is unverified data scraped from the source URL. Use at your own risk.";

/// Keys the model is asked to produce for each offer.
pub const OFFER_FIELDS: [&str; 4] = ["bank_name", "card_name", "merchant_name", "offer_details"];

/// One extracted offer, tagged with provenance.
///
/// All four model fields are always present; unknown values carry
/// [`NOT_SPECIFIED`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferRecord {
    pub bank_name: String,
    pub card_name: String,
    pub merchant_name: String,
    pub offer_details: String,
    pub source_url: String,
    pub disclaimer: String,
}

impl OfferRecord {
    /// Build a record from one object of the model's JSON array.
    ///
    /// Missing and null fields become the sentinel. Strings are kept as-is
    /// (including empty ones); other scalars are rendered as JSON text.
    pub fn from_model_object(object: &Map<String, Value>, source_url: &str) -> Self {
        let field = |key: &str| match object.get(key) {
            None | Some(Value::Null) => NOT_SPECIFIED.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };

        Self {
            bank_name: field("bank_name"),
            card_name: field("card_name"),
            merchant_name: field("merchant_name"),
            offer_details: field("offer_details"),
            source_url: source_url.to_string(),
            disclaimer: DISCLAIMER.to_string(),
        }
    }

    /// Whether the details are worth storing: non-empty and not the sentinel.
    pub fn has_usable_details(&self) -> bool {
        !self.offer_details.is_empty()
            && !self
                .offer_details
                .to_lowercase()
                .contains(&NOT_SPECIFIED.to_lowercase())
    }
}

/// A row read back from the `offer` table.
///
/// Columns are optional because rows may predate the current writer or be
/// edited by hand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct StoredOffer {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub card_name: Option<String>,
    #[serde(default)]
    pub merchant_name: Option<String>,
    #[serde(default)]
    pub offer_details: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub disclaimer: Option<String>,
}

impl From<OfferRecord> for StoredOffer {
    fn from(record: OfferRecord) -> Self {
        Self {
            id: None,
            created_at: None,
            bank_name: Some(record.bank_name),
            card_name: Some(record.card_name),
            merchant_name: Some(record.merchant_name),
            offer_details: Some(record.offer_details),
            source_url: Some(record.source_url),
            disclaimer: Some(record.disclaimer),
        }
    }
}

/// Filter for reading stored offers.
#[derive(Debug, Clone, Default)]
pub struct OfferQuery {
    /// Only offers from this bank (exact match)
    pub bank_name: Option<String>,

    /// Maximum rows to return, newest first
    pub limit: Option<usize>,
}

impl OfferQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_bank(mut self, bank_name: impl Into<String>) -> Self {
        self.bank_name = Some(bank_name.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
