//! Offer store trait.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::offer::{OfferQuery, OfferRecord, StoredOffer};

/// Table name used by every backend.
pub const OFFER_TABLE: &str = "offer";

/// Remote storage for extracted offers.
///
/// Inserts are independent and non-transactional; nothing is ever updated
/// or deleted.
#[async_trait]
pub trait OfferStore: Send + Sync {
    /// Bulk-insert records in one call. Returns the number of rows stored.
    async fn insert_offers(&self, offers: &[OfferRecord]) -> StoreResult<usize>;

    /// Read stored offers, newest first.
    async fn list_offers(&self, query: &OfferQuery) -> StoreResult<Vec<StoredOffer>>;

    /// Get the store name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
