//! In-memory offer store for testing and development.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::traits::store::OfferStore;
use crate::types::offer::{OfferQuery, OfferRecord, StoredOffer};

/// In-memory offer table.
///
/// Counts insert calls and can be set to reject every insert. Data is lost
/// when the store is dropped.
pub struct MemoryStore {
    rows: RwLock<Vec<StoredOffer>>,
    insert_calls: AtomicUsize,
    failure: Option<String>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            insert_calls: AtomicUsize::new(0),
            failure: None,
        }
    }

    /// Create a store whose inserts fail with a permission error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    /// Get the number of insert calls made, including failed ones.
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    /// Get the number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get every stored row in insertion order.
    pub fn rows(&self) -> Vec<StoredOffer> {
        self.rows.read().unwrap().clone()
    }
}

#[async_trait]
impl OfferStore for MemoryStore {
    async fn insert_offers(&self, offers: &[OfferRecord]) -> StoreResult<usize> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.failure {
            return Err(StoreError::Api {
                status: 403,
                message: message.clone(),
            });
        }

        let mut rows = self.rows.write().unwrap();
        let now = Utc::now();
        for offer in offers {
            let mut row = StoredOffer::from(offer.clone());
            row.id = Some(rows.len() as i64 + 1);
            row.created_at = Some(now);
            rows.push(row);
        }

        Ok(offers.len())
    }

    async fn list_offers(&self, query: &OfferQuery) -> StoreResult<Vec<StoredOffer>> {
        let rows = self.rows.read().unwrap();

        let matching = rows
            .iter()
            .rev()
            .filter(|row| match &query.bank_name {
                Some(bank) => row.bank_name.as_deref() == Some(bank.as_str()),
                None => true,
            })
            .take(query.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok(matching)
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::offer::DISCLAIMER;

    fn offer(bank: &str, details: &str) -> OfferRecord {
        OfferRecord {
            bank_name: bank.to_string(),
            card_name: "Visa Platinum".to_string(),
            merchant_name: "Pan Pacific Sonargaon".to_string(),
            offer_details: details.to_string(),
            source_url: "https://www.ebl.com.bd/retail/EBL-Cards".to_string(),
            disclaimer: DISCLAIMER.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_newest_first() {
        let store = MemoryStore::new();
        store
            .insert_offers(&[offer("EBL", "first"), offer("City Bank", "second")])
            .await
            .unwrap();
        store.insert_offers(&[offer("EBL", "third")]).await.unwrap();

        let all = store.list_offers(&OfferQuery::new()).await.unwrap();
        let details: Vec<_> = all.iter().filter_map(|r| r.offer_details.as_deref()).collect();
        assert_eq!(details, vec!["third", "second", "first"]);
        assert_eq!(all[0].id, Some(3));
        assert_eq!(store.insert_calls(), 2);
    }

    #[tokio::test]
    async fn test_list_filters_by_bank_and_limit() {
        let store = MemoryStore::new();
        store
            .insert_offers(&[offer("EBL", "a"), offer("City Bank", "b"), offer("EBL", "c")])
            .await
            .unwrap();

        let ebl = store
            .list_offers(&OfferQuery::new().for_bank("EBL").with_limit(1))
            .await
            .unwrap();
        assert_eq!(ebl.len(), 1);
        assert_eq!(ebl[0].offer_details.as_deref(), Some("c"));
    }

    #[tokio::test]
    async fn test_failing_store_counts_the_attempt() {
        let store = MemoryStore::failing("row-level security");
        let err = store.insert_offers(&[offer("EBL", "a")]).await.unwrap_err();

        assert!(err.to_string().contains("row-level security"));
        assert_eq!(store.insert_calls(), 1);
        assert!(store.is_empty());
    }
}
