//! Supabase (PostgREST) offer store.

use async_trait::async_trait;
use serde_json::Value;
use supabase_client::{Order, SelectQuery, SupabaseClient};
use tracing::debug;

use crate::error::StoreResult;
use crate::security::SecretString;
use crate::traits::store::{OfferStore, OFFER_TABLE};
use crate::types::offer::{OfferQuery, OfferRecord, StoredOffer};

/// Offer table behind a Supabase project's REST API.
#[derive(Clone)]
pub struct SupabaseStore {
    client: SupabaseClient,
}

impl SupabaseStore {
    /// Create a store for a project URL such as `https://xyz.supabase.co`.
    pub fn new(project_url: &str, api_key: &SecretString) -> StoreResult<Self> {
        let client = SupabaseClient::new(project_url, api_key.expose())?;
        Ok(Self { client })
    }

    pub fn project_url(&self) -> &str {
        self.client.base_url()
    }
}

#[async_trait]
impl OfferStore for SupabaseStore {
    async fn insert_offers(&self, offers: &[OfferRecord]) -> StoreResult<usize> {
        let inserted: Vec<Value> = self.client.insert(OFFER_TABLE, offers).await?;
        debug!(sent = offers.len(), returned = inserted.len(), "Inserted offers");
        Ok(inserted.len())
    }

    async fn list_offers(&self, query: &OfferQuery) -> StoreResult<Vec<StoredOffer>> {
        let mut select = SelectQuery::new().order_by("created_at", Order::Descending);
        if let Some(bank) = &query.bank_name {
            select = select.eq("bank_name", bank.as_str());
        }
        if let Some(limit) = query.limit {
            select = select.limit(limit);
        }

        Ok(self.client.select(OFFER_TABLE, &select).await?)
    }

    fn name(&self) -> &str {
        "supabase"
    }
}
