//! Offer store implementations.
//!
//! Available backends:
//! - `SupabaseStore` - PostgREST over HTTPS (always available)
//! - `PostgresStore` - direct PostgreSQL connection (requires `postgres` feature)
//! - `MemoryStore` - in-memory table for tests

pub mod memory;
pub mod supabase;

#[cfg(feature = "postgres")]
pub mod postgres;

use async_trait::async_trait;

use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::traits::store::OfferStore;
use crate::types::offer::{OfferQuery, OfferRecord, StoredOffer};

pub use memory::MemoryStore;
pub use supabase::SupabaseStore;

#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;

/// Check if a store endpoint is a PostgreSQL connection string.
pub fn is_postgres_url(endpoint: &str) -> bool {
    endpoint.starts_with("postgres://") || endpoint.starts_with("postgresql://")
}

/// The store chosen from configuration.
pub enum ConfiguredStore {
    Supabase(SupabaseStore),
    #[cfg(feature = "postgres")]
    Postgres(PostgresStore),
}

impl ConfiguredStore {
    /// Open the backend matching the endpoint scheme.
    ///
    /// `postgres://` and `postgresql://` endpoints connect directly; anything
    /// else is treated as a Supabase project URL.
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        if is_postgres_url(&config.endpoint) {
            #[cfg(feature = "postgres")]
            {
                let store = PostgresStore::connect(&config.endpoint, &config.api_key).await?;
                return Ok(Self::Postgres(store));
            }

            #[cfg(not(feature = "postgres"))]
            return Err(crate::error::StoreError::Connect(
                "PostgreSQL endpoints need the `postgres` feature".into(),
            ));
        }

        Ok(Self::Supabase(SupabaseStore::new(
            &config.endpoint,
            &config.api_key,
        )?))
    }
}

#[async_trait]
impl OfferStore for ConfiguredStore {
    async fn insert_offers(&self, offers: &[OfferRecord]) -> StoreResult<usize> {
        match self {
            Self::Supabase(store) => store.insert_offers(offers).await,
            #[cfg(feature = "postgres")]
            Self::Postgres(store) => store.insert_offers(offers).await,
        }
    }

    async fn list_offers(&self, query: &OfferQuery) -> StoreResult<Vec<StoredOffer>> {
        match self {
            Self::Supabase(store) => store.list_offers(query).await,
            #[cfg(feature = "postgres")]
            Self::Postgres(store) => store.list_offers(query).await,
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Supabase(store) => store.name(),
            #[cfg(feature = "postgres")]
            Self::Postgres(store) => store.name(),
        }
    }
}
