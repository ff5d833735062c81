//! PostgreSQL offer store.
//!
//! Talks to the `offer` table directly instead of through PostgREST. Useful
//! for self-hosted databases and for local runs against a throwaway
//! Postgres.

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::{Postgres, QueryBuilder};
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::security::SecretString;
use crate::traits::store::{OfferStore, OFFER_TABLE};
use crate::types::offer::{OfferQuery, OfferRecord, StoredOffer};

const OFFER_COLUMNS: &str =
    "bank_name, card_name, merchant_name, offer_details, source_url, disclaimer";

/// PostgreSQL-backed offer table.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect to `database_url`, using `password` as the role password.
    ///
    /// # Example URL
    /// `postgres://postgres@db.xyz.supabase.co:5432/postgres`
    pub async fn connect(database_url: &str, password: &SecretString) -> StoreResult<Self> {
        let options = PgConnectOptions::from_str(database_url)?.password(password.expose());

        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    /// Create a store from an existing pool, creating the table if needed.
    pub async fn from_pool(pool: PgPool) -> StoreResult<Self> {
        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS offer (
                id BIGSERIAL PRIMARY KEY,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                bank_name TEXT,
                card_name TEXT,
                merchant_name TEXT,
                offer_details TEXT,
                source_url TEXT,
                disclaimer TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_offer_bank_name ON offer(bank_name)")
            .execute(&self.pool)
            .await?;

        info!(table = OFFER_TABLE, "Offer table ready");
        Ok(())
    }
}

/// Multi-row `INSERT` for a batch of offers.
fn insert_query(offers: &[OfferRecord]) -> QueryBuilder<'_, Postgres> {
    let mut builder = QueryBuilder::new(format!("INSERT INTO {} ({}) ", OFFER_TABLE, OFFER_COLUMNS));
    builder.push_values(offers, |mut row, offer| {
        row.push_bind(&offer.bank_name)
            .push_bind(&offer.card_name)
            .push_bind(&offer.merchant_name)
            .push_bind(&offer.offer_details)
            .push_bind(&offer.source_url)
            .push_bind(&offer.disclaimer);
    });
    builder
}

fn select_query(query: &OfferQuery) -> QueryBuilder<'_, Postgres> {
    let mut builder = QueryBuilder::new(format!(
        "SELECT id, created_at, {} FROM {}",
        OFFER_COLUMNS, OFFER_TABLE
    ));
    if let Some(bank) = &query.bank_name {
        builder.push(" WHERE bank_name = ").push_bind(bank);
    }
    builder.push(" ORDER BY created_at DESC, id DESC");
    if let Some(limit) = query.limit {
        builder.push(" LIMIT ").push_bind(limit as i64);
    }
    builder
}

#[async_trait]
impl OfferStore for PostgresStore {
    async fn insert_offers(&self, offers: &[OfferRecord]) -> StoreResult<usize> {
        if offers.is_empty() {
            return Ok(0);
        }

        let result = insert_query(offers).build().execute(&self.pool).await?;
        debug!(rows = result.rows_affected(), "Inserted offers");
        Ok(result.rows_affected() as usize)
    }

    async fn list_offers(&self, query: &OfferQuery) -> StoreResult<Vec<StoredOffer>> {
        let rows = select_query(query)
            .build_query_as::<StoredOffer>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    fn name(&self) -> &str {
        "postgres"
    }
}
