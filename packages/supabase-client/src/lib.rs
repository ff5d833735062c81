//! Pure Supabase PostgREST client.
//!
//! Covers the two table operations the offer agent needs: bulk insert and
//! filtered select. Requests carry the project key both as `apikey` and as
//! a bearer token, which is what the hosted gateway expects.
//!
//! # Example
//!
//! ```rust,ignore
//! use supabase_client::{Order, SelectQuery, SupabaseClient};
//!
//! let client = SupabaseClient::new("https://xyz.supabase.co", "service-key")?;
//!
//! let inserted: Vec<serde_json::Value> = client.insert("offer", &rows).await?;
//! let latest: Vec<serde_json::Value> = client
//!     .select("offer", &SelectQuery::new().order_by("created_at", Order::Descending))
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{Result, SupabaseError};
pub use types::{Order, SelectQuery};

use serde::de::DeserializeOwned;
use serde::Serialize;
use types::PostgrestError;

const REST_PATH: &str = "rest/v1";

#[derive(Clone)]
pub struct SupabaseClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SupabaseClient {
    /// Create a client for a project URL such as `https://xyz.supabase.co`.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(SupabaseError::InvalidUrl(base_url));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}/{}", self.base_url, REST_PATH, table)
    }

    /// Insert rows and return them as stored (`Prefer: return=representation`).
    pub async fn insert<T, R>(&self, table: &str, rows: &[T]) -> Result<Vec<R>>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let resp = self
            .client
            .post(self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
            .json(rows)
            .send()
            .await?;

        let resp = Self::check(resp).await?;
        let inserted: Vec<R> = resp.json().await?;
        tracing::debug!(table, count = inserted.len(), "PostgREST insert");
        Ok(inserted)
    }

    /// Read rows matching a query.
    pub async fn select<R: DeserializeOwned>(
        &self,
        table: &str,
        query: &SelectQuery,
    ) -> Result<Vec<R>> {
        let resp = self
            .client
            .get(self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(&query.to_params())
            .send()
            .await?;

        let resp = Self::check(resp).await?;
        let rows: Vec<R> = resp.json().await?;
        tracing::debug!(table, count = rows.len(), "PostgREST select");
        Ok(rows)
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<PostgrestError>(&body) {
            Ok(err) => {
                let mut message = err.message;
                if let Some(code) = err.code {
                    message = format!("{} [{}]", message, code);
                }
                if let Some(hint) = err.hint {
                    message = format!("{} (hint: {})", message, hint);
                }
                message
            }
            Err(_) => body,
        };

        Err(SupabaseError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
