//! Typed errors for the offer agent.
//!
//! Each stage has its own error type so the mission can decide per stage
//! whether to skip, continue or abort.

use thiserror::Error;

/// Errors raised while loading process configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required variables are absent or empty
    #[error("missing required configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    /// A variable is present but unusable
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Errors that can occur while fetching a page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Target is not a valid absolute URL
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Browser could not be started (missing binary, bad options)
    #[error("browser launch failed: {0}")]
    Launch(String),

    /// Navigation or rendering failed
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// Page rendered but has no visible text
    #[error("no visible text on {url}")]
    EmptyPage { url: String },

    /// The blocking browser task panicked or was cancelled
    #[error("browser task failed: {0}")]
    Task(String),
}

/// Reasons a model reply yields no records.
#[derive(Debug, Error)]
pub enum ReplyError {
    /// No `[` ... `]` span in the reply
    #[error("no JSON array found in reply")]
    NoJsonArray,

    /// The bracketed span is not valid JSON
    #[error("invalid JSON in reply: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The bracketed span parsed, but not to an array
    #[error("reply JSON is not an array")]
    NotAnArray,
}

/// Errors that can occur during offer extraction.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Splitter settings cannot produce chunks
    #[error("chunk overlap {chunk_overlap} is larger than chunk size {chunk_size}")]
    InvalidChunking {
        chunk_size: usize,
        chunk_overlap: usize,
    },

    /// Language model call failed
    #[error("model error: {0}")]
    Model(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Model reply could not be turned into records
    #[error("unusable reply: {0}")]
    Reply(#[from] ReplyError),
}

/// Errors that can occur while persisting offers.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not reach or open the store
    #[error("store connection failed: {0}")]
    Connect(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The request was sent but failed
    #[error("store request failed: {0}")]
    Request(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The store rejected the request
    #[error("store rejected request ({status}): {message}")]
    Api { status: u16, message: String },

    /// Rows came back in an unexpected shape
    #[error("could not decode stored rows: {0}")]
    Decode(String),
}

impl From<supabase_client::SupabaseError> for StoreError {
    fn from(err: supabase_client::SupabaseError) -> Self {
        match err {
            supabase_client::SupabaseError::Api { status, message } => {
                StoreError::Api { status, message }
            }
            supabase_client::SupabaseError::Http(e) if e.is_decode() => {
                StoreError::Decode(e.to_string())
            }
            supabase_client::SupabaseError::Http(e) => StoreError::Request(Box::new(e)),
            supabase_client::SupabaseError::InvalidUrl(url) => {
                StoreError::Connect(format!("invalid project URL: {}", url).into())
            }
        }
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Configuration(_)
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => StoreError::Connect(Box::new(err)),
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                StoreError::Decode(err.to_string())
            }
            other => StoreError::Request(Box::new(other)),
        }
    }
}

/// Top-level error for agent setup.
#[derive(Debug, Error)]
pub enum HunterError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for extraction operations.
pub type ExtractionResult<T> = std::result::Result<T, ExtractionError>;

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type alias for agent setup.
pub type Result<T> = std::result::Result<T, HunterError>;
