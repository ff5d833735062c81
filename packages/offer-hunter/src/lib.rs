//! Credit-Card Offer Hunter
//!
//! A batch agent that visits bank promotion pages, renders them in a
//! headless browser, asks a language model to pull out credit-card offers,
//! and bulk-inserts the usable ones into a remote `offer` table.
//!
//! # Pipeline
//!
//! For each target, in order:
//!
//! 1. **Fetch** - render the page and keep its visible text ([`PageFetcher`])
//! 2. **Extract** - split the text into overlapping chunks, prompt the model
//!    once per chunk, and recover the JSON array from each reply
//!    ([`OfferExtractor`])
//! 3. **Sink** - drop records without usable details and insert the rest in
//!    one call ([`OfferSink`])
//!
//! A failure in any stage is logged and the mission moves on.
//!
//! # Usage
//!
//! ```rust,ignore
//! use offer_hunter::{Mission, OfferExtractor, OfferSink, ChunkConfig};
//! use offer_hunter::fetchers::MockFetcher;
//! use offer_hunter::stores::MemoryStore;
//! use offer_hunter::testing::MockModel;
//!
//! let fetcher = MockFetcher::new().with_page("https://bank.test/offers", "20% off at Dhaba");
//! let extractor = OfferExtractor::new(MockModel::new(), ChunkConfig::default())?;
//! let mission = Mission::new(fetcher, extractor, OfferSink::new(MemoryStore::new()), ["https://bank.test/offers"]);
//!
//! let report = mission.run().await;
//! println!("stored {} offers", report.total_stored());
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Seams to the browser, the model and the store
//! - [`types`] - Page text, offer records and tunables
//! - [`pipeline`] - Chunking, prompting, extraction, sink and mission
//! - [`fetchers`] - Headless Chrome and mock fetchers
//! - [`ai`] - Gemini model and the rate-limited wrapper
//! - [`stores`] - Supabase, PostgreSQL and in-memory stores
//! - [`browse`] - Grouped listing of stored offers
//! - [`config`] - Environment configuration
//! - [`agent`] - Startup sequence wiring the production components
//! - [`testing`] - Mock model for tests

pub mod agent;
pub mod ai;
pub mod browse;
pub mod config;
pub mod error;
pub mod fetchers;
pub mod pipeline;
pub mod security;
pub mod stores;
pub mod targets;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{
    ConfigError, ExtractionError, FetchError, HunterError, ReplyError, Result, StoreError,
};
pub use traits::{fetcher::PageFetcher, model::LanguageModel, store::OfferStore};
pub use types::{
    config::{ChunkConfig, Pacing},
    offer::{OfferQuery, OfferRecord, StoredOffer, DISCLAIMER, NOT_SPECIFIED},
    page::PageText,
};

// Re-export pipeline components
pub use pipeline::{
    extract_json_array, filter_storable, format_offer_prompt, parse_offer_reply,
    ExtractionReport, Mission, MissionReport, OfferExtractor, OfferSink, SinkReport,
    TargetOutcome, TargetReport, TextSplitter,
};

pub use config::{HunterConfig, ModelConfig, StoreConfig};
pub use security::SecretString;
pub use targets::DEFAULT_TARGETS;
