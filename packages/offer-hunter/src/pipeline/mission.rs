//! The mission: fetch, extract and store, one target at a time.
//!
//! Targets run strictly in order. A failing stage is logged and the
//! target counts as a zero result; the mission always moves on to the next
//! target and never returns an error.

use std::time::Duration;

use tracing::{error, info, warn};

use crate::error::FetchError;
use crate::pipeline::extract::OfferExtractor;
use crate::pipeline::sink::OfferSink;
use crate::traits::{fetcher::PageFetcher, model::LanguageModel, store::OfferStore};

/// How one target ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetOutcome {
    /// The page could not be rendered
    FetchFailed { reason: String },

    /// Extraction ran but the filter left nothing
    NothingToStore,

    /// The filtered batch was inserted; `count` is what the store reported
    Stored { count: usize },

    /// The store rejected or lost the batch
    StoreFailed { reason: String },
}

/// Per-target summary.
#[derive(Debug, Clone)]
pub struct TargetReport {
    pub url: String,
    pub outcome: TargetOutcome,

    /// Chunks sent to the model
    pub chunks: usize,

    /// Chunks that produced no records because of an error
    pub failed_chunks: usize,

    /// Records extracted before filtering
    pub extracted: usize,
}

impl TargetReport {
    fn fetch_failed(url: &str, reason: String) -> Self {
        Self {
            url: url.to_string(),
            outcome: TargetOutcome::FetchFailed { reason },
            chunks: 0,
            failed_chunks: 0,
            extracted: 0,
        }
    }

    /// Rows stored for this target.
    pub fn stored(&self) -> usize {
        match self.outcome {
            TargetOutcome::Stored { count } => count,
            _ => 0,
        }
    }
}

/// Summary of a whole run.
#[derive(Debug, Clone, Default)]
pub struct MissionReport {
    pub targets: Vec<TargetReport>,
}

impl MissionReport {
    /// Total rows stored across all targets.
    pub fn total_stored(&self) -> usize {
        self.targets.iter().map(TargetReport::stored).sum()
    }

    /// Number of targets whose page could not be fetched.
    pub fn fetch_failures(&self) -> usize {
        self.targets
            .iter()
            .filter(|t| matches!(t.outcome, TargetOutcome::FetchFailed { .. }))
            .count()
    }

    /// Number of targets whose batch the store rejected.
    pub fn store_failures(&self) -> usize {
        self.targets
            .iter()
            .filter(|t| matches!(t.outcome, TargetOutcome::StoreFailed { .. }))
            .count()
    }
}

/// Runs the fetch, extract and store stages over a fixed target list.
pub struct Mission<F, M, S>
where
    F: PageFetcher,
    M: LanguageModel,
    S: OfferStore,
{
    fetcher: F,
    extractor: OfferExtractor<M>,
    sink: OfferSink<S>,
    targets: Vec<String>,
    target_interval: Duration,
}

impl<F, M, S> Mission<F, M, S>
where
    F: PageFetcher,
    M: LanguageModel,
    S: OfferStore,
{
    pub fn new(
        fetcher: F,
        extractor: OfferExtractor<M>,
        sink: OfferSink<S>,
        targets: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            sink,
            targets: targets.into_iter().map(Into::into).collect(),
            target_interval: Duration::ZERO,
        }
    }

    /// Set the politeness delay between targets.
    pub fn with_target_interval(mut self, interval: Duration) -> Self {
        self.target_interval = interval;
        self
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn extractor(&self) -> &OfferExtractor<M> {
        &self.extractor
    }

    pub fn sink(&self) -> &OfferSink<S> {
        &self.sink
    }

    /// Visit every target in order.
    pub async fn run(&self) -> MissionReport {
        let total = self.targets.len();
        info!(
            targets = total,
            fetcher = self.fetcher.name(),
            store = self.sink.store().name(),
            "Starting offer mission"
        );

        let mut report = MissionReport::default();

        for (i, url) in self.targets.iter().enumerate() {
            info!(index = i + 1, total, url = %url, "Processing target");

            let target = self.run_target(url).await;
            report.targets.push(target);

            if i + 1 < total && !self.target_interval.is_zero() {
                tokio::time::sleep(self.target_interval).await;
            }
        }

        info!(
            targets = total,
            stored = report.total_stored(),
            fetch_failures = report.fetch_failures(),
            store_failures = report.store_failures(),
            "Offer mission complete"
        );

        report
    }

    async fn run_target(&self, url: &str) -> TargetReport {
        let page = match self.fetcher.fetch(url).await {
            Ok(page) if page.has_content() => page,
            Ok(_) => {
                let err = FetchError::EmptyPage {
                    url: url.to_string(),
                };
                warn!(url = %url, error = %err, "Failed to get text, moving on");
                return TargetReport::fetch_failed(url, err.to_string());
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to get text, moving on");
                return TargetReport::fetch_failed(url, e.to_string());
            }
        };

        info!(url = %url, chars = page.char_count(), "Scraped page text");

        let extraction = self.extractor.extract(&page).await;
        let extracted = extraction.offers.len();

        let outcome = match self.sink.persist(extraction.offers).await {
            Ok(sink) if sink.reached_store() => TargetOutcome::Stored {
                count: sink.stored,
            },
            Ok(_) => TargetOutcome::NothingToStore,
            Err(e) => {
                error!(url = %url, error = %e, "Could not save offers to the store");
                TargetOutcome::StoreFailed {
                    reason: e.to_string(),
                }
            }
        };

        TargetReport {
            url: url.to_string(),
            outcome,
            chunks: extraction.chunks,
            failed_chunks: extraction.failed_chunks,
            extracted,
        }
    }
}
