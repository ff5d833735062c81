//! Offer sink: drop low-value records and bulk-insert the rest.

use tracing::{debug, info};

use crate::error::StoreResult;
use crate::traits::store::OfferStore;
use crate::types::offer::OfferRecord;

/// Keep only records whose details are present and not the sentinel.
pub fn filter_storable(offers: Vec<OfferRecord>) -> Vec<OfferRecord> {
    offers
        .into_iter()
        .filter(OfferRecord::has_usable_details)
        .collect()
}

/// What the sink did with one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinkReport {
    /// Records handed to the sink
    pub received: usize,

    /// Records left after filtering
    pub kept: usize,

    /// Rows the store reported as written
    pub stored: usize,
}

impl SinkReport {
    /// Check if the batch reached the store.
    ///
    /// True whenever the filter kept something, even if the store then
    /// reported zero rows.
    pub fn reached_store(&self) -> bool {
        self.kept > 0
    }
}

/// Writes filtered offers to an [`OfferStore`].
pub struct OfferSink<S: OfferStore> {
    store: S,
}

impl<S: OfferStore> OfferSink<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Filter a batch and store what remains in a single insert.
    ///
    /// No store call is made when the filter leaves nothing.
    pub async fn persist(&self, offers: Vec<OfferRecord>) -> StoreResult<SinkReport> {
        let received = offers.len();
        let clean = filter_storable(offers);

        let mut report = SinkReport {
            received,
            kept: clean.len(),
            stored: 0,
        };

        debug!(
            received,
            kept = report.kept,
            dropped = received - report.kept,
            "Filtered offers"
        );

        if clean.is_empty() {
            info!("No new clean offers to report");
            return Ok(report);
        }

        info!(count = clean.len(), store = self.store.name(), "Reporting offers to the store");

        report.stored = self.store.insert_offers(&clean).await?;

        info!(stored = report.stored, "Saved offers");

        Ok(report)
    }
}
