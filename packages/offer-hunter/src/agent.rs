//! Startup sequence for a mission run.
//!
//! Configuration is validated before the store, browser or model is
//! touched, so a missing credential ends the run with no network activity.

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::ai::{GeminiModel, RateLimitedModel};
use crate::config::HunterConfig;
use crate::fetchers::{BrowserFetcher, BrowserOptions};
use crate::pipeline::{Mission, MissionReport, OfferExtractor, OfferSink};
use crate::stores::ConfiguredStore;
use crate::traits::store::OfferStore;

/// Load configuration from `lookup` and run the mission over `targets`.
pub async fn run_from_lookup<L>(
    lookup: L,
    targets: impl IntoIterator<Item = impl Into<String>>,
) -> Result<MissionReport>
where
    L: Fn(&str) -> Option<String>,
{
    let config = match HunterConfig::from_lookup(lookup) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Missing configuration, aborting mission");
            return Err(e).context("Aborting mission before any network activity");
        }
    };

    run_with_config(config, targets).await
}

/// Wire the production components from `config` and run the mission.
pub async fn run_with_config(
    config: HunterConfig,
    targets: impl IntoIterator<Item = impl Into<String>>,
) -> Result<MissionReport> {
    config.log_summary();

    let store = ConfiguredStore::connect(&config.store)
        .await
        .context("Failed to open offer store")?;
    info!(store = store.name(), "Connected to offer store");

    let mut browser = BrowserOptions::default().with_settle_delay(config.pacing.render_wait);
    if let Some(path) = &config.chrome_path {
        browser = browser.with_chrome_path(path);
    }
    let fetcher = BrowserFetcher::new(browser);

    let model = RateLimitedModel::new(
        GeminiModel::new(&config.model.api_key).with_model(&config.model.model),
        config.pacing.model_call_interval,
    );
    let extractor = OfferExtractor::new(model, config.chunking)?;

    let mission = Mission::new(fetcher, extractor, OfferSink::new(store), targets)
        .with_target_interval(config.pacing.target_interval);

    Ok(mission.run().await)
}
