//! Offer hunter CLI.
//!
//! `offer-hunter run` (the default) visits every target once and stores the
//! offers it finds. `offer-hunter list` prints what has been stored.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use offer_hunter::agent;
use offer_hunter::browse::render_listing;
use offer_hunter::stores::ConfiguredStore;
use offer_hunter::{OfferQuery, OfferStore, StoreConfig, TargetOutcome, DEFAULT_TARGETS};

#[derive(Parser)]
#[command(name = "offer-hunter")]
#[command(about = "Harvest credit-card offers from bank promotion pages")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Visit every target and store the offers found
    Run,

    /// Print stored offers grouped by bank, newest first
    List {
        /// Only offers from this bank (exact name)
        #[arg(long)]
        bank: Option<String>,

        /// Maximum number of offers to print
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,offer_hunter=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_mission().await,
        Commands::List { bank, limit } => list_offers(bank, limit).await,
    }
}

async fn run_mission() -> Result<()> {
    tracing::info!("Initializing offer hunter");

    // Load .env file if present (development)
    let _ = dotenvy::dotenv();

    let report = agent::run_from_lookup(|key| std::env::var(key).ok(), DEFAULT_TARGETS).await?;

    for target in &report.targets {
        match &target.outcome {
            TargetOutcome::Stored { count } => {
                tracing::info!(url = %target.url, stored = count, "Target stored offers")
            }
            TargetOutcome::NothingToStore => {
                tracing::info!(url = %target.url, extracted = target.extracted, "Target had nothing to store")
            }
            TargetOutcome::FetchFailed { reason } => {
                tracing::warn!(url = %target.url, reason = %reason, "Target could not be fetched")
            }
            TargetOutcome::StoreFailed { reason } => {
                tracing::warn!(url = %target.url, reason = %reason, "Target offers were not saved")
            }
        }
    }

    tracing::info!(
        stored = report.total_stored(),
        targets = report.targets.len(),
        "Full agent mission complete"
    );

    Ok(())
}

async fn list_offers(bank: Option<String>, limit: Option<usize>) -> Result<()> {
    let config = StoreConfig::from_env()?;
    let store = ConfiguredStore::connect(&config)
        .await
        .context("Failed to open offer store")?;

    let query = OfferQuery {
        bank_name: bank,
        limit,
    };
    let offers = store
        .list_offers(&query)
        .await
        .context("Failed to read stored offers")?;

    print!("{}", render_listing(&offers));
    Ok(())
}
