//! # iolited — IOLITE bridge daemon
//!
//! Composition root that wires the hub adapter into the application services
//! and runs one discovery pass.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize tracing
//! - Construct the hub adapter and the application services
//! - Classify the hub's rooms, devices and heating summaries
//! - Run the configured blind command, if any
//! - Print the discovered registry as JSON on stdout
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use iolite_adapter_snapshot::SnapshotHub;
use iolite_app::services::blind_service::BlindService;
use iolite_app::services::climate_service::ClimateService;
use iolite_app::services::discovery_service::DiscoveryService;
use iolite_domain::error::IoliteError;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    let filter = EnvFilter::try_new(&config.logging.filter).context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Hub
    let hub = Arc::new(SnapshotHub::load(&config.hub).context("failed to load hub snapshot")?);

    // Services
    let discovery = Arc::new(DiscoveryService::new(Arc::clone(&hub)));
    let climate = ClimateService::new(Arc::clone(&discovery));

    let outcome = discovery.refresh().await.context("discovery failed")?;
    if !outcome.report.is_clean() {
        tracing::warn!(
            skipped = outcome.report.skipped.len(),
            "some hub entities could not be classified"
        );
    }

    for entry in outcome.discovered.rooms() {
        match climate.room_climate(&entry.room.name).await {
            Ok(heating) => tracing::info!(
                room = %entry.room.name,
                current = ?heating.current_temperature,
                target = heating.target_temperature,
                "room climate"
            ),
            Err(IoliteError::NotFound(_)) => {
                tracing::debug!(room = %entry.room.name, "no heating summary");
            }
            Err(err) => return Err(err).context("failed to read room climate"),
        }
    }

    if let Some(request) = config.blinds.request.clone() {
        let blinds = BlindService::new(
            Arc::clone(&hub),
            Arc::clone(&discovery),
            config.blinds.fallback.clone(),
        );
        let ids = if request.targets_all_rooms() {
            blinds.set_all_blinds(request.level).await
        } else {
            blinds.set_room_blinds(&request.room, request.level).await
        }
        .context("failed to set blind level")?;

        if ids.is_empty() {
            tracing::warn!(room = %request.room, "no blinds to command");
        }
    }

    let registry = serde_json::to_string_pretty(&outcome.discovered)
        .context("failed to serialize registry")?;
    println!("{registry}");

    Ok(())
}
