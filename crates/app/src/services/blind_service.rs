//! Blind service — set blind levels for a room or the whole home.

use std::collections::BTreeMap;
use std::sync::Arc;

use iolite_domain::device::BlindLevel;
use iolite_domain::error::IoliteError;

use crate::ports::HubClient;
use crate::services::discovery_service::DiscoveryService;

/// Blind identifiers to command per room name when discovery found none there.
pub type FallbackBlinds = BTreeMap<String, Vec<String>>;

/// Application service for blind commands.
pub struct BlindService<H> {
    hub: H,
    discovery: Arc<DiscoveryService<H>>,
    fallback: FallbackBlinds,
}

impl<H: HubClient> BlindService<H> {
    /// Create a new service. `hub` receives the commands; `discovery`
    /// provides the room registry.
    pub fn new(hub: H, discovery: Arc<DiscoveryService<H>>, fallback: FallbackBlinds) -> Self {
        Self {
            hub,
            discovery,
            fallback,
        }
    }

    /// Move every blind in `room` (hub place name) to `percent`.
    ///
    /// Falls back to the configured ids when the room has no discovered
    /// blinds. Returns the ids commanded; empty when there was nothing to
    /// command.
    ///
    /// # Errors
    ///
    /// Returns [`IoliteError::Validation`] when `percent` is outside 0–100
    /// (nothing is sent), or the hub's error.
    #[tracing::instrument(skip(self))]
    pub async fn set_room_blinds(&self, room: &str, percent: i64) -> Result<Vec<String>, IoliteError> {
        let level = BlindLevel::new(percent)?;
        let outcome = self.discovery.ensure_discovered().await?;

        let mut ids = outcome.discovered.blind_ids_in_room(room);
        if ids.is_empty() {
            ids = self.fallback.get(room).cloned().unwrap_or_default();
            tracing::debug!(count = ids.len(), "no discovered blinds, using fallback");
        }

        self.send(&ids, level).await?;
        Ok(ids)
    }

    /// Move every known blind to `percent`: all discovered blinds followed
    /// by every fallback id not already included.
    ///
    /// # Errors
    ///
    /// Returns [`IoliteError::Validation`] when `percent` is outside 0–100
    /// (nothing is sent), or the hub's error.
    #[tracing::instrument(skip(self))]
    pub async fn set_all_blinds(&self, percent: i64) -> Result<Vec<String>, IoliteError> {
        let level = BlindLevel::new(percent)?;
        let outcome = self.discovery.ensure_discovered().await?;

        let mut ids = outcome.discovered.all_blind_ids();
        for id in self.fallback.values().flatten() {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }

        self.send(&ids, level).await?;
        Ok(ids)
    }

    async fn send(&self, ids: &[String], level: BlindLevel) -> Result<(), IoliteError> {
        for id in ids {
            self.hub.set_blind_level(id, level).await?;
            tracing::info!(device_id = %id, %level, "blind level sent");
        }
        Ok(())
    }
}
