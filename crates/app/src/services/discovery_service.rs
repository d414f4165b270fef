//! Discovery service — classifies hub payloads into a room registry.
//!
//! One malformed or unsupported payload never aborts a pass: it is logged,
//! recorded in the [`DiscoveryReport`], and the remaining payloads are still
//! classified. Only hub failures abort.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use iolite_domain::classify::{create_device, create_heating, create_room};
use iolite_domain::discovery::Discovered;
use iolite_domain::error::{ClassificationError, IoliteError, NotFoundError};
use iolite_domain::payload::RawPayload;

use crate::ports::HubClient;

/// Which factory rejected a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Room,
    Device,
    Heating,
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Room => f.write_str("room"),
            Self::Device => f.write_str("device"),
            Self::Heating => f.write_str("heating"),
        }
    }
}

/// Why a payload was left out of the registry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SkipReason {
    #[error(transparent)]
    Classification(#[from] ClassificationError),

    /// Classified fine, but the room it belongs to is unknown.
    #[error("orphaned: {0}")]
    UnknownRoom(#[from] NotFoundError),
}

/// A payload that was skipped during discovery.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntity {
    pub kind: PayloadKind,
    /// The payload's `id`, when it had a readable one.
    pub identifier: Option<String>,
    pub reason: SkipReason,
}

/// Everything that did not make it into the registry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoveryReport {
    pub skipped: Vec<SkippedEntity>,
}

impl DiscoveryReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    fn skip(&mut self, kind: PayloadKind, payload: &RawPayload, reason: impl Into<SkipReason>) {
        let reason = reason.into();
        let identifier = payload
            .get("id")
            .and_then(serde_json::Value::as_str)
            .map(ToString::to_string);
        tracing::warn!(
            %kind,
            identifier = identifier.as_deref().unwrap_or("<none>"),
            error = %reason,
            "skipping payload"
        );
        self.skipped.push(SkippedEntity {
            kind,
            identifier,
            reason,
        });
    }
}

/// A completed discovery pass.
#[derive(Debug, Clone)]
pub struct DiscoveryOutcome {
    pub discovered: Discovered,
    pub report: DiscoveryReport,
}

/// Application service running discovery passes and caching the last one.
pub struct DiscoveryService<H> {
    hub: H,
    cache: RwLock<Option<Arc<DiscoveryOutcome>>>,
}

impl<H: HubClient> DiscoveryService<H> {
    /// Create a new service talking to the given hub.
    pub fn new(hub: H) -> Self {
        Self {
            hub,
            cache: RwLock::new(None),
        }
    }

    /// Run a full discovery pass without touching the cache.
    ///
    /// Rooms are registered first, then the devices nested in every accepted
    /// room payload, then heating summaries. A rejected room is reported once
    /// and its nested devices are not classified.
    ///
    /// # Errors
    ///
    /// Returns the hub's error when fetching payloads fails. Classification
    /// failures are reported in [`DiscoveryOutcome::report`] instead.
    #[tracing::instrument(skip(self))]
    pub async fn discover(&self) -> Result<DiscoveryOutcome, IoliteError> {
        let room_payloads = self.hub.fetch_rooms().await?;
        let heating_payloads = self.hub.fetch_heatings().await?;

        let mut discovered = Discovered::new(Utc::now());
        let mut report = DiscoveryReport::default();
        let mut device_payloads = Vec::new();

        for payload in &room_payloads {
            // A rejected room takes its nested devices with it.
            let room = match create_room(payload) {
                Ok(room) => room,
                Err(err) => {
                    report.skip(PayloadKind::Room, payload, err);
                    continue;
                }
            };
            discovered.add_room(room);
            match payload.nested("devices") {
                Ok(devices) => device_payloads.extend(devices),
                Err(err) => report.skip(PayloadKind::Room, payload, err),
            }
        }

        for payload in &device_payloads {
            let result = create_device(payload)
                .map_err(SkipReason::from)
                .and_then(|device| {
                    tracing::debug!(kind = %device.kind(), "classified device");
                    discovered.add_device(device).map_err(SkipReason::from)
                });
            if let Err(reason) = result {
                report.skip(PayloadKind::Device, payload, reason);
            }
        }

        for payload in &heating_payloads {
            let result = create_heating(payload)
                .map_err(SkipReason::from)
                .and_then(|heating| discovered.attach_heating(heating).map_err(SkipReason::from));
            if let Err(reason) = result {
                report.skip(PayloadKind::Heating, payload, reason);
            }
        }

        tracing::info!(
            rooms = discovered.room_count(),
            devices = discovered.device_count(),
            skipped = report.skipped.len(),
            "discovery complete"
        );

        Ok(DiscoveryOutcome { discovered, report })
    }

    /// Run a discovery pass and replace the cached result.
    ///
    /// # Errors
    ///
    /// Returns the hub's error; the previous cache is kept in that case.
    pub async fn refresh(&self) -> Result<Arc<DiscoveryOutcome>, IoliteError> {
        let outcome = Arc::new(self.discover().await?);
        *self.cache.write().await = Some(Arc::clone(&outcome));
        Ok(outcome)
    }

    /// Return the cached result, running discovery first if there is none.
    ///
    /// # Errors
    ///
    /// Returns the hub's error when a first discovery pass is needed and fails.
    pub async fn ensure_discovered(&self) -> Result<Arc<DiscoveryOutcome>, IoliteError> {
        if let Some(outcome) = self.cache.read().await.as_ref() {
            return Ok(Arc::clone(outcome));
        }

        let mut cache = self.cache.write().await;
        // Another task may have filled the cache while we waited for the lock.
        if let Some(outcome) = cache.as_ref() {
            return Ok(Arc::clone(outcome));
        }
        let outcome = Arc::new(self.discover().await?);
        *cache = Some(Arc::clone(&outcome));
        Ok(outcome)
    }

    /// The cached result, if any pass has completed.
    pub async fn cached(&self) -> Option<Arc<DiscoveryOutcome>> {
        self.cache.read().await.clone()
    }
}
