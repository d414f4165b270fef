//! # iolite-adapter-snapshot
//!
//! File-backed hub that replays a recorded discovery response.
//!
//! ## How it works
//!
//! The snapshot file holds the two discovery responses the bridge needs:
//!
//! ```json
//! {
//!   "rooms": [{ "class": "Room", "id": "...", "placeName": "...", "devices": [...] }],
//!   "heatings": [{ "id": "...", "name": "...", "targetTemperature": 21.0 }]
//! }
//! ```
//!
//! Blind commands are not sent anywhere; they are logged and recorded so
//! callers (and tests) can inspect what would have been sent.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `iolite-app` and `iolite-domain`.

mod config;
mod error;

pub use config::SnapshotConfig;
pub use error::SnapshotError;

use std::future::Future;
use std::sync::{Mutex, PoisonError};

use serde::Deserialize;

use iolite_app::ports::HubClient;
use iolite_domain::device::BlindLevel;
use iolite_domain::error::IoliteError;
use iolite_domain::payload::RawPayload;

/// A blind command captured by [`SnapshotHub`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlindCommand {
    pub device_id: String,
    pub level: BlindLevel,
}

#[derive(Debug, Default, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    rooms: Vec<RawPayload>,
    #[serde(default)]
    heatings: Vec<RawPayload>,
}

/// [`HubClient`] backed by a recorded discovery snapshot.
pub struct SnapshotHub {
    rooms: Vec<RawPayload>,
    heatings: Vec<RawPayload>,
    commands: Mutex<Vec<BlindCommand>>,
}

impl SnapshotHub {
    /// Parse a snapshot from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Parse`] when the text is not a snapshot object.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let file: SnapshotFile = serde_json::from_str(json)?;
        Ok(Self {
            rooms: file.rooms,
            heatings: file.heatings,
            commands: Mutex::new(Vec::new()),
        })
    }

    /// Read and parse the snapshot file named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Io`] when the file cannot be read and
    /// [`SnapshotError::Parse`] when it is malformed.
    pub fn load(config: &SnapshotConfig) -> Result<Self, SnapshotError> {
        let json = std::fs::read_to_string(&config.snapshot_path)?;
        let hub = Self::from_json(&json)?;
        tracing::info!(
            path = %config.snapshot_path.display(),
            rooms = hub.rooms.len(),
            heatings = hub.heatings.len(),
            "snapshot loaded"
        );
        Ok(hub)
    }

    /// Blind commands received so far, oldest first.
    #[must_use]
    pub fn commands(&self) -> Vec<BlindCommand> {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl HubClient for SnapshotHub {
    fn fetch_rooms(&self) -> impl Future<Output = Result<Vec<RawPayload>, IoliteError>> + Send {
        let rooms = self.rooms.clone();
        async { Ok(rooms) }
    }

    fn fetch_heatings(&self) -> impl Future<Output = Result<Vec<RawPayload>, IoliteError>> + Send {
        let heatings = self.heatings.clone();
        async { Ok(heatings) }
    }

    fn set_blind_level(
        &self,
        device_id: &str,
        level: BlindLevel,
    ) -> impl Future<Output = Result<(), IoliteError>> + Send {
        tracing::info!(device_id, %level, "recording blind command");
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(BlindCommand {
                device_id: device_id.to_string(),
                level,
            });
        async { Ok(()) }
    }
}
