//! Snapshot integration configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Where the recorded hub responses live.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// JSON file with `rooms` and `heatings` arrays as returned by the hub.
    pub snapshot_path: PathBuf,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("iolite-snapshot.json"),
        }
    }
}
