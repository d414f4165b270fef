//! Snapshot adapter error types.

use iolite_domain::error::IoliteError;

/// Errors specific to the snapshot adapter.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The snapshot file could not be read.
    #[error("failed to read snapshot file")]
    Io(#[from] std::io::Error),

    /// The snapshot file is not valid JSON or has the wrong shape.
    #[error("failed to parse snapshot")]
    Parse(#[from] serde_json::Error),
}

impl SnapshotError {
    /// Convert into an [`IoliteError::Hub`] for propagation across port
    /// boundaries.
    #[must_use]
    pub fn into_domain(self) -> IoliteError {
        IoliteError::Hub(Box::new(self))
    }
}

impl From<SnapshotError> for IoliteError {
    fn from(err: SnapshotError) -> Self {
        err.into_domain()
    }
}
