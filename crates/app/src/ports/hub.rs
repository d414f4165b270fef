//! Hub port — discovery queries and device commands against the smart-home hub.
//!
//! Authentication, session handling and retries belong to the implementation;
//! the application only sees already-authenticated request/response calls.

use std::future::Future;

use iolite_domain::device::BlindLevel;
use iolite_domain::error::IoliteError;
use iolite_domain::payload::RawPayload;

/// Access to the hub's discovery API and command endpoints.
pub trait HubClient {
    /// Room payloads. Each may carry a nested `devices` list of device payloads.
    fn fetch_rooms(&self) -> impl Future<Output = Result<Vec<RawPayload>, IoliteError>> + Send;

    /// Flat heating summary payloads, one per heated room.
    fn fetch_heatings(&self) -> impl Future<Output = Result<Vec<RawPayload>, IoliteError>> + Send;

    /// Move one blind to `level`.
    fn set_blind_level(
        &self,
        device_id: &str,
        level: BlindLevel,
    ) -> impl Future<Output = Result<(), IoliteError>> + Send;
}

impl<T: HubClient + Send + Sync> HubClient for std::sync::Arc<T> {
    fn fetch_rooms(&self) -> impl Future<Output = Result<Vec<RawPayload>, IoliteError>> + Send {
        (**self).fetch_rooms()
    }

    fn fetch_heatings(&self) -> impl Future<Output = Result<Vec<RawPayload>, IoliteError>> + Send {
        (**self).fetch_heatings()
    }

    fn set_blind_level(
        &self,
        device_id: &str,
        level: BlindLevel,
    ) -> impl Future<Output = Result<(), IoliteError>> + Send {
        (**self).set_blind_level(device_id, level)
    }
}
