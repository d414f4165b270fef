//! Heating — a room-level climate summary.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;

/// Climate summary for one room. Not a device: it comes from a separate,
/// flatter payload and shares its identifier with the room it describes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heating {
    pub identifier: String,
    pub name: String,
    /// Measured temperature in °C, when the hub has a reading.
    pub current_temperature: Option<f64>,
    /// Setpoint in °C.
    pub target_temperature: f64,
    pub window_open: Option<bool>,
}

impl Entity for Heating {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn friendly_name(&self) -> &str {
        &self.name
    }
}
