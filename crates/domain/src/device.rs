//! Device — the closed family of hardware variants the classifier resolves.
//!
//! Every variant carries a [`DeviceInfo`] with the fields shared by all
//! devices; variant-specific readings live next to it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::ValidationError;

/// Fields common to every device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub identifier: String,
    pub friendly_name: String,
    /// Identifier of the room that owns this device.
    pub place_identifier: String,
    pub manufacturer: Option<String>,
}

impl DeviceInfo {
    #[must_use]
    pub fn new(
        identifier: impl Into<String>,
        friendly_name: impl Into<String>,
        place_identifier: impl Into<String>,
        manufacturer: Option<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            friendly_name: friendly_name.into(),
            place_identifier: place_identifier.into(),
            manufacturer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lamp {
    #[serde(flatten)]
    pub info: DeviceInfo,
}

/// A two-channel rocker switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Switch {
    #[serde(flatten)]
    pub info: DeviceInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blind {
    #[serde(flatten)]
    pub info: DeviceInfo,
    /// Current level in percent as reported; not range-checked.
    pub blind_level: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumiditySensor {
    #[serde(flatten)]
    pub info: DeviceInfo,
    pub current_environment_temperature: Option<f64>,
    pub humidity_level: f64,
}

/// Battery-powered radiator thermostat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadiatorValve {
    #[serde(flatten)]
    pub info: DeviceInfo,
    pub current_environment_temperature: Option<f64>,
    pub battery_level: Option<i64>,
    pub heating_mode: Option<String>,
    pub valve_position: Option<f64>,
}

/// Underfloor heating valve, including KNX-style actuators exposing a setpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InFloorValve {
    #[serde(flatten)]
    pub info: DeviceInfo,
    pub current_environment_temperature: Option<f64>,
    pub heating_temperature_setting: f64,
    /// `"UNKNOWN"` when the hub did not report a status.
    pub device_status: String,
}

/// A classified hub device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Device {
    Lamp(Lamp),
    Switch(Switch),
    Blind(Blind),
    HumiditySensor(HumiditySensor),
    RadiatorValve(RadiatorValve),
    InFloorValve(InFloorValve),
}

impl Device {
    /// Shared fields of whichever variant this is.
    #[must_use]
    pub fn info(&self) -> &DeviceInfo {
        match self {
            Self::Lamp(d) => &d.info,
            Self::Switch(d) => &d.info,
            Self::Blind(d) => &d.info,
            Self::HumiditySensor(d) => &d.info,
            Self::RadiatorValve(d) => &d.info,
            Self::InFloorValve(d) => &d.info,
        }
    }

    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        match self {
            Self::Lamp(_) => DeviceKind::Lamp,
            Self::Switch(_) => DeviceKind::Switch,
            Self::Blind(_) => DeviceKind::Blind,
            Self::HumiditySensor(_) => DeviceKind::HumiditySensor,
            Self::RadiatorValve(_) => DeviceKind::RadiatorValve,
            Self::InFloorValve(_) => DeviceKind::InFloorValve,
        }
    }

    #[must_use]
    pub fn place_identifier(&self) -> &str {
        &self.info().place_identifier
    }

    #[must_use]
    pub fn manufacturer(&self) -> Option<&str> {
        self.info().manufacturer.as_deref()
    }

    /// Ambient temperature for variants that measure it.
    #[must_use]
    pub fn current_environment_temperature(&self) -> Option<f64> {
        match self {
            Self::Lamp(_) | Self::Switch(_) | Self::Blind(_) => None,
            Self::HumiditySensor(d) => d.current_environment_temperature,
            Self::RadiatorValve(d) => d.current_environment_temperature,
            Self::InFloorValve(d) => d.current_environment_temperature,
        }
    }

    #[must_use]
    pub fn as_blind(&self) -> Option<&Blind> {
        match self {
            Self::Blind(blind) => Some(blind),
            _ => None,
        }
    }
}

impl Entity for Device {
    fn identifier(&self) -> &str {
        &self.info().identifier
    }

    fn friendly_name(&self) -> &str {
        &self.info().friendly_name
    }
}

/// Fieldless mirror of [`Device`] for logging and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Lamp,
    Switch,
    Blind,
    HumiditySensor,
    RadiatorValve,
    InFloorValve,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lamp => f.write_str("lamp"),
            Self::Switch => f.write_str("switch"),
            Self::Blind => f.write_str("blind"),
            Self::HumiditySensor => f.write_str("humidity_sensor"),
            Self::RadiatorValve => f.write_str("radiator_valve"),
            Self::InFloorValve => f.write_str("in_floor_valve"),
        }
    }
}

/// A blind level to command, in percent (0–100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct BlindLevel(u8);

impl BlindLevel {
    /// Fully open.
    pub const OPEN: Self = Self(0);
    /// Fully closed.
    pub const CLOSED: Self = Self(100);

    /// Validate a requested percentage.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BlindLevelOutOfRange`] outside `0..=100`.
    pub fn new(percent: i64) -> Result<Self, ValidationError> {
        match u8::try_from(percent) {
            Ok(value) if value <= 100 => Ok(Self(value)),
            _ => Err(ValidationError::BlindLevelOutOfRange(percent)),
        }
    }

    #[must_use]
    pub fn percent(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for BlindLevel {
    type Error = ValidationError;

    fn try_from(percent: i64) -> Result<Self, Self::Error> {
        Self::new(percent)
    }
}

impl From<BlindLevel> for i64 {
    fn from(level: BlindLevel) -> Self {
        i64::from(level.0)
    }
}

impl fmt::Display for BlindLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> DeviceInfo {
        DeviceInfo::new("Blind_21", "Living room blind", "Place_1", None)
    }

    #[test]
    fn should_expose_shared_info_for_every_variant() {
        let device = Device::Blind(Blind {
            info: info(),
            blind_level: 40,
        });
        assert_eq!(device.identifier(), "Blind_21");
        assert_eq!(device.friendly_name(), "Living room blind");
        assert_eq!(device.place_identifier(), "Place_1");
        assert_eq!(device.manufacturer(), None);
        assert_eq!(device.kind(), DeviceKind::Blind);
    }

    #[test]
    fn should_return_blind_only_for_blind_variant() {
        let lamp = Device::Lamp(Lamp { info: info() });
        assert!(lamp.as_blind().is_none());
    }

    #[test]
    fn should_report_environment_temperature_of_sensors() {
        let sensor = Device::HumiditySensor(HumiditySensor {
            info: info(),
            current_environment_temperature: Some(21.5),
            humidity_level: 48.0,
        });
        assert_eq!(sensor.current_environment_temperature(), Some(21.5));
    }

    #[test]
    fn should_serialize_with_kind_tag_and_flattened_info() {
        let device = Device::Switch(Switch { info: info() });
        let json = serde_json::to_value(&device).unwrap();
        assert_eq!(json["kind"], "switch");
        assert_eq!(json["identifier"], "Blind_21");
        assert_eq!(json["place_identifier"], "Place_1");
    }

    #[test]
    fn should_display_kind_in_snake_case() {
        assert_eq!(DeviceKind::InFloorValve.to_string(), "in_floor_valve");
    }

    #[test]
    fn should_accept_blind_level_bounds() {
        assert_eq!(BlindLevel::new(0).unwrap(), BlindLevel::OPEN);
        assert_eq!(BlindLevel::new(100).unwrap(), BlindLevel::CLOSED);
        assert_eq!(BlindLevel::new(55).unwrap().to_string(), "55%");
    }

    #[test]
    fn should_reject_blind_level_out_of_range() {
        assert_eq!(
            BlindLevel::new(101),
            Err(ValidationError::BlindLevelOutOfRange(101))
        );
        assert_eq!(
            BlindLevel::new(-1),
            Err(ValidationError::BlindLevelOutOfRange(-1))
        );
    }
}
