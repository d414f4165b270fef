//! Classifier — turns raw hub payloads into typed entities.
//!
//! All functions here are pure: no IO, no shared state. Each call either
//! returns a complete entity or a [`ClassificationError`] describing why the
//! payload was rejected; nothing partial is ever produced.
//!
//! Device payloads are routed by their `typeName`. The generic `"Heater"`
//! type needs an extra step, see [`heater`].

mod heater;

pub use heater::{FLOOR_VALVE_MODEL_PREFIX, RADIATOR_SIGNATURE, heater_rule_names};

use crate::device::{Blind, Device, DeviceInfo, HumiditySensor, Lamp, Switch};
use crate::error::ClassificationError;
use crate::heating::Heating;
use crate::payload::RawPayload;
use crate::property::PropertyList;
use crate::room::Room;

pub const ROOM_CLASS: &str = "Room";
pub const DEVICE_CLASS: &str = "Device";

pub(crate) const CURRENT_ENVIRONMENT_TEMPERATURE: &str = "currentEnvironmentTemperature";

/// Build a [`Room`] from a discovery payload.
///
/// # Errors
///
/// - [`ClassificationError::MissingField`] when `class`, `id` or `placeName`
///   is absent (or `class`/`id` is empty)
/// - [`ClassificationError::UnsupportedClass`] when `class` is not `"Room"`
pub fn create_room(payload: &RawPayload) -> Result<Room, ClassificationError> {
    let identifier = check_class(payload, ROOM_CLASS)?;
    let name = payload.optional_str("placeName")?.ok_or(ClassificationError::MissingField {
        field: "placeName",
    })?;
    Ok(Room::new(identifier, name))
}

/// Build a [`Device`] from a discovery payload.
///
/// # Errors
///
/// - [`ClassificationError::MissingField`] / [`ClassificationError::UnsupportedClass`]
///   with the same policy as [`create_room`], keyed on `"Device"`
/// - [`ClassificationError::MissingField`] when `typeName`, `placeIdentifier`
///   or `friendlyName` is absent
/// - [`ClassificationError::PropertyNotFound`] when a variant's required
///   property is missing
/// - [`ClassificationError::UnsupportedDevice`] for unknown type names and
///   unrecognised heaters
pub fn create_device(payload: &RawPayload) -> Result<Device, ClassificationError> {
    let identifier = check_class(payload, DEVICE_CLASS)?;
    let type_name = payload.required_str("typeName")?;
    let place_identifier = payload.required_str("placeIdentifier")?;
    let model_name = payload.optional_str("modelName")?;
    let manufacturer = payload.optional_str("manufacturer")?;
    let friendly_name = payload.required_str("friendlyName")?;

    let info = DeviceInfo::new(
        identifier,
        friendly_name,
        place_identifier,
        manufacturer.map(ToString::to_string),
    );
    resolve_variant(info, type_name, model_name, payload)
}

/// Build a [`Heating`] summary from the flat heating payload.
///
/// # Errors
///
/// Returns [`ClassificationError::MissingField`] when `id`, `name` or
/// `targetTemperature` is absent, [`ClassificationError::InvalidField`] on
/// JSON type mismatches.
pub fn create_heating(payload: &RawPayload) -> Result<Heating, ClassificationError> {
    Ok(Heating {
        identifier: payload.required_str("id")?.to_string(),
        name: payload
            .optional_str("name")?
            .ok_or(ClassificationError::MissingField { field: "name" })?
            .to_string(),
        current_temperature: payload.optional_f64("currentTemperature")?,
        target_temperature: payload.required_f64("targetTemperature")?,
        window_open: payload.optional_bool("windowOpen")?,
    })
}

/// Validate `class` and return the non-empty `id`.
fn check_class<'a>(
    payload: &'a RawPayload,
    expected: &'static str,
) -> Result<&'a str, ClassificationError> {
    let class = payload.required_str("class")?;
    let identifier = payload.required_str("id")?;
    if class != expected {
        return Err(ClassificationError::UnsupportedClass {
            expected,
            actual: class.to_string(),
        });
    }
    Ok(identifier)
}

fn resolve_variant(
    info: DeviceInfo,
    type_name: &str,
    model_name: Option<&str>,
    payload: &RawPayload,
) -> Result<Device, ClassificationError> {
    match type_name {
        "Lamp" => Ok(Device::Lamp(Lamp { info })),
        "TwoChannelRockerSwitch" => Ok(Device::Switch(Switch { info })),
        "Blind" => {
            let properties = payload.properties()?;
            Ok(Device::Blind(Blind {
                info,
                blind_level: properties.required_i64("blindLevel")?,
            }))
        }
        "HumiditySensor" => {
            let properties = payload.properties()?;
            let current_environment_temperature =
                properties.optional_f64(CURRENT_ENVIRONMENT_TEMPERATURE)?;
            Ok(Device::HumiditySensor(HumiditySensor {
                info,
                current_environment_temperature,
                humidity_level: properties.required_f64("humidityLevel")?,
            }))
        }
        "Heater" => {
            let properties = payload.properties()?;
            heater::resolve(info, model_name, &properties, payload)
        }
        other => Err(unsupported_device(
            other,
            &info,
            // Best effort: the property list is only diagnostics here.
            &payload.properties().unwrap_or_default(),
            payload,
        )),
    }
}

fn unsupported_device(
    type_name: &str,
    info: &DeviceInfo,
    properties: &PropertyList,
    payload: &RawPayload,
) -> ClassificationError {
    ClassificationError::UnsupportedDevice {
        type_name: type_name.to_string(),
        identifier: info.identifier.clone(),
        available: properties.names(),
        payload: Box::new(payload.clone()),
    }
}
