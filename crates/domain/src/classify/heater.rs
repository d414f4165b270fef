//! Heater disambiguation.
//!
//! The hub reports every heating actuator with the same `"Heater"` type
//! name, so the real hardware has to be inferred. [`HEATER_RULES`] is tried
//! top to bottom and the first rule whose predicate holds builds the device:
//!
//! | # | Rule | Predicate | Result |
//! |---|------|-----------|--------|
//! | 1 | `model-signature` | `modelName` starts with [`FLOOR_VALVE_MODEL_PREFIX`] | [`InFloorValve`] |
//! | 2 | `radiator-properties` | any of [`RADIATOR_SIGNATURE`] present | [`RadiatorValve`] |
//! | 3 | `knx-setpoint` | `heatingTemperatureSetting` present | [`InFloorValve`] |
//!
//! Rule 2 ignores a coexisting `heatingTemperatureSetting`. Whether that is
//! intended is still open with product; keep the order as is.

use crate::device::{Device, DeviceInfo, InFloorValve, RadiatorValve};
use crate::error::ClassificationError;
use crate::payload::RawPayload;
use crate::property::PropertyList;

use super::{CURRENT_ENVIRONMENT_TEMPERATURE, unsupported_device};

/// Model-name prefix of the known floor-valve hardware family.
pub const FLOOR_VALVE_MODEL_PREFIX: &str = "38de6001c3ad";

/// Properties only battery radiator thermostats report.
pub const RADIATOR_SIGNATURE: [&str; 3] = ["batteryLevel", "valvePosition", "heatingMode"];

const HEATING_TEMPERATURE_SETTING: &str = "heatingTemperatureSetting";
const DEVICE_STATUS: &str = "deviceStatus";
const UNKNOWN_DEVICE_STATUS: &str = "UNKNOWN";

/// Everything a rule may look at.
struct HeaterContext<'a> {
    model_name: Option<&'a str>,
    properties: &'a PropertyList,
    current_environment_temperature: Option<f64>,
}

struct HeaterRule {
    name: &'static str,
    applies: fn(&HeaterContext<'_>) -> bool,
    build: fn(&HeaterContext<'_>, DeviceInfo) -> Result<Device, ClassificationError>,
}

static HEATER_RULES: [HeaterRule; 3] = [
    HeaterRule {
        name: "model-signature",
        applies: has_floor_valve_model,
        build: build_in_floor_valve,
    },
    HeaterRule {
        name: "radiator-properties",
        applies: has_radiator_properties,
        build: build_radiator_valve,
    },
    HeaterRule {
        name: "knx-setpoint",
        applies: has_knx_setpoint,
        build: build_in_floor_valve,
    },
];

/// Names of the heater rules in evaluation order.
#[must_use]
pub fn heater_rule_names() -> [&'static str; 3] {
    HEATER_RULES.each_ref().map(|rule| rule.name)
}

pub(super) fn resolve(
    info: DeviceInfo,
    model_name: Option<&str>,
    properties: &PropertyList,
    payload: &RawPayload,
) -> Result<Device, ClassificationError> {
    let ctx = HeaterContext {
        model_name,
        properties,
        current_environment_temperature: properties
            .optional_f64(CURRENT_ENVIRONMENT_TEMPERATURE)?,
    };

    match HEATER_RULES.iter().find(|rule| (rule.applies)(&ctx)) {
        Some(rule) => (rule.build)(&ctx, info),
        None => Err(unsupported_device("Heater", &info, properties, payload)),
    }
}

fn has_floor_valve_model(ctx: &HeaterContext<'_>) -> bool {
    ctx.model_name
        .is_some_and(|model| model.starts_with(FLOOR_VALVE_MODEL_PREFIX))
}

fn has_radiator_properties(ctx: &HeaterContext<'_>) -> bool {
    RADIATOR_SIGNATURE
        .iter()
        .any(|name| ctx.properties.contains(name))
}

fn has_knx_setpoint(ctx: &HeaterContext<'_>) -> bool {
    ctx.properties.contains(HEATING_TEMPERATURE_SETTING)
}

fn build_in_floor_valve(
    ctx: &HeaterContext<'_>,
    info: DeviceInfo,
) -> Result<Device, ClassificationError> {
    Ok(Device::InFloorValve(InFloorValve {
        info,
        current_environment_temperature: ctx.current_environment_temperature,
        heating_temperature_setting: ctx.properties.required_f64(HEATING_TEMPERATURE_SETTING)?,
        device_status: ctx
            .properties
            .string_or(DEVICE_STATUS, UNKNOWN_DEVICE_STATUS)?,
    }))
}

fn build_radiator_valve(
    ctx: &HeaterContext<'_>,
    info: DeviceInfo,
) -> Result<Device, ClassificationError> {
    Ok(Device::RadiatorValve(RadiatorValve {
        info,
        current_environment_temperature: ctx.current_environment_temperature,
        battery_level: ctx.properties.optional_i64("batteryLevel")?,
        heating_mode: ctx.properties.optional_string("heatingMode")?,
        valve_position: ctx.properties.optional_f64("valvePosition")?,
    }))
}
