//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`IoliteError`]
//! via `#[from]`. Classification failures are deterministic: the caller is
//! expected to log and skip the offending payload rather than retry.

use crate::payload::RawPayload;

/// Top-level error for the IOLITE voice bridge.
#[derive(Debug, thiserror::Error)]
pub enum IoliteError {
    /// A hub payload could not be turned into a typed entity.
    #[error("classification error")]
    Classification(#[from] ClassificationError),

    /// A caller-supplied value broke a domain invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A looked-up room, device or heating does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The hub (or whatever stands in for it) failed.
    #[error("hub error")]
    Hub(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Why a raw hub payload could not be classified.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassificationError {
    /// A required top-level field is absent, null or empty.
    #[error("payload missing {field}")]
    MissingField { field: &'static str },

    /// A top-level field holds the wrong JSON type.
    #[error("payload field {field} must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    /// The payload's `class` is not the one expected in this context.
    #[error("unsupported entity class {actual:?} when trying to create a {expected}")]
    UnsupportedClass {
        expected: &'static str,
        actual: String,
    },

    /// A required entry of the `properties` list is absent or has no value.
    #[error("failed to find {name} in property set, available: {available:?}")]
    PropertyNotFound {
        name: &'static str,
        /// Names present in the property list, in list order.
        available: Vec<String>,
    },

    /// A property value holds the wrong JSON type.
    #[error("property {name} must be {expected}")]
    InvalidProperty {
        name: &'static str,
        expected: &'static str,
    },

    /// The device type, or the property set of a `Heater`, is not recognised.
    #[error("unsupported device {type_name} ({identifier}) with property set {available:?}")]
    UnsupportedDevice {
        type_name: String,
        identifier: String,
        /// Names present in the property list, in list order.
        available: Vec<String>,
        /// The full payload, kept for diagnostics.
        payload: Box<RawPayload>,
    },
}

/// Domain invariant violations on caller-supplied values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Blind levels are percentages.
    #[error("blind level {0} is outside 0..=100")]
    BlindLevelOutOfRange(i64),
}

/// A lookup in the discovery registry came back empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of thing looked up (`"Room"`, `"Heating"`, ...).
    pub entity: &'static str,
    /// Identifier or name used for the lookup.
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_missing_field() {
        let err = ClassificationError::MissingField { field: "id" };
        assert_eq!(err.to_string(), "payload missing id");
    }

    #[test]
    fn should_display_available_names_when_property_not_found() {
        let err = ClassificationError::PropertyNotFound {
            name: "blindLevel",
            available: vec!["deviceStatus".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "failed to find blindLevel in property set, available: [\"deviceStatus\"]"
        );
    }

    #[test]
    fn should_display_not_found_error() {
        let err = NotFoundError {
            entity: "Room",
            id: "WoKo".to_string(),
        };
        assert_eq!(err.to_string(), "Room WoKo not found");
    }

    #[test]
    fn should_convert_classification_error_into_top_level_error() {
        let err: IoliteError = ClassificationError::MissingField { field: "class" }.into();
        assert!(matches!(
            err,
            IoliteError::Classification(ClassificationError::MissingField { field: "class" })
        ));
    }

    #[test]
    fn should_expose_hub_error_as_source() {
        let io = std::io::Error::other("connection reset");
        let err = IoliteError::Hub(Box::new(io));
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "connection reset");
    }
}
