//! Raw hub payloads — loosely typed JSON objects from the discovery API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ClassificationError;
use crate::property::PropertyList;

/// An untyped JSON object describing one room, device or heating summary.
///
/// Accessors validate JSON types lazily: a field is only checked when a
/// classifier asks for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPayload(Map<String, Value>);

impl RawPayload {
    /// Wrap an existing JSON object.
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Raw access to a top-level field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Borrow the underlying JSON object.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Read a string field, treating absent and `null` as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassificationError::InvalidField`] when the field is not a string.
    pub fn optional_str(&self, field: &'static str) -> Result<Option<&str>, ClassificationError> {
        match self.0.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value)),
            Some(_) => Err(ClassificationError::InvalidField {
                field,
                expected: "a string",
            }),
        }
    }

    /// Read a string field that must be present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ClassificationError::MissingField`] when the field is absent,
    /// `null` or empty, and [`ClassificationError::InvalidField`] when it is
    /// not a string.
    pub fn required_str(&self, field: &'static str) -> Result<&str, ClassificationError> {
        self.optional_str(field)?
            .filter(|value| !value.is_empty())
            .ok_or(ClassificationError::MissingField { field })
    }

    /// Read a numeric field as `f64`, treating absent and `null` as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassificationError::InvalidField`] when the field is not a number.
    pub fn optional_f64(&self, field: &'static str) -> Result<Option<f64>, ClassificationError> {
        match self.0.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value
                .as_f64()
                .map(Some)
                .ok_or(ClassificationError::InvalidField {
                    field,
                    expected: "a number",
                }),
        }
    }

    /// Read a numeric field that must be present.
    ///
    /// # Errors
    ///
    /// Returns [`ClassificationError::MissingField`] when absent or `null`,
    /// [`ClassificationError::InvalidField`] when not a number.
    pub fn required_f64(&self, field: &'static str) -> Result<f64, ClassificationError> {
        self.optional_f64(field)?
            .ok_or(ClassificationError::MissingField { field })
    }

    /// Read a boolean field, treating absent and `null` as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassificationError::InvalidField`] when the field is not a boolean.
    pub fn optional_bool(&self, field: &'static str) -> Result<Option<bool>, ClassificationError> {
        match self.0.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(value)) => Ok(Some(*value)),
            Some(_) => Err(ClassificationError::InvalidField {
                field,
                expected: "a boolean",
            }),
        }
    }

    /// Parse the `properties` association list. Absent or `null` yields an
    /// empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ClassificationError::InvalidField`] when `properties` is not
    /// a list of `{name, value}` objects.
    pub fn properties(&self) -> Result<PropertyList, ClassificationError> {
        match self.0.get("properties") {
            None | Some(Value::Null) => Ok(PropertyList::default()),
            Some(value) => PropertyList::deserialize(value).map_err(|_| {
                ClassificationError::InvalidField {
                    field: "properties",
                    expected: "a list of {name, value} objects",
                }
            }),
        }
    }

    /// Read a list of nested payloads (e.g. the `devices` of a room).
    /// Absent or `null` yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ClassificationError::InvalidField`] when the field is not a
    /// list of JSON objects.
    pub fn nested(&self, field: &'static str) -> Result<Vec<RawPayload>, ClassificationError> {
        match self.0.get(field) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => Vec::<RawPayload>::deserialize(value).map_err(|_| {
                ClassificationError::InvalidField {
                    field,
                    expected: "a list of objects",
                }
            }),
        }
    }
}

impl From<Map<String, Value>> for RawPayload {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl TryFrom<Value> for RawPayload {
    type Error = ClassificationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            _ => Err(ClassificationError::InvalidField {
                field: "payload",
                expected: "a JSON object",
            }),
        }
    }
}
