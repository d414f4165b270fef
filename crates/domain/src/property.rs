//! Device properties — an ordered `{name, value}` association list.
//!
//! The hub reports properties as a list, not a map: names may repeat, and
//! the first entry with a given name is the one that counts.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ClassificationError;

/// A single `{name, value}` entry of a device's property list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// `None` when the entry has no name or a name that is not a string.
    #[serde(default, deserialize_with = "name_or_none")]
    pub name: Option<String>,
    /// `Value::Null` when the entry carries no value.
    #[serde(default)]
    pub value: Value,
}

impl Property {
    #[must_use]
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: Some(name.into()),
            value,
        }
    }

    fn is_named(&self, key: &str) -> bool {
        self.name.as_deref() == Some(key)
    }
}

/// Ordered property list as reported by the hub.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyList(Vec<Property>);

impl PropertyList {
    #[must_use]
    pub fn new(properties: Vec<Property>) -> Self {
        Self(properties)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any entry carries `key` as its name, with or without a value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|p| p.is_named(key))
    }

    /// Names of all named entries, in list order (duplicates kept).
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.0.iter().filter_map(|p| p.name.clone()).collect()
    }

    /// Value of the first entry named `key`.
    ///
    /// Returns `None` when no entry matches or when the first match has no
    /// value; later duplicates are never consulted.
    #[must_use]
    pub fn lookup_optional(&self, key: &str) -> Option<&Value> {
        self.0
            .iter()
            .find(|p| p.is_named(key))
            .map(|p| &p.value)
            .filter(|value| !value.is_null())
    }

    /// Like [`lookup_optional`](Self::lookup_optional) but the value must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ClassificationError::PropertyNotFound`] listing the available
    /// names when the property is absent or has no value.
    pub fn lookup_required(&self, key: &'static str) -> Result<&Value, ClassificationError> {
        self.lookup_optional(key)
            .ok_or_else(|| ClassificationError::PropertyNotFound {
                name: key,
                available: self.names(),
            })
    }

    /// Optional numeric property.
    ///
    /// # Errors
    ///
    /// Returns [`ClassificationError::InvalidProperty`] when the value is not a number.
    pub fn optional_f64(&self, key: &'static str) -> Result<Option<f64>, ClassificationError> {
        self.lookup_optional(key).map(|v| as_f64(key, v)).transpose()
    }

    /// Required numeric property.
    ///
    /// # Errors
    ///
    /// Returns [`ClassificationError::PropertyNotFound`] or
    /// [`ClassificationError::InvalidProperty`].
    pub fn required_f64(&self, key: &'static str) -> Result<f64, ClassificationError> {
        as_f64(key, self.lookup_required(key)?)
    }

    /// Optional integral property.
    ///
    /// # Errors
    ///
    /// Returns [`ClassificationError::InvalidProperty`] when the value is not
    /// an integral number. Integral floats such as `85.0` are accepted.
    pub fn optional_i64(&self, key: &'static str) -> Result<Option<i64>, ClassificationError> {
        self.lookup_optional(key).map(|v| as_i64(key, v)).transpose()
    }

    /// Required integral property.
    ///
    /// # Errors
    ///
    /// Returns [`ClassificationError::PropertyNotFound`] or
    /// [`ClassificationError::InvalidProperty`].
    pub fn required_i64(&self, key: &'static str) -> Result<i64, ClassificationError> {
        as_i64(key, self.lookup_required(key)?)
    }

    /// Optional string property.
    ///
    /// # Errors
    ///
    /// Returns [`ClassificationError::InvalidProperty`] when the value is not a string.
    pub fn optional_string(&self, key: &'static str) -> Result<Option<String>, ClassificationError> {
        self.lookup_optional(key).map(|v| as_string(key, v)).transpose()
    }

    /// String property falling back to `default` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`ClassificationError::InvalidProperty`] when the value is not a string.
    pub fn string_or(&self, key: &'static str, default: &str) -> Result<String, ClassificationError> {
        Ok(self
            .optional_string(key)?
            .unwrap_or_else(|| default.to_string()))
    }
}

impl FromIterator<Property> for PropertyList {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn as_f64(name: &'static str, value: &Value) -> Result<f64, ClassificationError> {
    value.as_f64().ok_or(ClassificationError::InvalidProperty {
        name,
        expected: "a number",
    })
}

fn name_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(name) => Ok(Some(name)),
        _ => Ok(None),
    }
}

fn as_i64(name: &'static str, value: &Value) -> Result<i64, ClassificationError> {
    value
        .as_i64()
        .or_else(|| value.as_f64().and_then(integral))
        .ok_or(ClassificationError::InvalidProperty {
            name,
            expected: "an integer",
        })
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::float_cmp
)]
fn integral(value: f64) -> Option<i64> {
    // 2^63, the first float past i64::MAX.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (value.fract() == 0.0 && (-LIMIT..LIMIT).contains(&value)).then(|| value as i64)
}

fn as_string(name: &'static str, value: &Value) -> Result<String, ClassificationError> {
    value
        .as_str()
        .map(ToString::to_string)
        .ok_or(ClassificationError::InvalidProperty {
            name,
            expected: "a string",
        })
}
