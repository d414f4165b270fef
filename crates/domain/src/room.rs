//! Room — a place reported by the hub.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;

/// A room as reported by hub discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub identifier: String,
    /// The hub's place name, e.g. `"WoKo"`.
    pub name: String,
}

impl Room {
    #[must_use]
    pub fn new(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
        }
    }
}

impl Entity for Room {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn friendly_name(&self) -> &str {
        &self.name
    }
}
