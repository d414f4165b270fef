//! Discovery registry — rooms with their devices and heating, as found in
//! one discovery pass.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::device::{Blind, Device};
use crate::entity::Entity;
use crate::error::NotFoundError;
use crate::heating::Heating;
use crate::room::Room;

/// UTC timestamp of a discovery pass.
pub type Timestamp = DateTime<Utc>;

/// A room together with everything attached to it.
#[derive(Debug, Clone, Serialize)]
pub struct RoomEntry {
    pub room: Room,
    devices: Vec<Device>,
    heating: Option<Heating>,
}

impl RoomEntry {
    fn new(room: Room) -> Self {
        Self {
            room,
            devices: Vec::new(),
            heating: None,
        }
    }

    /// Devices in discovery order.
    #[must_use]
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    #[must_use]
    pub fn device(&self, identifier: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.identifier() == identifier)
    }

    #[must_use]
    pub fn heating(&self) -> Option<&Heating> {
        self.heating.as_ref()
    }

    pub fn blinds(&self) -> impl Iterator<Item = &Blind> {
        self.devices.iter().filter_map(Device::as_blind)
    }

    fn upsert_device(&mut self, device: Device) {
        match self
            .devices
            .iter_mut()
            .find(|d| d.identifier() == device.identifier())
        {
            Some(existing) => *existing = device,
            None => self.devices.push(device),
        }
    }
}

/// Result of one discovery pass. Immutable once handed out.
#[derive(Debug, Clone, Serialize)]
pub struct Discovered {
    rooms: Vec<RoomEntry>,
    discovered_at: Timestamp,
}

impl Default for Discovered {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Discovered {
    #[must_use]
    pub fn new(discovered_at: Timestamp) -> Self {
        Self {
            rooms: Vec::new(),
            discovered_at,
        }
    }

    #[must_use]
    pub fn discovered_at(&self) -> Timestamp {
        self.discovered_at
    }

    /// Register a room. A room with the same identifier is replaced but
    /// keeps its devices and heating.
    pub fn add_room(&mut self, room: Room) {
        match self.room_mut(&room.identifier) {
            Some(entry) => entry.room = room,
            None => self.rooms.push(RoomEntry::new(room)),
        }
    }

    /// Attach a device to the room named by its place identifier.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when no room with that identifier exists.
    pub fn add_device(&mut self, device: Device) -> Result<(), NotFoundError> {
        let place = device.place_identifier().to_string();
        let entry = self.room_mut(&place).ok_or(NotFoundError {
            entity: "Room",
            id: place,
        })?;
        entry.upsert_device(device);
        Ok(())
    }

    /// Attach a heating summary to the room sharing its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when no room with that identifier exists.
    pub fn attach_heating(&mut self, heating: Heating) -> Result<(), NotFoundError> {
        let entry = self
            .room_mut(&heating.identifier)
            .ok_or_else(|| NotFoundError {
                entity: "Room",
                id: heating.identifier.clone(),
            })?;
        entry.heating = Some(heating);
        Ok(())
    }

    /// Rooms in discovery order.
    #[must_use]
    pub fn rooms(&self) -> &[RoomEntry] {
        &self.rooms
    }

    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    #[must_use]
    pub fn device_count(&self) -> usize {
        self.rooms.iter().map(|r| r.devices.len()).sum()
    }

    #[must_use]
    pub fn find_room_by_identifier(&self, identifier: &str) -> Option<&RoomEntry> {
        self.rooms.iter().find(|r| r.room.identifier == identifier)
    }

    /// Exact, case-sensitive match on the hub's place name.
    #[must_use]
    pub fn find_room_by_name(&self, name: &str) -> Option<&RoomEntry> {
        self.rooms.iter().find(|r| r.room.name == name)
    }

    /// Identifiers of the blinds in the named room; empty for unknown rooms.
    #[must_use]
    pub fn blind_ids_in_room(&self, name: &str) -> Vec<String> {
        self.find_room_by_name(name)
            .map(|entry| entry.blinds().map(|b| b.info.identifier.clone()).collect())
            .unwrap_or_default()
    }

    /// Identifiers of every blind, de-duplicated, in discovery order.
    #[must_use]
    pub fn all_blind_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for blind in self.rooms.iter().flat_map(RoomEntry::blinds) {
            if !ids.contains(&blind.info.identifier) {
                ids.push(blind.info.identifier.clone());
            }
        }
        ids
    }

    fn room_mut(&mut self, identifier: &str) -> Option<&mut RoomEntry> {
        self.rooms
            .iter_mut()
            .find(|r| r.room.identifier == identifier)
    }
}
