//! In-memory [`HubClient`] shared by the service tests.

use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use iolite_domain::device::BlindLevel;
use iolite_domain::error::IoliteError;
use iolite_domain::payload::RawPayload;
use serde_json::{Value, json};

use crate::ports::HubClient;

#[derive(Default)]
pub struct FakeHub {
    pub rooms: Vec<RawPayload>,
    pub heatings: Vec<RawPayload>,
    pub fail_fetch: bool,
    pub fetches: AtomicUsize,
    pub commands: Mutex<Vec<(String, BlindLevel)>>,
}

impl FakeHub {
    pub fn commands(&self) -> Vec<(String, BlindLevel)> {
        self.commands.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Two rooms: `WoKo` with two blinds and a lamp, `Flur` with one heater
    /// and a heating summary.
    pub fn home() -> Self {
        Self {
            rooms: vec![
                room(
                    "p1",
                    "WoKo",
                    json!([
                        device("Blind_22", "Blind", "p1", json!([{ "name": "blindLevel", "value": 0 }])),
                        device("Lamp_1", "Lamp", "p1", json!([])),
                        device("Blind_21", "Blind", "p1", json!([{ "name": "blindLevel", "value": 100 }])),
                    ]),
                ),
                room(
                    "p2",
                    "Flur",
                    json!([device(
                        "Heater_1",
                        "Heater",
                        "p2",
                        json!([{ "name": "heatingTemperatureSetting", "value": 21.0 }]),
                    )]),
                ),
                room("p3", "Schlafen", json!([])),
            ],
            heatings: vec![payload(json!({
                "id": "p2",
                "name": "Flur",
                "currentTemperature": 19.5,
                "targetTemperature": 21.0,
                "windowOpen": false,
            }))],
            ..Self::default()
        }
    }
}

pub fn payload(value: Value) -> RawPayload {
    RawPayload::try_from(value).unwrap()
}

pub fn room(id: &str, name: &str, devices: Value) -> RawPayload {
    payload(json!({
        "class": "Room",
        "id": id,
        "placeName": name,
        "devices": devices,
    }))
}

pub fn device(id: &str, type_name: &str, place: &str, properties: Value) -> Value {
    json!({
        "class": "Device",
        "id": id,
        "typeName": type_name,
        "placeIdentifier": place,
        "friendlyName": id,
        "properties": properties,
    })
}

impl HubClient for FakeHub {
    fn fetch_rooms(&self) -> impl Future<Output = Result<Vec<RawPayload>, IoliteError>> + Send {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let result = if self.fail_fetch {
            Err(IoliteError::Hub(Box::new(std::io::Error::other("hub offline"))))
        } else {
            Ok(self.rooms.clone())
        };
        async { result }
    }

    fn fetch_heatings(&self) -> impl Future<Output = Result<Vec<RawPayload>, IoliteError>> + Send {
        let result = Ok(self.heatings.clone());
        async { result }
    }

    fn set_blind_level(
        &self,
        device_id: &str,
        level: BlindLevel,
    ) -> impl Future<Output = Result<(), IoliteError>> + Send {
        self.commands
            .lock()
            .unwrap()
            .push((device_id.to_string(), level));
        async { Ok(()) }
    }
}
