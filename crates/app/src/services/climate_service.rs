//! Climate service — room temperature queries.

use std::sync::Arc;

use iolite_domain::error::{IoliteError, NotFoundError};
use iolite_domain::heating::Heating;

use crate::ports::HubClient;
use crate::services::discovery_service::DiscoveryService;

/// Application service answering "how warm is it in ..." questions.
pub struct ClimateService<H> {
    discovery: Arc<DiscoveryService<H>>,
}

impl<H: HubClient> ClimateService<H> {
    pub fn new(discovery: Arc<DiscoveryService<H>>) -> Self {
        Self { discovery }
    }

    /// Heating summary of the room with the given hub place name.
    ///
    /// # Errors
    ///
    /// Returns [`IoliteError::NotFound`] when the room is unknown or has no
    /// heating summary, or the hub's error if discovery has to run and fails.
    #[tracing::instrument(skip(self))]
    pub async fn room_climate(&self, room: &str) -> Result<Heating, IoliteError> {
        let outcome = self.discovery.ensure_discovered().await?;
        let entry = outcome
            .discovered
            .find_room_by_name(room)
            .ok_or_else(|| NotFoundError {
                entity: "Room",
                id: room.to_string(),
            })?;
        let heating = entry.heating().ok_or_else(|| NotFoundError {
            entity: "Heating",
            id: room.to_string(),
        })?;
        Ok(heating.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fake_hub::FakeHub;

    fn make_service() -> ClimateService<FakeHub> {
        ClimateService::new(Arc::new(DiscoveryService::new(FakeHub::home())))
    }

    #[tokio::test]
    async fn should_return_heating_of_room() {
        let heating = make_service().room_climate("Flur").await.unwrap();
        assert_eq!(heating.current_temperature, Some(19.5));
        assert_eq!(heating.target_temperature, 21.0);
        assert_eq!(heating.window_open, Some(false));
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_room() {
        let result = make_service().room_climate("Keller").await;
        let Err(IoliteError::NotFound(err)) = result else {
            panic!("expected not found");
        };
        assert_eq!(err.entity, "Room");
    }

    #[tokio::test]
    async fn should_return_not_found_when_room_has_no_heating() {
        let result = make_service().room_climate("WoKo").await;
        let Err(IoliteError::NotFound(err)) = result else {
            panic!("expected not found");
        };
        assert_eq!(err.entity, "Heating");
        assert_eq!(err.id, "WoKo");
    }
}
