//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `iolite.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use iolite_adapter_snapshot::SnapshotConfig;
use iolite_app::services::blind_service::FallbackBlinds;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hub access settings.
    pub hub: SnapshotConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Blind fallbacks and the optional one-shot command.
    pub blinds: BlindsConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Blind settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BlindsConfig {
    /// Room name → blind ids, used when discovery finds no blinds in a room.
    pub fallback: FallbackBlinds,
    /// Blind command to run after discovery.
    pub request: Option<BlindRequest>,
}

/// A single "set blinds in room to level" command.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlindRequest {
    /// Hub place name, or `*` for every blind.
    pub room: String,
    /// Target level in percent.
    pub level: i64,
}

impl BlindRequest {
    /// Room value that targets every blind in the home.
    pub const ALL_ROOMS: &'static str = "*";

    #[must_use]
    pub fn targets_all_rooms(&self) -> bool {
        self.room == Self::ALL_ROOMS
    }
}

impl Config {
    /// Load configuration from `iolite.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("iolite.toml")?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("IOLITE_SNAPSHOT") {
            self.hub.snapshot_path = val.into();
        }
        if let Ok(val) = std::env::var("IOLITE_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(request) = blind_request_from_env(
            std::env::var("IOLITE_BLIND_ROOM").ok(),
            std::env::var("IOLITE_BLIND_LEVEL").ok(),
        )? {
            self.blinds.request = Some(request);
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.hub.snapshot_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "snapshot path must not be empty".to_string(),
            ));
        }
        if let Some(request) = &self.blinds.request {
            if request.room.is_empty() {
                return Err(ConfigError::Validation(
                    "blind request room must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Build the one-shot blind command from `IOLITE_BLIND_ROOM` and
/// `IOLITE_BLIND_LEVEL`. Both must be set, or neither.
fn blind_request_from_env(
    room: Option<String>,
    level: Option<String>,
) -> Result<Option<BlindRequest>, ConfigError> {
    match (room, level) {
        (None, None) => Ok(None),
        (Some(room), Some(level)) => {
            let level = level.trim().parse().map_err(|_| {
                ConfigError::Validation(format!(
                    "IOLITE_BLIND_LEVEL must be an integer, got {level:?}"
                ))
            })?;
            Ok(Some(BlindRequest { room, level }))
        }
        (Some(_), None) => Err(ConfigError::Validation(
            "IOLITE_BLIND_ROOM is set but IOLITE_BLIND_LEVEL is missing".to_string(),
        )),
        (None, Some(_)) => Err(ConfigError::Validation(
            "IOLITE_BLIND_LEVEL is set but IOLITE_BLIND_ROOM is missing".to_string(),
        )),
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "iolited=info,iolite_app=info,iolite_adapter_snapshot=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(
            config.hub.snapshot_path,
            PathBuf::from("iolite-snapshot.json")
        );
        assert!(config.logging.filter.contains("iolited=info"));
        assert!(config.blinds.fallback.is_empty());
        assert!(config.blinds.request.is_none());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.blinds.request.is_none());
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [hub]
            snapshot_path = '/srv/iolite/discovery.json'

            [logging]
            filter = 'debug'

            [blinds.fallback]
            WoKo = ['Blind_22', 'Blind_21']
            Bad = []

            [blinds.request]
            room = 'WoKo'
            level = 50
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.hub.snapshot_path,
            PathBuf::from("/srv/iolite/discovery.json")
        );
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(
            config.blinds.fallback.get("WoKo").unwrap(),
            &vec!["Blind_22".to_string(), "Blind_21".to_string()]
        );
        assert!(config.blinds.fallback.get("Bad").unwrap().is_empty());
        assert_eq!(
            config.blinds.request,
            Some(BlindRequest {
                room: "WoKo".to_string(),
                level: 50,
            })
        );
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert!(config.blinds.request.is_none());
    }

    #[test]
    fn should_reject_empty_snapshot_path() {
        let mut config = Config::default();
        config.hub.snapshot_path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_blind_request_without_room() {
        let mut config = Config::default();
        config.blinds.request = Some(BlindRequest {
            room: String::new(),
            level: 10,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_default_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn should_recognise_all_rooms_request() {
        let request = BlindRequest {
            room: "*".to_string(),
            level: 0,
        };
        assert!(request.targets_all_rooms());
    }

    #[test]
    fn should_build_blind_request_from_env_values() {
        let request =
            blind_request_from_env(Some("WoKo".to_string()), Some(" 40 ".to_string())).unwrap();
        assert_eq!(
            request,
            Some(BlindRequest {
                room: "WoKo".to_string(),
                level: 40,
            })
        );
    }

    #[test]
    fn should_skip_blind_request_when_env_unset() {
        assert_eq!(blind_request_from_env(None, None).unwrap(), None);
    }

    #[test]
    fn should_reject_unparseable_blind_level() {
        let result = blind_request_from_env(Some("WoKo".to_string()), Some("half".to_string()));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_blind_room_without_level() {
        let result = blind_request_from_env(Some("*".to_string()), None);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_blind_level_without_room() {
        let result = blind_request_from_env(None, Some("10".to_string()));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
