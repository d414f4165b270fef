//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod blind_service;
pub mod climate_service;
pub mod discovery_service;

#[cfg(test)]
mod fake_hub;
