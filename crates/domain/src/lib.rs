//! # iolite-domain
//!
//! Pure domain model for the IOLITE voice bridge.
//!
//! ## Responsibilities
//! - Model **raw hub payloads** and their ordered `{name, value}` property lists
//! - Define the typed **entities**: rooms, the closed device family, heating summaries
//! - **Classify** raw payloads into those entities (see [`classify`])
//! - Hold the **discovery registry** that groups devices and heating by room
//! - Error conventions shared by every layer
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod payload;
pub mod property;

pub mod classify;
pub mod device;
pub mod discovery;
pub mod entity;
pub mod heating;
pub mod room;
