//! # iolite-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** adapters must implement:
//!   - `HubClient` — fetch discovery payloads, send blind commands
//! - Provide the **use-cases** behind the voice intents:
//!   - `DiscoveryService` — classify hub payloads into a room registry, skipping bad ones
//!   - `BlindService` — set blind levels per room or for the whole home
//!   - `ClimateService` — report a room's heating summary
//!
//! ## Dependency rule
//! Depends on `iolite-domain` only (plus `tokio::sync` for the discovery cache).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
