//! # hubbridge-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `HubClient` — device snapshots and command dispatch on the hub
//!   - `EventPublisher` — notify subscribers of entity changes
//! - Define **driving/inbound** use-cases:
//!   - `DiscoveryService` — device snapshots to registered entities
//!   - `CommandService` — remote commands to hub calls and projected state
//! - Provide **in-process infrastructure** that doesn't need IO (event bus,
//!   entity registry)
//!
//! ## Dependency rule
//! Depends on `hubbridge-domain` only (plus `tokio::sync` for channels and locks).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod event_bus;
pub mod ports;
pub mod registry;
pub mod services;
