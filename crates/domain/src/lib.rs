//! # hubbridge-domain
//!
//! Pure domain model for the hubbridge integration, which exposes the devices
//! of a Hubitat hub as remote-control entities.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Devices** (hub snapshots: capabilities + raw attributes)
//! - Define **Entities** (the remote-facing light/switch with a fixed feature set)
//! - Define **Commands** (generic `on` / `off` / `toggle` + parameters) and
//!   **Hub calls** (the hub-specific command invocations)
//! - Contain the mapping rules: capability detection, entity construction,
//!   command translation and optimistic state projection
//!
//! ## Dependency rule
//! This crate has **no internal dependencies** and performs no IO.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod capability;
pub mod command;
pub mod detect;
pub mod device;
pub mod entity;
pub mod event;
pub mod factory;
pub mod hub_call;
pub mod projection;
pub mod translate;
