//! # hubbridge-adapter-maker-api
//!
//! Hubitat Maker API adapter — implements the `HubClient` port over HTTP.
//!
//! ## Responsibilities
//! - Build the Maker API URLs (`/apps/api/{app_id}/devices/...?access_token=...`)
//! - Normalize the hub's device JSON into domain [`Device`](hubbridge_domain::device::Device)
//!   snapshots
//! - Issue hub calls, one GET per call
//! - Map transport failures to `ServiceUnavailable` and hub failures to
//!   `ServerError`
//!
//! ## Dependency rule
//! Same as other adapters: depends on `hubbridge-app` and `hubbridge-domain`.

pub mod client;
pub mod config;
mod dto;
pub mod error;

pub use client::MakerApiClient;
pub use config::MakerApiConfig;
pub use error::MakerApiError;
