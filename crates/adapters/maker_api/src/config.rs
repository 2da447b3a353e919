//! Maker API connection configuration.

use std::fmt;

use serde::Deserialize;

/// Configuration for the Maker API client.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct MakerApiConfig {
    /// Hub address, `host[:port]` or a full `http://` base URL.
    pub address: String,
    /// Maker API application id.
    pub app_id: String,
    /// Maker API access token.
    pub access_token: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for MakerApiConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            app_id: String::new(),
            access_token: String::new(),
            request_timeout_secs: 10,
        }
    }
}

impl fmt::Debug for MakerApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MakerApiConfig")
            .field("address", &self.address)
            .field("app_id", &self.app_id)
            .field("access_token", &"<redacted>")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
