//! Maker API client — the [`HubClient`] port over HTTP.
//!
//! Every endpoint is a GET below `/apps/api/{app_id}` with the access token as
//! the only query parameter:
//!
//! ```text
//! /apps/api/{app_id}/devices
//! /apps/api/{app_id}/devices/{device_id}
//! /apps/api/{app_id}/devices/{device_id}/{command}[/{argument}...]
//! ```

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use hubbridge_app::ports::HubClient;
use hubbridge_domain::device::Device;
use hubbridge_domain::error::HubBridgeError;
use hubbridge_domain::hub_call::HubCall;
use hubbridge_domain::id::DeviceId;

use crate::config::MakerApiConfig;
use crate::dto::RawDevice;
use crate::error::MakerApiError;

/// HTTP client for one Maker API instance.
#[derive(Debug, Clone)]
pub struct MakerApiClient {
    http: reqwest::Client,
    base: Url,
    app_id: String,
    access_token: String,
}

impl MakerApiClient {
    /// Build a client from its configuration.
    ///
    /// A bare `host[:port]` address is reached over plain `http`.
    ///
    /// # Errors
    ///
    /// Returns [`MakerApiError::InvalidAddress`] or
    /// [`MakerApiError::UnsupportedAddress`] for an unusable address, and
    /// [`MakerApiError::Client`] when the HTTP client cannot be built.
    pub fn new(config: &MakerApiConfig) -> Result<Self, MakerApiError> {
        let address = config.address.trim();
        let base = if address.contains("://") {
            Url::parse(address)
        } else {
            Url::parse(&format!("http://{address}"))
        }
        .map_err(MakerApiError::InvalidAddress)?;
        if base.cannot_be_a_base() {
            return Err(MakerApiError::UnsupportedAddress(address.to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(MakerApiError::Client)?;

        Ok(Self {
            http,
            base,
            app_id: config.app_id.clone(),
            access_token: config.access_token.clone(),
        })
    }

    /// Full URL of an endpoint below `/apps/api/{app_id}`.
    ///
    /// Segments are percent-encoded individually, so a JSON argument such as
    /// `{"hue":10,"saturation":20}` stays one path segment.
    fn endpoint<I>(&self, segments: I) -> Result<Url, MakerApiError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| MakerApiError::UnsupportedAddress(self.base.to_string()))?
            .pop_if_empty()
            .extend(["apps", "api", self.app_id.as_str()])
            .extend(segments);
        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token);
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<Vec<u8>, MakerApiError> {
        let path = url.path().to_string();
        tracing::trace!(%path, "GET");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(MakerApiError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(MakerApiError::Status {
                path,
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await.map_err(MakerApiError::Transport)?;
        Ok(body.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, MakerApiError> {
        let body = self.get(url).await?;
        serde_json::from_slice(&body).map_err(MakerApiError::Decode)
    }

    async fn fetch_device_list(&self) -> Result<Vec<RawDevice>, MakerApiError> {
        self.get_json(self.endpoint(["devices"])?).await
    }

    async fn fetch_device(&self, id: &str) -> Result<RawDevice, MakerApiError> {
        self.get_json(self.endpoint(["devices", id])?).await
    }
}

impl HubClient for MakerApiClient {
    /// Fetch the device list, then each device's details.
    ///
    /// A device whose details cannot be fetched is kept with its basic list
    /// entry and flagged [`Device::partial`].
    #[tracing::instrument(skip(self))]
    async fn list_devices(&self) -> Result<Vec<Device>, HubBridgeError> {
        let basic = self.fetch_device_list().await?;
        tracing::debug!(count = basic.len(), "device list fetched");

        let mut devices = Vec::with_capacity(basic.len());
        for entry in basic {
            let id = entry.id.to_string();
            let (raw, partial) = match self.fetch_device(&id).await {
                Ok(detailed) => (detailed, false),
                Err(err) => {
                    tracing::warn!(device_id = %id, error = %err, "device details unavailable, using list entry");
                    (entry, true)
                }
            };
            match raw.into_device() {
                Ok(mut device) => {
                    device.partial = partial;
                    devices.push(device);
                }
                Err(err) => tracing::warn!(device_id = %id, error = %err, "skipping malformed device"),
            }
        }

        tracing::info!(count = devices.len(), "devices fetched from hub");
        Ok(devices)
    }

    #[tracing::instrument(skip(self))]
    async fn get_device(&self, id: &DeviceId) -> Result<Device, HubBridgeError> {
        self.fetch_device(id.as_str()).await?.into_device()
    }

    #[tracing::instrument(skip(self, call), fields(call = %call))]
    async fn send_command(&self, call: &HubCall) -> Result<(), HubBridgeError> {
        let segments = [
            "devices".to_string(),
            call.device_id.to_string(),
            call.command.name().to_string(),
        ]
        .into_iter()
        .chain(call.command.arguments());
        self.get(self.endpoint(segments)?).await?;
        tracing::debug!("hub call accepted");
        Ok(())
    }

    async fn test_connection(&self) -> Result<(), HubBridgeError> {
        let devices = self.fetch_device_list().await?;
        tracing::info!(devices = devices.len(), "connected to hub");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubbridge_domain::hub_call::HubCommand;

    fn client(address: &str) -> MakerApiClient {
        MakerApiClient::new(&MakerApiConfig {
            address: address.to_string(),
            app_id: "42".to_string(),
            access_token: "token".to_string(),
            ..MakerApiConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn should_build_device_list_url() {
        let url = client("192.168.1.20").endpoint(["devices"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://192.168.1.20/apps/api/42/devices?access_token=token"
        );
    }

    #[test]
    fn should_keep_explicit_scheme_and_port() {
        let url = client("https://hub.local:8443/")
            .endpoint(["devices", "7"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://hub.local:8443/apps/api/42/devices/7?access_token=token"
        );
    }

    #[test]
    fn should_percent_encode_set_color_argument_as_one_segment() {
        let command = HubCommand::SetColor {
            hue: 10,
            saturation: 20,
        };
        let segments = ["devices".to_string(), "12".to_string(), command.name().to_string()]
            .into_iter()
            .chain(command.arguments());

        let url = client("hub.local").endpoint(segments).unwrap();

        assert_eq!(
            url.as_str(),
            "http://hub.local/apps/api/42/devices/12/setColor/%7B%22hue%22:10,%22saturation%22:20%7D?access_token=token"
        );
    }

    #[test]
    fn should_reject_unparsable_address() {
        let result = MakerApiClient::new(&MakerApiConfig {
            address: "hub local".to_string(),
            ..MakerApiConfig::default()
        });
        assert!(matches!(result, Err(MakerApiError::InvalidAddress(_))));
    }
}
