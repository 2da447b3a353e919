//! Maker API adapter error types.

use hubbridge_domain::error::HubBridgeError;

/// Errors specific to the Maker API adapter.
#[derive(Debug, thiserror::Error)]
pub enum MakerApiError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The hub could not be reached, or did not answer in time.
    #[error("request to hub failed")]
    Transport(#[source] reqwest::Error),

    /// The hub answered with a non-success status.
    #[error("hub answered {path} with HTTP {status}")]
    Status {
        /// Request path, without the access token.
        path: String,
        /// HTTP status code.
        status: u16,
    },

    /// The hub's response body is not the expected JSON.
    #[error("failed to decode hub response")]
    Decode(#[source] serde_json::Error),

    /// The configured hub address is not a valid URL.
    #[error("invalid hub address")]
    InvalidAddress(#[source] url::ParseError),

    /// The configured hub address cannot carry a path.
    #[error("hub address `{0}` cannot be used as a base URL")]
    UnsupportedAddress(String),
}

impl MakerApiError {
    /// Convert into the domain error the hub port reports.
    ///
    /// Transport failures become [`HubBridgeError::ServiceUnavailable`];
    /// everything else is a [`HubBridgeError::ServerError`].
    #[must_use]
    pub fn into_domain(self) -> HubBridgeError {
        match self {
            Self::Transport(_) => HubBridgeError::ServiceUnavailable(Box::new(self)),
            other => HubBridgeError::ServerError(Box::new(other)),
        }
    }
}

impl From<MakerApiError> for HubBridgeError {
    fn from(err: MakerApiError) -> Self {
        err.into_domain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_status_error() {
        let err = MakerApiError::Status {
            path: "/apps/api/1/devices".to_string(),
            status: 401,
        };
        assert_eq!(err.to_string(), "hub answered /apps/api/1/devices with HTTP 401");
    }

    #[test]
    fn should_convert_status_to_server_error() {
        let err: HubBridgeError = MakerApiError::Status {
            path: "/".to_string(),
            status: 500,
        }
        .into();
        assert!(matches!(err, HubBridgeError::ServerError(_)));
    }

    #[test]
    fn should_convert_decode_error_to_server_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{{bad").unwrap_err();
        let err: HubBridgeError = MakerApiError::Decode(json_err).into();
        assert!(matches!(err, HubBridgeError::ServerError(_)));
    }

    #[test]
    fn should_display_unsupported_address() {
        let err = MakerApiError::UnsupportedAddress("mailto:hub".to_string());
        assert_eq!(
            err.to_string(),
            "hub address `mailto:hub` cannot be used as a base URL"
        );
    }
}
