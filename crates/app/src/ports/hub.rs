//! Hub port — the home-automation hub as seen by the bridge.
//!
//! Implementations map their failures onto [`HubBridgeError::ServiceUnavailable`]
//! (hub unreachable, timeout) and [`HubBridgeError::ServerError`] (the hub
//! answered with a failure or an unreadable body).

use std::future::Future;

use hubbridge_domain::device::Device;
use hubbridge_domain::error::HubBridgeError;
use hubbridge_domain::hub_call::HubCall;
use hubbridge_domain::id::DeviceId;

/// Client for the hub's device API.
pub trait HubClient {
    /// Snapshot every device the hub exposes to the bridge.
    fn list_devices(&self) -> impl Future<Output = Result<Vec<Device>, HubBridgeError>> + Send;

    /// Snapshot a single device.
    fn get_device(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Device, HubBridgeError>> + Send;

    /// Issue one command on a device.
    fn send_command(
        &self,
        call: &HubCall,
    ) -> impl Future<Output = Result<(), HubBridgeError>> + Send;

    /// Check that the hub is reachable and the credentials are accepted.
    fn test_connection(&self) -> impl Future<Output = Result<(), HubBridgeError>> + Send;
}

impl<T: HubClient + Send + Sync> HubClient for std::sync::Arc<T> {
    fn list_devices(&self) -> impl Future<Output = Result<Vec<Device>, HubBridgeError>> + Send {
        (**self).list_devices()
    }

    fn get_device(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Device, HubBridgeError>> + Send {
        (**self).get_device(id)
    }

    fn send_command(
        &self,
        call: &HubCall,
    ) -> impl Future<Output = Result<(), HubBridgeError>> + Send {
        (**self).send_command(call)
    }

    fn test_connection(&self) -> impl Future<Output = Result<(), HubBridgeError>> + Send {
        (**self).test_connection()
    }
}
