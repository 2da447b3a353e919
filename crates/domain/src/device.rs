//! Device — an immutable snapshot of a hub device.
//!
//! A snapshot is taken at discovery and superseded by the next one; the bridge
//! never mutates it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::capability::{Capability, CapabilitySet};
use crate::entity::AttributeValue;
use crate::error::{HubBridgeError, ValidationError};
use crate::id::DeviceId;

/// Names of the hub attributes the bridge reads.
pub mod hub_attribute {
    pub const SWITCH: &str = "switch";
    pub const LEVEL: &str = "level";
    pub const HUE: &str = "hue";
    pub const SATURATION: &str = "saturation";
    pub const COLOR_TEMPERATURE: &str = "colorTemperature";
}

/// A device as reported by the hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub capabilities: CapabilitySet,
    pub attributes: BTreeMap<String, AttributeValue>,
    /// Only the hub's device-list entry is known; capabilities and attributes
    /// may be missing.
    #[serde(default)]
    pub partial: bool,
}

impl Device {
    /// Start building a device snapshot.
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Whether the device declares `capability`.
    #[must_use]
    pub fn has_capability(&self, capability: &Capability) -> bool {
        self.capabilities.contains(capability)
    }

    /// Look up a raw hub attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Check snapshot invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyDeviceId`] when the id is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::EmptyDeviceId);
        }
        Ok(())
    }
}

/// Builder for [`Device`].
///
/// The name falls back to `Device {id}` when none (or an empty one) is given.
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    capabilities: CapabilitySet,
    attributes: BTreeMap<String, AttributeValue>,
    partial: bool,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<DeviceId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn capability(mut self, capability: impl Into<Capability>) -> Self {
        self.capabilities.insert(capability.into());
        self
    }

    #[must_use]
    pub fn capabilities<I, C>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Capability>,
    {
        self.capabilities
            .extend(capabilities.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }

    /// Finish the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`HubBridgeError::Validation`] when the id is missing or empty.
    pub fn build(self) -> Result<Device, HubBridgeError> {
        let id = self.id.unwrap_or_else(|| DeviceId::new(""));
        let name = self
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| format!("Device {id}"));
        let device = Device {
            id,
            name,
            capabilities: self.capabilities,
            attributes: self.attributes,
            partial: self.partial,
        };
        device.validate()?;
        Ok(device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_device_with_capabilities_and_attributes() {
        let device = Device::builder()
            .id("12")
            .name("Kitchen Bulb")
            .capabilities(["Switch", "SwitchLevel"])
            .attribute(hub_attribute::LEVEL, 40_i64)
            .build()
            .unwrap();

        assert_eq!(device.id.as_str(), "12");
        assert!(device.has_capability(&Capability::SwitchLevel));
        assert_eq!(
            device.attribute(hub_attribute::LEVEL),
            Some(&AttributeValue::Int(40))
        );
    }

    #[test]
    fn should_fall_back_to_generated_name_when_missing() {
        let device = Device::builder().id("7").build().unwrap();
        assert_eq!(device.name, "Device 7");
        assert!(!device.partial);
    }

    #[test]
    fn should_fall_back_to_generated_name_when_blank() {
        let device = Device::builder().id("7").name("  ").build().unwrap();
        assert_eq!(device.name, "Device 7");
    }

    #[test]
    fn should_reject_device_without_id() {
        let result = Device::builder().name("Orphan").build();
        assert!(matches!(
            result,
            Err(HubBridgeError::Validation(ValidationError::EmptyDeviceId))
        ));
    }
}
