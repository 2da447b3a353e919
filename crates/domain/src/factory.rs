//! Entity factory — builds the remote-facing entity for a device snapshot.

use std::collections::{BTreeMap, BTreeSet};

use crate::capability::Capability;
use crate::device::{Device, hub_attribute};
use crate::entity::{AttributeValue, Entity, EntityState, EntityType, Feature, attribute};
use crate::error::HubBridgeError;
use crate::id::EntityId;
use crate::time::Timestamp;

/// Colour temperature assumed when the hub reports none, in Kelvin.
pub const DEFAULT_COLOR_TEMPERATURE: u32 = 2700;

/// Builds entities from device snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityFactory {
    default_color_temperature: u32,
}

impl Default for EntityFactory {
    fn default() -> Self {
        Self::new(DEFAULT_COLOR_TEMPERATURE)
    }
}

impl EntityFactory {
    #[must_use]
    pub fn new(default_color_temperature: u32) -> Self {
        Self {
            default_color_temperature,
        }
    }

    /// Build the entity for `device` as `entity_type`.
    ///
    /// Features follow the device's capabilities. Cached attributes are seeded
    /// from the hub's current values for the present features only; missing or
    /// unusable values fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`HubBridgeError::UnsupportedCapability`] when `entity_type` is
    /// `None`.
    pub fn build(
        &self,
        device: &Device,
        entity_type: Option<EntityType>,
        at: Timestamp,
    ) -> Result<Entity, HubBridgeError> {
        let Some(entity_type) = entity_type else {
            return Err(HubBridgeError::UnsupportedCapability {
                device_id: device.id.clone(),
            });
        };

        let features = features_for(device, entity_type);
        let mut attributes = BTreeMap::new();

        if features.contains(&Feature::Dim) {
            let level = percent_attribute(device, hub_attribute::LEVEL);
            attributes.insert(attribute::BRIGHTNESS.to_string(), AttributeValue::Int(level));
        }
        if features.contains(&Feature::Color) {
            let hue = percent_attribute(device, hub_attribute::HUE);
            let saturation = percent_attribute(device, hub_attribute::SATURATION);
            attributes.insert(attribute::HUE.to_string(), AttributeValue::Int(hue));
            attributes.insert(
                attribute::SATURATION.to_string(),
                AttributeValue::Int(saturation),
            );
        }
        if features.contains(&Feature::ColorTemperature) {
            let kelvin = device
                .attribute(hub_attribute::COLOR_TEMPERATURE)
                .and_then(AttributeValue::as_int)
                .filter(|k| *k > 0)
                .unwrap_or_else(|| i64::from(self.default_color_temperature));
            attributes.insert(
                attribute::COLOR_TEMPERATURE.to_string(),
                AttributeValue::Int(kelvin),
            );
        }

        Ok(Entity {
            id: EntityId::from(&device.id),
            name: device.name.clone(),
            entity_type,
            features,
            state: EntityState::from_switch(device.attribute(hub_attribute::SWITCH)),
            attributes,
            last_updated: at,
        })
    }
}

/// The features an entity of `entity_type` gets for `device`.
#[must_use]
pub fn features_for(device: &Device, entity_type: EntityType) -> BTreeSet<Feature> {
    entity_type
        .supported_features()
        .iter()
        .copied()
        .filter(|feature| match feature {
            Feature::OnOff => true,
            Feature::Dim => device.has_capability(&Capability::SwitchLevel),
            Feature::Color => device.has_capability(&Capability::ColorControl),
            Feature::ColorTemperature => device.has_capability(&Capability::ColorTemperature),
        })
        .collect()
}

fn percent_attribute(device: &Device, name: &str) -> i64 {
    device
        .attribute(name)
        .and_then(AttributeValue::as_int)
        .filter(|value| (0..=100).contains(value))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::detect;
    use crate::time::now;

    fn build(device: &Device) -> Entity {
        EntityFactory::default()
            .build(device, detect(&device.capabilities), now())
            .unwrap()
    }

    #[test]
    fn should_build_dimmable_light_with_seeded_brightness() {
        let device = Device::builder()
            .id("12")
            .name("Kitchen")
            .capabilities(["Switch", "SwitchLevel"])
            .attribute(hub_attribute::SWITCH, "on")
            .attribute(hub_attribute::LEVEL, "75")
            .build()
            .unwrap();

        let entity = build(&device);

        assert_eq!(entity.id.as_str(), "12");
        assert_eq!(entity.entity_type, EntityType::Light);
        assert_eq!(entity.features, BTreeSet::from([Feature::OnOff, Feature::Dim]));
        assert_eq!(entity.state, EntityState::On);
        assert_eq!(entity.int_attribute(attribute::BRIGHTNESS), Some(75));
        assert_eq!(entity.get_attribute(attribute::HUE), None);
    }

    #[test]
    fn should_build_color_light_with_defaults_when_attributes_missing() {
        let device = Device::builder()
            .id("3")
            .capabilities(["Switch", "SwitchLevel", "ColorControl", "ColorTemperature"])
            .build()
            .unwrap();

        let entity = build(&device);

        assert_eq!(entity.name, "Device 3");
        assert_eq!(entity.features.len(), 4);
        assert_eq!(entity.state, EntityState::Off);
        assert_eq!(entity.int_attribute(attribute::BRIGHTNESS), Some(0));
        assert_eq!(entity.int_attribute(attribute::HUE), Some(0));
        assert_eq!(entity.int_attribute(attribute::SATURATION), Some(0));
        assert_eq!(
            entity.int_attribute(attribute::COLOR_TEMPERATURE),
            Some(i64::from(DEFAULT_COLOR_TEMPERATURE))
        );
    }

    #[test]
    fn should_use_configured_default_color_temperature() {
        let device = Device::builder()
            .id("3")
            .capabilities(["ColorTemperature"])
            .attribute(hub_attribute::COLOR_TEMPERATURE, "warm")
            .build()
            .unwrap();

        let entity = EntityFactory::new(3000)
            .build(&device, Some(EntityType::Light), now())
            .unwrap();

        assert_eq!(entity.int_attribute(attribute::COLOR_TEMPERATURE), Some(3000));
        assert_eq!(entity.features, BTreeSet::from([Feature::OnOff, Feature::ColorTemperature]));
    }

    #[test]
    fn should_build_switch_without_light_attributes() {
        let device = Device::builder()
            .id("8")
            .name("Fan")
            .capabilities(["Switch"])
            .attribute(hub_attribute::SWITCH, "off")
            .attribute(hub_attribute::LEVEL, 30_i64)
            .build()
            .unwrap();

        let entity = build(&device);

        assert_eq!(entity.entity_type, EntityType::Switch);
        assert_eq!(entity.features, BTreeSet::from([Feature::OnOff]));
        assert!(entity.attributes.is_empty());
    }

    #[test]
    fn should_fail_when_no_entity_type() {
        let device = Device::builder()
            .id("9")
            .capabilities(["MotionSensor"])
            .build()
            .unwrap();

        let result = EntityFactory::default().build(&device, None, now());

        assert!(matches!(
            result,
            Err(HubBridgeError::UnsupportedCapability { ref device_id }) if device_id.as_str() == "9"
        ));
    }

    #[test]
    fn should_default_out_of_range_seed_values() {
        let device = Device::builder()
            .id("4")
            .capabilities(["Switch", "SwitchLevel"])
            .attribute(hub_attribute::LEVEL, 250_i64)
            .build()
            .unwrap();

        assert_eq!(build(&device).int_attribute(attribute::BRIGHTNESS), Some(0));
    }
}
