//! Capability detection — which entity type a device is exposed as.
//!
//! Detection walks an ordered table of `(predicate, type)` rows and stops at
//! the first match. New entity types are added by inserting a row at the right
//! priority.

use crate::capability::{Capability, CapabilitySet};
use crate::entity::EntityType;

type Predicate = fn(&CapabilitySet) -> bool;

const DETECTION_TABLE: &[(Predicate, EntityType)] = &[
    (is_light, EntityType::Light),
    (is_switch, EntityType::Switch),
];

/// Derive the entity type for a capability set.
///
/// Returns `None` when no row matches; the device is then not exposed.
#[must_use]
pub fn detect(capabilities: &CapabilitySet) -> Option<EntityType> {
    DETECTION_TABLE
        .iter()
        .find(|(predicate, _)| predicate(capabilities))
        .map(|(_, entity_type)| *entity_type)
}

fn is_light(capabilities: &CapabilitySet) -> bool {
    capabilities.contains(&Capability::ColorControl)
        || capabilities.contains(&Capability::ColorTemperature)
        || (capabilities.contains(&Capability::Switch)
            && capabilities.contains(&Capability::SwitchLevel))
}

fn is_switch(capabilities: &CapabilitySet) -> bool {
    capabilities.contains(&Capability::Switch)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RELEVANT: [Capability; 4] = [
        Capability::Switch,
        Capability::SwitchLevel,
        Capability::ColorControl,
        Capability::ColorTemperature,
    ];

    fn subset(mask: u8) -> CapabilitySet {
        RELEVANT
            .iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, capability)| capability.clone())
            .collect()
    }

    #[test]
    fn should_detect_light_when_switch_and_level() {
        let caps: CapabilitySet = [Capability::Switch, Capability::SwitchLevel].into();
        assert_eq!(detect(&caps), Some(EntityType::Light));

        let caps: CapabilitySet = [
            Capability::Switch,
            Capability::SwitchLevel,
            Capability::ColorControl,
        ]
        .into();
        assert_eq!(detect(&caps), Some(EntityType::Light));
    }

    #[test]
    fn should_detect_switch_when_only_switch() {
        let caps: CapabilitySet = [Capability::Switch].into();
        assert_eq!(detect(&caps), Some(EntityType::Switch));
    }

    #[test]
    fn should_detect_nothing_when_no_relevant_capability() {
        let caps: CapabilitySet = [
            Capability::TemperatureMeasurement,
            Capability::Other("Battery".to_string()),
        ]
        .into();
        assert_eq!(detect(&caps), None);
        assert_eq!(detect(&CapabilitySet::new()), None);
    }

    #[test]
    fn should_not_expose_climate_or_lock_devices() {
        assert_eq!(detect(&[Capability::Thermostat].into()), None);
        assert_eq!(detect(&[Capability::Lock].into()), None);
    }

    #[test]
    fn should_detect_light_when_color_without_switch() {
        assert_eq!(
            detect(&[Capability::ColorTemperature].into()),
            Some(EntityType::Light)
        );
    }

    #[test]
    fn should_classify_every_combination_of_relevant_capabilities() {
        for mask in 0..16_u8 {
            let caps = subset(mask);
            let switch = caps.contains(&Capability::Switch);
            let level = caps.contains(&Capability::SwitchLevel);
            let color = caps.contains(&Capability::ColorControl);
            let ct = caps.contains(&Capability::ColorTemperature);

            let expected = if color || ct || (switch && level) {
                Some(EntityType::Light)
            } else if switch {
                Some(EntityType::Switch)
            } else {
                None
            };
            assert_eq!(detect(&caps), expected, "mask {mask:04b}");
            assert_eq!(detect(&caps), detect(&caps.clone()));
        }
    }

    #[test]
    fn should_ignore_unrelated_capabilities() {
        let mut caps: CapabilitySet = [Capability::Switch].into();
        caps.insert(Capability::MotionSensor);
        caps.insert(Capability::Other("Refresh".to_string()));
        assert_eq!(detect(&caps), Some(EntityType::Switch));
    }
}
