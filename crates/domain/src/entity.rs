//! Entity — the remote-facing representation of a hub device.
//!
//! An entity has a fixed [`EntityType`] and feature set, both decided when it
//! is built from a device snapshot. Its state and attributes are the values the
//! bridge last *assumed* after a successful command; they are never read back
//! from the hub.

mod attribute_value;
mod feature;
mod state;

pub use attribute_value::AttributeValue;
pub use feature::Feature;
pub use state::EntityState;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::id::EntityId;
use crate::time::Timestamp;

/// Names of the attributes cached on an entity.
///
/// The same names are the recognized command parameter keys.
pub mod attribute {
    pub const BRIGHTNESS: &str = "brightness";
    pub const HUE: &str = "hue";
    pub const SATURATION: &str = "saturation";
    pub const COLOR_TEMPERATURE: &str = "color_temperature";
}

/// The kind of entity exposed to the remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Light,
    Switch,
}

impl EntityType {
    /// Every feature an entity of this type may carry.
    #[must_use]
    pub fn supported_features(self) -> &'static [Feature] {
        match self {
            Self::Light => &[
                Feature::OnOff,
                Feature::Dim,
                Feature::Color,
                Feature::ColorTemperature,
            ],
            Self::Switch => &[Feature::OnOff],
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Switch => f.write_str("switch"),
        }
    }
}

/// A light or switch exposed to the remote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub entity_type: EntityType,
    pub features: BTreeSet<Feature>,
    pub state: EntityState,
    pub attributes: BTreeMap<String, AttributeValue>,
    pub last_updated: Timestamp,
}

impl Entity {
    /// Whether the entity carries `feature`.
    #[must_use]
    pub fn supports(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    #[must_use]
    pub fn is_on(&self) -> bool {
        self.state.is_on()
    }

    /// Look up an attribute by name.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Look up an attribute and read it as an integer.
    #[must_use]
    pub fn int_attribute(&self, name: &str) -> Option<i64> {
        self.get_attribute(name).and_then(AttributeValue::as_int)
    }

    /// Insert or overwrite an attribute.
    pub fn set_attribute(&mut self, name: &str, value: AttributeValue) {
        self.attributes.insert(name.to_string(), value);
    }
}
