//! Entity state — the cached on/off state of an entity.

use serde::{Deserialize, Serialize};

use super::AttributeValue;

/// On/off state of an entity, as last assumed by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityState {
    On,
    #[default]
    Off,
}

impl EntityState {
    /// Derive the state from the hub's `switch` attribute.
    ///
    /// Anything other than `"on"` (including a missing attribute) reads as off.
    #[must_use]
    pub fn from_switch(value: Option<&AttributeValue>) -> Self {
        match value.and_then(AttributeValue::as_str) {
            Some(text) if text.eq_ignore_ascii_case("on") => Self::On,
            _ => Self::Off,
        }
    }

    #[must_use]
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl std::fmt::Display for EntityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
        }
    }
}
