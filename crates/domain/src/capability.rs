//! Capability — a named feature tag a hub device declares.
//!
//! The hub's capability vocabulary is open-ended. The tags the bridge reasons
//! about get their own variant; everything else is kept verbatim in
//! [`Capability::Other`] so snapshots round-trip without loss.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single capability tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Capability {
    Switch,
    SwitchLevel,
    ColorControl,
    ColorTemperature,
    Light,
    Lock,
    Thermostat,
    TemperatureMeasurement,
    ContactSensor,
    MotionSensor,
    RelativeHumidityMeasurement,
    Other(String),
}

impl Capability {
    /// The hub's name for this capability.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Switch => "Switch",
            Self::SwitchLevel => "SwitchLevel",
            Self::ColorControl => "ColorControl",
            Self::ColorTemperature => "ColorTemperature",
            Self::Light => "Light",
            Self::Lock => "Lock",
            Self::Thermostat => "Thermostat",
            Self::TemperatureMeasurement => "TemperatureMeasurement",
            Self::ContactSensor => "ContactSensor",
            Self::MotionSensor => "MotionSensor",
            Self::RelativeHumidityMeasurement => "RelativeHumidityMeasurement",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for Capability {
    fn from(name: &str) -> Self {
        match name {
            "Switch" => Self::Switch,
            "SwitchLevel" => Self::SwitchLevel,
            "ColorControl" => Self::ColorControl,
            "ColorTemperature" => Self::ColorTemperature,
            "Light" => Self::Light,
            "Lock" => Self::Lock,
            "Thermostat" => Self::Thermostat,
            "TemperatureMeasurement" => Self::TemperatureMeasurement,
            "ContactSensor" => Self::ContactSensor,
            "MotionSensor" => Self::MotionSensor,
            "RelativeHumidityMeasurement" => Self::RelativeHumidityMeasurement,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Capability {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<Capability> for String {
    fn from(capability: Capability) -> Self {
        match capability {
            Capability::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unordered set of capabilities a device declares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `capability` is declared.
    #[must_use]
    pub fn contains(&self, capability: &Capability) -> bool {
        self.0.contains(capability)
    }

    /// Add a capability; duplicates collapse.
    pub fn insert(&mut self, capability: Capability) {
        self.0.insert(capability);
    }

    /// Iterate in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Capability> for CapabilitySet {
    fn extend<I: IntoIterator<Item = Capability>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<'a> IntoIterator for &'a CapabilitySet {
    type Item = &'a Capability;
    type IntoIter = std::collections::btree_set::Iter<'a, Capability>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<const N: usize> From<[Capability; N]> for CapabilitySet {
    fn from(capabilities: [Capability; N]) -> Self {
        capabilities.into_iter().collect()
    }
}
