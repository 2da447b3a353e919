//! Typed identifier newtypes backed by hub-assigned strings.
//!
//! The hub names its devices with short opaque ids (`"42"`). An entity reuses
//! the id of the device it was built from, so the two convert freely.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a hub-assigned identifier.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the raw identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the identifier is the empty string.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of a [`Device`](crate::device::Device) on the hub.
    DeviceId
);

define_id!(
    /// Identifier of an [`Entity`](crate::entity::Entity); equal to its device id.
    EntityId
);

impl From<&DeviceId> for EntityId {
    fn from(id: &DeviceId) -> Self {
        Self(id.0.clone())
    }
}

impl From<&EntityId> for DeviceId {
    fn from(id: &EntityId) -> Self {
        Self(id.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_share_value_between_device_and_entity_ids() {
        let device = DeviceId::new("42");
        let entity = EntityId::from(&device);
        assert_eq!(entity.as_str(), "42");
        assert_eq!(DeviceId::from(&entity), device);
    }

    #[test]
    fn should_display_raw_value() {
        assert_eq!(EntityId::new("light-7").to_string(), "light-7");
    }

    #[test]
    fn should_serialize_as_plain_string() {
        let json = serde_json::to_string(&DeviceId::new("12")).unwrap();
        assert_eq!(json, "\"12\"");
        let parsed: DeviceId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, DeviceId::new("12"));
    }

    #[test]
    fn should_report_empty_id() {
        assert!(DeviceId::new("").is_empty());
        assert!(!DeviceId::new("1").is_empty());
    }
}
