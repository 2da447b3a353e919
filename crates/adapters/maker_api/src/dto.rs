//! Wire format of the Maker API device endpoints.
//!
//! The hub is loose about shapes: ids come as strings or numbers,
//! capabilities as plain names or objects, and attributes either as a map or
//! as a list of `{name, currentValue}` entries. Everything is normalized into a
//! domain [`Device`].

use serde::Deserialize;
use serde_json::{Map, Value};

use hubbridge_domain::device::Device;
use hubbridge_domain::entity::AttributeValue;
use hubbridge_domain::error::HubBridgeError;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawDevice {
    pub id: RawId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub capabilities: Vec<RawCapability>,
    #[serde(default)]
    pub attributes: RawAttributes,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawId {
    Text(String),
    Number(i64),
}

impl std::fmt::Display for RawId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(id) => f.write_str(id),
            Self::Number(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawCapability {
    Name(String),
    Object {
        #[serde(default)]
        name: Option<String>,
    },
}

impl RawCapability {
    fn into_name(self) -> Option<String> {
        match self {
            Self::Name(name) | Self::Object { name: Some(name) } => Some(name),
            Self::Object { name: None } => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawAttributes {
    Map(Map<String, Value>),
    List(Vec<RawAttribute>),
}

impl Default for RawAttributes {
    fn default() -> Self {
        Self::Map(Map::new())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawAttribute {
    pub name: String,
    #[serde(rename = "currentValue", default)]
    pub current_value: Value,
}

impl RawAttributes {
    fn into_pairs(self) -> Vec<(String, Value)> {
        match self {
            Self::Map(map) => map.into_iter().collect(),
            Self::List(list) => list
                .into_iter()
                .map(|attribute| (attribute.name, attribute.current_value))
                .collect(),
        }
    }
}

impl RawDevice {
    /// Normalize into a domain snapshot.
    ///
    /// The name is the label when set, else the hub name, else `Device {id}`.
    /// Attributes without a current value are dropped.
    pub fn into_device(self) -> Result<Device, HubBridgeError> {
        let mut builder = Device::builder().id(self.id.to_string()).capabilities(
            self.capabilities
                .into_iter()
                .filter_map(RawCapability::into_name),
        );

        let name = self
            .label
            .filter(|label| !label.trim().is_empty())
            .or(self.name);
        if let Some(name) = name {
            builder = builder.name(name);
        }

        for (name, value) in self.attributes.into_pairs() {
            if let Some(value) = attribute_value(value) {
                builder = builder.attribute(name, value);
            }
        }

        builder.build()
    }
}

fn attribute_value(value: Value) -> Option<AttributeValue> {
    match value {
        Value::Null => None,
        Value::Bool(flag) => Some(AttributeValue::Bool(flag)),
        Value::Number(number) => number
            .as_i64()
            .map(AttributeValue::Int)
            .or_else(|| number.as_f64().map(AttributeValue::Float)),
        Value::String(text) => Some(AttributeValue::String(text)),
        other => Some(AttributeValue::Json(other)),
    }
}
