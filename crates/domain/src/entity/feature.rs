//! Feature — a controllable dimension of an entity.

use serde::{Deserialize, Serialize};

/// Controllable dimension of an entity.
///
/// The declaration order is the order features are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    OnOff,
    Dim,
    Color,
    ColorTemperature,
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::OnOff => "on_off",
            Self::Dim => "dim",
            Self::Color => "color",
            Self::ColorTemperature => "color_temperature",
        })
    }
}
