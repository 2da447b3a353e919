//! Command — the remote's generic command vocabulary.
//!
//! The remote only knows `on`, `off` and `toggle`, optionally with a parameter
//! object. Parameters are kept raw on [`Command`] and validated as a whole by
//! [`LightParams::parse`] so an invalid value aborts the command before any hub
//! call is produced.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entity::attribute;
use crate::error::{HubBridgeError, ParameterError, UnsupportedCommandError};

/// Generic command kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    On,
    Off,
    Toggle,
}

impl FromStr for CommandKind {
    type Err = UnsupportedCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            "toggle" => Ok(Self::Toggle),
            other => Err(UnsupportedCommandError::UnknownCommand(other.to_string())),
        }
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
            Self::Toggle => f.write_str("toggle"),
        }
    }
}

/// A command received from the remote, parameters still unvalidated.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub kind: CommandKind,
    pub params: Map<String, Value>,
}

impl Command {
    /// A command without parameters.
    #[must_use]
    pub fn new(kind: CommandKind) -> Self {
        Self {
            kind,
            params: Map::new(),
        }
    }

    /// Attach a parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Parse the remote's command id and optional parameter object.
    ///
    /// # Errors
    ///
    /// Returns [`HubBridgeError::UnsupportedCommand`] for an unknown command id.
    pub fn parse(cmd_id: &str, params: Option<Map<String, Value>>) -> Result<Self, HubBridgeError> {
        Ok(Self {
            kind: cmd_id.parse()?,
            params: params.unwrap_or_default(),
        })
    }

    #[must_use]
    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }
}

/// Validated parameters of an `on` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LightParams {
    pub brightness: Option<u8>,
    pub hue: Option<u8>,
    pub saturation: Option<u8>,
    pub color_temperature: Option<u32>,
}

impl LightParams {
    /// Validate a raw parameter object.
    ///
    /// Unknown keys are rejected before any value is looked at, so the outcome
    /// does not depend on key order.
    ///
    /// # Errors
    ///
    /// Returns [`HubBridgeError::UnsupportedCommand`] for an unrecognized key and
    /// [`HubBridgeError::InvalidParameter`] for a non-integer or out-of-range
    /// value.
    pub fn parse(params: &Map<String, Value>) -> Result<Self, HubBridgeError> {
        if let Some(unknown) = params.keys().find(|key| !is_known_param(key)) {
            return Err(UnsupportedCommandError::UnknownParameter(unknown.clone()).into());
        }

        Ok(Self {
            brightness: percent(params, attribute::BRIGHTNESS)?,
            hue: percent(params, attribute::HUE)?,
            saturation: percent(params, attribute::SATURATION)?,
            color_temperature: kelvin(params, attribute::COLOR_TEMPERATURE)?,
        })
    }

    #[must_use]
    pub fn has_color(&self) -> bool {
        self.hue.is_some() || self.saturation.is_some()
    }
}

/// A command after `toggle` has been resolved and parameters validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedCommand {
    On(LightParams),
    Off,
}

/// Outcome reported back to the remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandStatus {
    Ok,
    ServiceUnavailable,
    ServerError,
}

impl<T> From<&Result<T, HubBridgeError>> for CommandStatus {
    fn from(result: &Result<T, HubBridgeError>) -> Self {
        match result {
            Ok(_) => Self::Ok,
            Err(err) => err.status(),
        }
    }
}

fn is_known_param(key: &str) -> bool {
    matches!(
        key,
        attribute::BRIGHTNESS
            | attribute::HUE
            | attribute::SATURATION
            | attribute::COLOR_TEMPERATURE
    )
}

fn integer(params: &Map<String, Value>, name: &'static str) -> Result<Option<i64>, ParameterError> {
    let Some(value) = params.get(name) else {
        return Ok(None);
    };
    match (value.as_i64(), value.as_u64()) {
        (Some(number), _) => Ok(Some(number)),
        // Larger than i64 can hold: saturate so the range check rejects it.
        (None, Some(_)) => Ok(Some(i64::MAX)),
        _ => Err(ParameterError::NotAnInteger { name }),
    }
}

fn percent(params: &Map<String, Value>, name: &'static str) -> Result<Option<u8>, ParameterError> {
    integer(params, name)?
        .map(|value| {
            u8::try_from(value)
                .ok()
                .filter(|v| *v <= 100)
                .ok_or(ParameterError::OutOfRange {
                    name,
                    value,
                    min: 0,
                    max: 100,
                })
        })
        .transpose()
}

fn kelvin(params: &Map<String, Value>, name: &'static str) -> Result<Option<u32>, ParameterError> {
    integer(params, name)?
        .map(|value| {
            u32::try_from(value)
                .ok()
                .filter(|v| *v > 0)
                .ok_or(ParameterError::OutOfRange {
                    name,
                    value,
                    min: 1,
                    max: i64::from(u32::MAX),
                })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn should_parse_known_command_ids() {
        assert_eq!(Command::parse("on", None).unwrap().kind, CommandKind::On);
        assert_eq!(Command::parse("off", None).unwrap().kind, CommandKind::Off);
        assert_eq!(
            Command::parse("toggle", None).unwrap().kind,
            CommandKind::Toggle
        );
    }

    #[test]
    fn should_reject_unknown_command_id() {
        let result = Command::parse("blink", None);
        assert!(matches!(
            result,
            Err(HubBridgeError::UnsupportedCommand(
                UnsupportedCommandError::UnknownCommand(ref id)
            )) if id == "blink"
        ));
    }

    #[test]
    fn should_parse_all_recognized_parameters() {
        let parsed = LightParams::parse(&params(json!({
            "brightness": 50,
            "hue": 10,
            "saturation": 20,
            "color_temperature": 4000,
        })))
        .unwrap();

        assert_eq!(
            parsed,
            LightParams {
                brightness: Some(50),
                hue: Some(10),
                saturation: Some(20),
                color_temperature: Some(4000),
            }
        );
    }

    #[test]
    fn should_accept_range_bounds() {
        let parsed =
            LightParams::parse(&params(json!({"brightness": 0, "saturation": 100}))).unwrap();
        assert_eq!(parsed.brightness, Some(0));
        assert_eq!(parsed.saturation, Some(100));
    }

    #[test]
    fn should_reject_brightness_above_range() {
        let result = LightParams::parse(&params(json!({"brightness": 150})));
        assert!(matches!(
            result,
            Err(HubBridgeError::InvalidParameter(ParameterError::OutOfRange {
                name: "brightness",
                value: 150,
                ..
            }))
        ));
    }

    #[test]
    fn should_reject_negative_hue() {
        let result = LightParams::parse(&params(json!({"hue": -1})));
        assert!(matches!(result, Err(HubBridgeError::InvalidParameter(_))));
    }

    #[test]
    fn should_reject_zero_color_temperature() {
        let result = LightParams::parse(&params(json!({"color_temperature": 0})));
        assert!(matches!(
            result,
            Err(HubBridgeError::InvalidParameter(ParameterError::OutOfRange { min: 1, .. }))
        ));
    }

    #[test]
    fn should_reject_non_integer_value() {
        let result = LightParams::parse(&params(json!({"brightness": "high"})));
        assert!(matches!(
            result,
            Err(HubBridgeError::InvalidParameter(ParameterError::NotAnInteger {
                name: "brightness"
            }))
        ));

        let result = LightParams::parse(&params(json!({"brightness": 40.5})));
        assert!(matches!(result, Err(HubBridgeError::InvalidParameter(_))));
    }

    #[test]
    fn should_reject_unknown_parameter_even_when_others_are_invalid() {
        let result = LightParams::parse(&params(json!({"brightness": 500, "effect": "rainbow"})));
        assert!(matches!(
            result,
            Err(HubBridgeError::UnsupportedCommand(
                UnsupportedCommandError::UnknownParameter(ref key)
            )) if key == "effect"
        ));
    }

    #[test]
    fn should_reject_huge_integer_as_out_of_range() {
        let result = LightParams::parse(&params(json!({"color_temperature": u64::MAX})));
        assert!(matches!(result, Err(HubBridgeError::InvalidParameter(_))));
    }

    #[test]
    fn should_map_results_to_status() {
        let ok: Result<(), HubBridgeError> = Ok(());
        assert_eq!(CommandStatus::from(&ok), CommandStatus::Ok);

        let failed: Result<(), HubBridgeError> = Err(HubBridgeError::Cancelled);
        assert_eq!(CommandStatus::from(&failed), CommandStatus::ServiceUnavailable);
    }

    #[test]
    fn should_serialize_status_in_remote_format() {
        assert_eq!(
            serde_json::to_string(&CommandStatus::ServiceUnavailable).unwrap(),
            "\"SERVICE_UNAVAILABLE\""
        );
    }
}
