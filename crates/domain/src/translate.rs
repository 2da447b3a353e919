//! Command translation — generic remote command to ordered hub calls.
//!
//! Translation is all-or-nothing: every parameter and feature check happens
//! before the first call is produced, so a rejected command never reaches the
//! hub.
//!
//! Parameter calls are emitted in the fixed order brightness, color, color
//! temperature. When any of them is emitted the plain `on` call is left out,
//! the hub turning the device on as part of each setter.

use crate::command::{Command, CommandKind, LightParams, ResolvedCommand};
use crate::entity::{Entity, Feature, attribute};
use crate::error::{HubBridgeError, UnsupportedCommandError};
use crate::hub_call::{HubCall, HubCommand};
use crate::id::DeviceId;

/// The outcome of translating one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// What the command means once `toggle` is resolved and parameters validated.
    pub command: ResolvedCommand,
    /// Hub calls to issue, in order.
    pub calls: Vec<HubCall>,
}

/// Translate `command` for `entity`.
///
/// # Errors
///
/// - [`HubBridgeError::UnsupportedCommand`] for an unknown parameter key or
///   parameters on `off`/`toggle`.
/// - [`HubBridgeError::InvalidParameter`] for a non-integer or out-of-range value.
/// - [`HubBridgeError::UnsupportedFeature`] when the entity lacks a feature a
///   parameter needs.
pub fn translate(entity: &Entity, command: &Command) -> Result<Translation, HubBridgeError> {
    let resolved = resolve(entity, command)?;
    let device_id = DeviceId::from(&entity.id);

    let calls = match resolved {
        ResolvedCommand::Off => vec![HubCall::new(device_id, HubCommand::Off)],
        ResolvedCommand::On(params) => on_calls(device_id, &params),
    };

    Ok(Translation {
        command: resolved,
        calls,
    })
}

/// Resolve `toggle` against the current state and validate parameters.
///
/// A hue/saturation half missing from the parameters is filled in from the
/// entity's cache, so the resolved command carries the full colour.
fn resolve(entity: &Entity, command: &Command) -> Result<ResolvedCommand, HubBridgeError> {
    match command.kind {
        CommandKind::Off | CommandKind::Toggle if command.has_params() => {
            Err(UnsupportedCommandError::UnexpectedParameters(command.kind).into())
        }
        CommandKind::Off => Ok(ResolvedCommand::Off),
        CommandKind::Toggle if entity.is_on() => Ok(ResolvedCommand::Off),
        CommandKind::Toggle => Ok(ResolvedCommand::On(LightParams::default())),
        CommandKind::On => {
            let mut params = LightParams::parse(&command.params)?;
            require(entity, params.brightness.is_some(), Feature::Dim)?;
            require(entity, params.has_color(), Feature::Color)?;
            require(
                entity,
                params.color_temperature.is_some(),
                Feature::ColorTemperature,
            )?;
            if params.has_color() {
                params.hue = params
                    .hue
                    .or_else(|| cached_percent(entity, attribute::HUE))
                    .or(Some(0));
                params.saturation = params
                    .saturation
                    .or_else(|| cached_percent(entity, attribute::SATURATION))
                    .or(Some(0));
            }
            Ok(ResolvedCommand::On(params))
        }
    }
}

fn on_calls(device_id: DeviceId, params: &LightParams) -> Vec<HubCall> {
    let mut calls = Vec::new();

    if let Some(level) = params.brightness {
        calls.push(HubCall::new(device_id.clone(), HubCommand::SetLevel(level)));
    }
    if params.has_color() {
        calls.push(HubCall::new(
            device_id.clone(),
            HubCommand::SetColor {
                hue: params.hue.unwrap_or(0),
                saturation: params.saturation.unwrap_or(0),
            },
        ));
    }
    if let Some(kelvin) = params.color_temperature {
        calls.push(HubCall::new(
            device_id.clone(),
            HubCommand::SetColorTemperature(kelvin),
        ));
    }

    if calls.is_empty() {
        calls.push(HubCall::new(device_id, HubCommand::On));
    }
    calls
}

fn require(entity: &Entity, needed: bool, feature: Feature) -> Result<(), HubBridgeError> {
    if needed && !entity.supports(feature) {
        return Err(HubBridgeError::UnsupportedFeature {
            entity_id: entity.id.clone(),
            feature,
        });
    }
    Ok(())
}

fn cached_percent(entity: &Entity, name: &str) -> Option<u8> {
    entity
        .int_attribute(name)
        .and_then(|value| u8::try_from(value).ok())
        .filter(|value| *value <= 100)
}
