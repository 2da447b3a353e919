//! State projection — the optimistic local update after a successful dispatch.
//!
//! The bridge never reads state back from the hub. Once every hub call of a
//! translation succeeded, the entity is updated to what the command asked for.
//! Callers must not project after a failed or partial dispatch.

use crate::command::ResolvedCommand;
use crate::entity::{AttributeValue, Entity, EntityState, attribute};
use crate::time::Timestamp;

/// Apply `command` to `entity` as if the hub carried it out.
pub fn apply(entity: &mut Entity, command: &ResolvedCommand, at: Timestamp) {
    match command {
        ResolvedCommand::Off => entity.state = EntityState::Off,
        ResolvedCommand::On(params) => {
            entity.state = EntityState::On;
            let updates = [
                (attribute::BRIGHTNESS, params.brightness.map(i64::from)),
                (attribute::HUE, params.hue.map(i64::from)),
                (attribute::SATURATION, params.saturation.map(i64::from)),
                (
                    attribute::COLOR_TEMPERATURE,
                    params.color_temperature.map(i64::from),
                ),
            ];
            for (name, value) in updates {
                if let Some(value) = value {
                    entity.set_attribute(name, AttributeValue::Int(value));
                }
            }
        }
    }
    entity.last_updated = at;
}
