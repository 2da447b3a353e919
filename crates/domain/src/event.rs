//! Event — a change to the set of exposed entities.
//!
//! Events are published after the registry has been updated, so a subscriber
//! always sees the entity as stored.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::id::EntityId;

/// Something that happened to an exposed entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A device was discovered and its entity registered.
    EntityAdded { entity: Entity },
    /// An entity was replaced by rediscovery or updated by a command.
    EntityChanged { entity: Entity },
    /// A device left the configured set.
    EntityRemoved { entity_id: EntityId },
}

impl Event {
    /// The entity the event is about.
    #[must_use]
    pub fn entity_id(&self) -> &EntityId {
        match self {
            Self::EntityAdded { entity } | Self::EntityChanged { entity } => &entity.id,
            Self::EntityRemoved { entity_id } => entity_id,
        }
    }
}
