//! Entity registry — the live set of exposed entities.
//!
//! Every entity lives in its own [`tokio::sync::Mutex`] slot. A command holds the
//! slot from translation until projection, which serialises commands per
//! entity while letting different entities proceed concurrently. The map of
//! slots itself sits behind a short-lived std lock that is never held across
//! an `.await`.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::Mutex;

use hubbridge_domain::entity::Entity;
use hubbridge_domain::id::EntityId;

/// Shared handle on one entity.
pub type EntitySlot = Arc<Mutex<Entity>>;

/// Holds the entities currently exposed to the remote.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    slots: RwLock<HashMap<EntityId, EntitySlot>>,
}

impl EntityRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `entity` in a fresh slot, returning the slot it replaced.
    pub fn insert(&self, entity: Entity) -> Option<EntitySlot> {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots.insert(entity.id.clone(), Arc::new(Mutex::new(entity)))
    }

    /// Remove the entity, returning its slot.
    pub fn remove(&self, id: &EntityId) -> Option<EntitySlot> {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots.remove(id)
    }

    /// The slot of an entity, if registered.
    #[must_use]
    pub fn slot(&self, id: &EntityId) -> Option<EntitySlot> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.get(id).cloned()
    }

    /// Whether `slot` is still the one registered under `id`.
    #[must_use]
    pub fn holds(&self, id: &EntityId, slot: &EntitySlot) -> bool {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots
            .get(id)
            .is_some_and(|current| Arc::ptr_eq(current, slot))
    }

    /// Current copy of an entity.
    ///
    /// Waits for a command in flight on that entity to finish.
    pub async fn get(&self, id: &EntityId) -> Option<Entity> {
        let slot = self.slot(id)?;
        let entity = slot.lock().await;
        Some(entity.clone())
    }

    /// Copies of every entity, ordered by id.
    pub async fn snapshot(&self) -> Vec<Entity> {
        let slots: Vec<EntitySlot> = {
            let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
            slots.values().cloned().collect()
        };
        let mut entities = Vec::with_capacity(slots.len());
        for slot in slots {
            entities.push(slot.lock().await.clone());
        }
        entities.sort_by(|a, b| a.id.cmp(&b.id));
        entities
    }

    /// Ids of every registered entity.
    #[must_use]
    pub fn ids(&self) -> Vec<EntityId> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entity.
    pub fn clear(&self) {
        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
