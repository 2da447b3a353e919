//! Discovery service — turns hub device snapshots into registered entities.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use hubbridge_domain::detect::detect;
use hubbridge_domain::device::Device;
use hubbridge_domain::entity::Entity;
use hubbridge_domain::error::{HubBridgeError, NotFoundError};
use hubbridge_domain::event::Event;
use hubbridge_domain::factory::EntityFactory;
use hubbridge_domain::id::{DeviceId, EntityId};
use hubbridge_domain::time::now;

use crate::ports::{EventPublisher, HubClient};
use crate::registry::EntityRegistry;

/// Counts from one discovery pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscoveryReport {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
    pub unsupported: usize,
    /// Entities kept as they were because the hub could not detail their device.
    pub stale: usize,
}

/// Application service building the entity registry from the hub.
pub struct DiscoveryService<C, P> {
    client: C,
    publisher: P,
    registry: Arc<EntityRegistry>,
    factory: EntityFactory,
    device_filter: BTreeSet<DeviceId>,
}

enum Registration {
    Added,
    Updated,
}

impl<C: HubClient, P: EventPublisher> DiscoveryService<C, P> {
    /// Create a new service exposing every device of the hub.
    pub fn new(
        client: C,
        publisher: P,
        registry: Arc<EntityRegistry>,
        factory: EntityFactory,
    ) -> Self {
        Self {
            client,
            publisher,
            registry,
            factory,
            device_filter: BTreeSet::new(),
        }
    }

    /// Only expose the listed devices. An empty list exposes every device.
    #[must_use]
    pub fn with_device_filter<I, D>(mut self, device_ids: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<DeviceId>,
    {
        self.device_filter = device_ids.into_iter().map(Into::into).collect();
        self
    }

    fn is_selected(&self, id: &DeviceId) -> bool {
        self.device_filter.is_empty() || self.device_filter.contains(id)
    }

    /// Snapshot every device and bring the registry in line with it.
    ///
    /// Supported devices are added or replace their previous entity;
    /// entities whose device is gone, filtered out or no longer supported
    /// are removed. A registered entity whose device only came back as a
    /// [partial](Device::partial) list entry is kept unchanged.
    ///
    /// # Errors
    ///
    /// Returns the hub client's error when the device list cannot be fetched.
    /// The registry is left untouched in that case.
    #[tracing::instrument(skip(self))]
    pub async fn discover(&self) -> Result<DiscoveryReport, HubBridgeError> {
        let devices = self.client.list_devices().await?;
        let mut report = DiscoveryReport::default();
        let mut seen = HashSet::new();

        for device in devices {
            if !self.is_selected(&device.id) {
                tracing::debug!(device_id = %device.id, "device not in filter, skipping");
                continue;
            }
            if device.partial {
                let entity_id = EntityId::from(&device.id);
                if self.registry.slot(&entity_id).is_some() {
                    tracing::warn!(device_id = %device.id, "device details unavailable, keeping entity");
                    seen.insert(entity_id);
                    report.stale += 1;
                    continue;
                }
            }
            match self.entity_for(&device)? {
                Some(entity) => {
                    seen.insert(entity.id.clone());
                    match self.register(entity).await {
                        Registration::Added => report.added += 1,
                        Registration::Updated => report.updated += 1,
                    }
                }
                None => report.unsupported += 1,
            }
        }

        for id in self.registry.ids() {
            if !seen.contains(&id) && self.unregister(&id).await {
                report.removed += 1;
            }
        }

        tracing::info!(
            added = report.added,
            updated = report.updated,
            removed = report.removed,
            unsupported = report.unsupported,
            stale = report.stale,
            "discovery complete"
        );
        Ok(report)
    }

    /// Re-snapshot a single device and update its entity.
    ///
    /// Returns `None` when the device no longer maps to an entity; any
    /// previous entity is then removed.
    ///
    /// # Errors
    ///
    /// Returns [`HubBridgeError::NotFound`] for a device outside the filter,
    /// or the hub client's error.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_device(&self, id: &DeviceId) -> Result<Option<Entity>, HubBridgeError> {
        if !self.is_selected(id) {
            return Err(NotFoundError {
                entity: "Device",
                id: id.to_string(),
            }
            .into());
        }

        let device = self.client.get_device(id).await?;
        match self.entity_for(&device)? {
            Some(entity) => {
                self.register(entity.clone()).await;
                Ok(Some(entity))
            }
            None => {
                self.unregister(&EntityId::from(id)).await;
                Ok(None)
            }
        }
    }

    fn entity_for(&self, device: &Device) -> Result<Option<Entity>, HubBridgeError> {
        let Some(entity_type) = detect(&device.capabilities) else {
            tracing::debug!(
                device_id = %device.id,
                device_name = %device.name,
                "no supported entity type for device"
            );
            return Ok(None);
        };
        self.factory
            .build(device, Some(entity_type), now())
            .map(Some)
    }

    async fn register(&self, entity: Entity) -> Registration {
        let registration = if let Some(slot) = self.registry.slot(&entity.id) {
            // Waits for a command in flight on this entity before replacing it.
            *slot.lock().await = entity.clone();
            Registration::Updated
        } else {
            self.registry.insert(entity.clone());
            Registration::Added
        };

        tracing::debug!(
            entity_id = %entity.id,
            entity_type = %entity.entity_type,
            "entity registered"
        );
        let event = match registration {
            Registration::Added => Event::EntityAdded { entity },
            Registration::Updated => Event::EntityChanged { entity },
        };
        self.publish(event).await;
        registration
    }

    async fn unregister(&self, id: &EntityId) -> bool {
        let Some(slot) = self.registry.slot(id) else {
            return false;
        };
        // Waits for a command in flight on this entity before dropping it.
        let _entity = slot.lock().await;
        self.registry.remove(id);
        tracing::info!(entity_id = %id, "entity removed");
        self.publish(Event::EntityRemoved {
            entity_id: id.clone(),
        })
        .await;
        true
    }

    async fn publish(&self, event: Event) {
        if let Err(err) = self.publisher.publish(event).await {
            tracing::warn!(error = %err, "failed to publish discovery event");
        }
    }
}
