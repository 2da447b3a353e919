//! Command service — executes remote commands against the hub.
//!
//! A command holds its entity's registry slot from translation until
//! projection. Hub calls are issued in order and the first failure aborts the
//! rest; the entity is only projected once every call succeeded.
//!
//! Shutdown is broadcast through a [`watch`] channel: commands waiting for a
//! slot or in the middle of their hub calls end with
//! [`HubBridgeError::Cancelled`] and nothing is projected.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::watch;

use hubbridge_domain::command::{Command, CommandStatus};
use hubbridge_domain::entity::Entity;
use hubbridge_domain::error::{HubBridgeError, NotFoundError};
use hubbridge_domain::event::Event;
use hubbridge_domain::id::EntityId;
use hubbridge_domain::projection;
use hubbridge_domain::time::now;
use hubbridge_domain::translate::translate;

use crate::ports::{EventPublisher, HubClient};
use crate::registry::EntityRegistry;

/// What to do with a command for an entity that already has one in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusyPolicy {
    /// Wait for the earlier command to finish.
    #[default]
    Queue,
    /// Fail immediately with [`HubBridgeError::Busy`].
    Reject,
}

/// Application service dispatching commands to the hub.
pub struct CommandService<C, P> {
    client: C,
    publisher: P,
    registry: Arc<EntityRegistry>,
    busy_policy: BusyPolicy,
    shutdown: watch::Sender<bool>,
}

impl<C: HubClient, P: EventPublisher> CommandService<C, P> {
    /// Create a new service queueing concurrent commands per entity.
    pub fn new(client: C, publisher: P, registry: Arc<EntityRegistry>) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            client,
            publisher,
            registry,
            busy_policy: BusyPolicy::default(),
            shutdown,
        }
    }

    #[must_use]
    pub fn with_busy_policy(mut self, busy_policy: BusyPolicy) -> Self {
        self.busy_policy = busy_policy;
        self
    }

    /// Execute `command` on the entity and return the projected entity.
    ///
    /// # Errors
    ///
    /// - [`HubBridgeError::NotFound`] when the entity is not registered.
    /// - [`HubBridgeError::Busy`] when another command holds the entity and the
    ///   policy is [`BusyPolicy::Reject`].
    /// - [`HubBridgeError::Cancelled`] when the service is shutting down.
    /// - Translation errors, and the hub client's error for the first failing
    ///   call. The entity is left untouched on every error.
    #[tracing::instrument(skip(self, command), fields(command = %command.kind))]
    pub async fn execute(
        &self,
        entity_id: &EntityId,
        command: Command,
    ) -> Result<Entity, HubBridgeError> {
        let shutdown = self.shutdown.subscribe();
        if *shutdown.borrow() {
            return Err(HubBridgeError::Cancelled);
        }

        let not_found = || NotFoundError {
            entity: "Entity",
            id: entity_id.to_string(),
        };
        let slot = self.registry.slot(entity_id).ok_or_else(not_found)?;

        let mut entity = match self.busy_policy {
            BusyPolicy::Queue => tokio::select! {
                guard = Arc::clone(&slot).lock_owned() => guard,
                () = cancelled(shutdown.clone()) => return Err(HubBridgeError::Cancelled),
            },
            BusyPolicy::Reject => Arc::clone(&slot).try_lock_owned().map_err(|_| {
                tracing::debug!("entity busy, rejecting command");
                HubBridgeError::Busy {
                    entity_id: entity_id.clone(),
                }
            })?,
        };
        // Removed while this command waited for the slot.
        if !self.registry.holds(entity_id, &slot) {
            return Err(not_found().into());
        }

        let translation = translate(&entity, &command)?;
        tracing::debug!(calls = translation.calls.len(), "command translated");

        let dispatch = async {
            for call in &translation.calls {
                tracing::debug!(%call, "sending hub call");
                self.client.send_command(call).await?;
            }
            Ok::<(), HubBridgeError>(())
        };
        tokio::select! {
            result = dispatch => result?,
            () = cancelled(shutdown) => {
                tracing::warn!("shutdown during dispatch, command cancelled");
                return Err(HubBridgeError::Cancelled);
            }
        }

        projection::apply(&mut entity, &translation.command, now());
        let updated = entity.clone();
        tracing::info!(state = %updated.state, "command applied");

        if let Err(err) = self
            .publisher
            .publish(Event::EntityChanged {
                entity: updated.clone(),
            })
            .await
        {
            tracing::warn!(error = %err, "failed to publish entity change");
        }
        Ok(updated)
    }

    /// Remote-facing entry point: parse, execute, and report a status.
    pub async fn handle(
        &self,
        entity_id: &str,
        cmd_id: &str,
        params: Option<Map<String, Value>>,
    ) -> CommandStatus {
        let entity_id = EntityId::new(entity_id);
        let result = match Command::parse(cmd_id, params) {
            Ok(command) => self.execute(&entity_id, command).await,
            Err(err) => Err(err),
        };

        let status = CommandStatus::from(&result);
        if let Err(err) = &result {
            tracing::warn!(entity_id = %entity_id, cmd_id, error = %err, ?status, "command failed");
        }
        status
    }

    /// Cancel commands in flight and reject later ones.
    pub fn shutdown(&self) {
        if !self.shutdown.send_replace(true) {
            tracing::info!("command service shutting down");
        }
    }

    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        *self.shutdown.borrow()
    }
}

/// Resolves once the shutdown flag is raised.
async fn cancelled(mut shutdown: watch::Receiver<bool>) {
    while !*shutdown.borrow_and_update() {
        if shutdown.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
