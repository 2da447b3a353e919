//! # hubbridged — hubbridge daemon
//!
//! Composition root that wires the Maker API adapter into the application
//! services and keeps the bridge running.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the tracing subscriber
//! - Construct the Maker API client and check the hub connection
//! - Construct the event bus, entity registry and application services
//! - Run discovery, then wait for SIGINT
//! - On shutdown, cancel commands in flight and drop every entity
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

use hubbridge_adapter_maker_api::MakerApiClient;
use hubbridge_app::event_bus::InProcessEventBus;
use hubbridge_app::ports::HubClient;
use hubbridge_app::registry::EntityRegistry;
use hubbridge_app::services::command_service::CommandService;
use hubbridge_app::services::discovery_service::DiscoveryService;
use hubbridge_domain::event::Event;
use hubbridge_domain::factory::EntityFactory;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();
    tracing::info!(hub = ?config.hub, "starting hubbridged");

    // Hub
    let client = Arc::new(MakerApiClient::new(&config.hub)?);
    client.test_connection().await?;

    // Event bus
    let event_bus = Arc::new(InProcessEventBus::new(256));
    let event_logger = tokio::spawn(log_events(event_bus.subscribe()));

    // Services
    let registry = Arc::new(EntityRegistry::new());
    let discovery = DiscoveryService::new(
        Arc::clone(&client),
        Arc::clone(&event_bus),
        Arc::clone(&registry),
        EntityFactory::new(config.entities.default_color_temperature),
    )
    .with_device_filter(config.discovery.device_filter.iter().map(String::as_str));
    let commands = CommandService::new(client, Arc::clone(&event_bus), Arc::clone(&registry))
        .with_busy_policy(config.entities.busy_policy);

    discovery.discover().await?;
    for entity in registry.snapshot().await {
        tracing::info!(
            entity_id = %entity.id,
            entity_type = %entity.entity_type,
            name = %entity.name,
            state = %entity.state,
            "exposing entity"
        );
    }
    tracing::info!(entities = registry.len(), "bridge ready");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown requested");

    commands.shutdown();
    registry.clear();
    event_logger.abort();
    tracing::info!("hubbridged stopped");

    Ok(())
}

async fn log_events(mut events: tokio::sync::broadcast::Receiver<Event>) {
    loop {
        match events.recv().await {
            Ok(Event::EntityAdded { entity }) => tracing::info!(
                entity_id = %entity.id,
                entity_type = %entity.entity_type,
                name = %entity.name,
                "entity added"
            ),
            Ok(Event::EntityChanged { entity }) => tracing::info!(
                entity_id = %entity.id,
                state = %entity.state,
                "entity changed"
            ),
            Ok(Event::EntityRemoved { entity_id }) => {
                tracing::info!(%entity_id, "entity removed");
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "event logger lagged behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
