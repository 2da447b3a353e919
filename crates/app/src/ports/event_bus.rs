//! Event bus port — publish/subscribe for entity events.

use std::future::Future;

use hubbridge_domain::error::HubBridgeError;
use hubbridge_domain::event::Event;

/// Publishes entity events to interested subscribers.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), HubBridgeError>> + Send;
}

impl<T: EventPublisher + Send + Sync> EventPublisher for std::sync::Arc<T> {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), HubBridgeError>> + Send {
        (**self).publish(event)
    }
}
