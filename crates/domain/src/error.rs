//! Common error types used across the workspace.
//!
//! Every layer reports failures as [`HubBridgeError`]. Detail errors carry the
//! typed reason and convert via `#[from]`; adapters box their own error types
//! into the IO variants.

use crate::command::{CommandKind, CommandStatus};
use crate::entity::Feature;
use crate::id::{DeviceId, EntityId};

/// Boxed error reported by an adapter.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error for the bridge.
#[derive(Debug, thiserror::Error)]
pub enum HubBridgeError {
    /// A command parameter is malformed or out of range.
    #[error("invalid parameter")]
    InvalidParameter(#[from] ParameterError),

    /// The command needs a feature the entity does not have.
    #[error("entity {entity_id} does not support {feature}")]
    UnsupportedFeature {
        /// Target entity.
        entity_id: EntityId,
        /// Feature the command required.
        feature: Feature,
    },

    /// Unknown command, unknown parameter, or parameters where none are accepted.
    #[error("unsupported command")]
    UnsupportedCommand(#[from] UnsupportedCommandError),

    /// An entity was requested for a device without a supported entity type.
    #[error("device {device_id} has no supported entity type")]
    UnsupportedCapability {
        /// Device that could not be mapped.
        device_id: DeviceId,
    },

    /// The hub could not be reached or did not answer in time.
    #[error("hub unavailable")]
    ServiceUnavailable(#[source] BoxError),

    /// The hub answered, but with a failure.
    #[error("hub server error")]
    ServerError(#[source] BoxError),

    /// The requested entity or device is not known.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// Another command for the same entity is still in flight.
    #[error("entity {entity_id} is busy")]
    Busy {
        /// Target entity.
        entity_id: EntityId,
    },

    /// The bridge is shutting down.
    #[error("command cancelled")]
    Cancelled,

    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),
}

impl HubBridgeError {
    /// The status reported back to the remote for this failure.
    #[must_use]
    pub fn status(&self) -> CommandStatus {
        match self {
            Self::ServiceUnavailable(_) | Self::Busy { .. } | Self::Cancelled => {
                CommandStatus::ServiceUnavailable
            }
            _ => CommandStatus::ServerError,
        }
    }
}

/// Why a command parameter was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParameterError {
    /// The value is not an integer.
    #[error("`{name}` must be an integer")]
    NotAnInteger {
        /// Parameter key.
        name: &'static str,
    },

    /// The value is an integer outside the accepted range.
    #[error("`{name}` must be within {min}..={max}, got {value}")]
    OutOfRange {
        /// Parameter key.
        name: &'static str,
        /// Received value.
        value: i64,
        /// Lowest accepted value.
        min: i64,
        /// Highest accepted value.
        max: i64,
    },
}

/// Why a command was not understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnsupportedCommandError {
    /// The command id is not one of `on`, `off`, `toggle`.
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    /// A parameter key is not recognized.
    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),

    /// Parameters were given to a command that takes none.
    #[error("command `{0}` does not accept parameters")]
    UnexpectedParameters(CommandKind),
}

/// A lookup did not find the requested item.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of item (`"Entity"`, `"Device"`).
    pub entity: &'static str,
    /// Identifier that was looked up.
    pub id: String,
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A device snapshot carried an empty id.
    #[error("device id must not be empty")]
    EmptyDeviceId,
}
