//! Messages exchanged with the Home Assistant WebSocket API.

use crate::error::DecodeError;
use serde::{Deserialize, Serialize};

/// The one event type nightwatch subscribes to.
pub const STATE_CHANGED: &str = "state_changed";

/// A message received from the server.
///
/// The `type` tag is a closed set: anything the server sends outside it
/// decodes to [`ServerMessage::Unrecognized`] rather than an error, while a
/// known tag with an untrustworthy payload fails loudly.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// First frame after connect; the server wants credentials
    AuthRequired,

    /// Credentials accepted
    AuthOk {
        #[serde(default)]
        ha_version: Option<String>,
    },

    /// Credentials rejected, with a human-readable reason
    AuthInvalid { message: String },

    /// A subscribed event fired
    Event { event: EventEnvelope },

    /// Response to a correlated request
    Result {
        id: u64,
        success: bool,
        #[serde(default)]
        result: Option<Vec<EntityState>>,
    },

    /// Any message type outside the set this client speaks
    #[serde(other)]
    Unrecognized,
}

impl ServerMessage {
    /// Decode one inbound text frame.
    ///
    /// Two-stage on purpose: the stages map onto the error taxonomy the
    /// session loop keys off. [`DecodeError::Json`] and
    /// [`DecodeError::MissingType`] are droppable garbage;
    /// [`DecodeError::Payload`] means the server spoke a recognized message
    /// kind with a shape this client cannot trust.
    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let kind = match value.get("type").and_then(serde_json::Value::as_str) {
            Some(kind) => kind.to_string(),
            None => return Err(DecodeError::MissingType),
        };
        serde_json::from_value(value).map_err(|source| DecodeError::Payload { kind, source })
    }
}

/// Envelope around one fired event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventEnvelope {
    pub data: StateChange,
}

/// State-change payload for one entity.
///
/// `new_state` is absent when an entity is removed; whether that matters is
/// the consumer's call, so it stays optional here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StateChange {
    pub entity_id: String,
    pub new_state: Option<NewState>,
}

/// The state carried by a state-change. Only the literal value is read.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewState {
    pub state: String,
}

/// One record in a full-state snapshot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntityState {
    pub entity_id: String,
    pub state: String,
}

/// A message sent to the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Bearer-token credentials; the only uncorrelated send
    Auth { access_token: String },

    /// Subscribe to an event stream
    SubscribeEvents { id: u64, event_type: String },

    /// Request a snapshot of every entity's current state
    GetStates { id: u64 },
}

impl ClientMessage {
    /// Create an auth message.
    pub fn auth(access_token: impl Into<String>) -> Self {
        Self::Auth {
            access_token: access_token.into(),
        }
    }

    /// Create a subscribe_events message for `state_changed`.
    pub fn subscribe_state_changes(id: u64) -> Self {
        Self::SubscribeEvents {
            id,
            event_type: STATE_CHANGED.to_string(),
        }
    }

    /// Create a get_states message.
    pub fn get_states(id: u64) -> Self {
        Self::GetStates { id }
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
