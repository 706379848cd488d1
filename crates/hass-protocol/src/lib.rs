//! Wire model for the Home Assistant WebSocket API subset spoken by nightwatch.
//!
//! Covers the authentication handshake, `state_changed` event subscription,
//! and the `get_states` snapshot request. Decoding is two-stage so the caller
//! can tell transient garbage apart from a recognized message with a shape
//! the client cannot trust.

pub mod error;
pub mod messages;

pub use error::DecodeError;
pub use messages::{
    ClientMessage, EntityState, EventEnvelope, NewState, ServerMessage, StateChange, STATE_CHANGED,
};
