//! Error types for nightwatch.

use thiserror::Error;
use tokio_tungstenite::tungstenite;
use tokio_tungstenite::tungstenite::error::ProtocolError;

/// Nightwatch error type.
#[derive(Error, Debug)]
pub enum NightwatchError {
    /// WebSocket transport failure (connect, send, or receive)
    #[error("transport error: {0}")]
    Transport(#[from] tungstenite::Error),

    /// Server closed the connection
    #[error("connection closed by server")]
    ConnectionClosed,

    /// A recognized message kind arrived with an untrustworthy payload
    #[error("protocol error: {0}")]
    Protocol(#[from] hass_protocol::DecodeError),

    /// A state_changed event for the monitored entity carried no new state
    #[error("state_changed event for {entity_id} has no new_state")]
    MissingNewState { entity_id: String },

    /// A get_states result reported success without a body
    #[error("get_states result {id} has no body")]
    EmptySnapshot { id: u64 },

    /// Failed to serialize an outbound frame
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Backlight device failure
    #[error("backlight error: {0}")]
    Lights(#[from] backlight::BacklightError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl NightwatchError {
    /// Whether the supervisor should retry with a fresh session.
    ///
    /// Recoverable means the transport went away: refused, reset, broken
    /// pipe, closed, torn down mid-handshake. Everything else points at a
    /// bug or a misconfiguration and must surface instead of looping.
    pub fn is_recoverable(&self) -> bool {
        match self {
            NightwatchError::ConnectionClosed => true,
            NightwatchError::Transport(e) => matches!(
                e,
                tungstenite::Error::Io(_)
                    | tungstenite::Error::ConnectionClosed
                    | tungstenite::Error::AlreadyClosed
                    | tungstenite::Error::Protocol(
                        ProtocolError::ResetWithoutClosingHandshake
                            | ProtocolError::HandshakeIncomplete
                    )
            ),
            _ => false,
        }
    }
}

/// Result type for nightwatch operations.
pub type NightwatchResult<T> = Result<T, NightwatchError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn transport_failures_are_recoverable() {
        let refused = NightwatchError::Transport(tungstenite::Error::Io(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            "refused",
        )));
        assert!(refused.is_recoverable());

        let reset = NightwatchError::Transport(tungstenite::Error::Protocol(
            ProtocolError::ResetWithoutClosingHandshake,
        ));
        assert!(reset.is_recoverable());

        assert!(NightwatchError::ConnectionClosed.is_recoverable());
    }

    #[test]
    fn everything_else_is_fatal() {
        let malformed = hass_protocol::ServerMessage::decode(r#"{"type":"result","id":"x"}"#)
            .unwrap_err();
        assert!(!NightwatchError::Protocol(malformed).is_recoverable());

        assert!(!NightwatchError::Config("bad url".to_string()).is_recoverable());
        assert!(!NightwatchError::MissingNewState {
            entity_id: "switch.monitor".to_string()
        }
        .is_recoverable());
        assert!(!NightwatchError::EmptySnapshot { id: 2 }.is_recoverable());
    }
}
