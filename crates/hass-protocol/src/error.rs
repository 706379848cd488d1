//! Decode errors for inbound frames.

use thiserror::Error;

/// Why an inbound text frame could not become a `ServerMessage`.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Frame is not valid JSON
    #[error("frame is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Frame is JSON but carries no usable `type` tag
    #[error("frame has no message type")]
    MissingType,

    /// A recognized message kind whose payload does not match its shape
    #[error("malformed {kind} payload: {source}")]
    Payload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}
