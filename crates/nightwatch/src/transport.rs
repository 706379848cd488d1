//! WebSocket transport for one session.

use crate::error::{NightwatchError, NightwatchResult};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, trace};

/// Text-frame transport over one WebSocket connection.
///
/// Owned by a single session and discarded with it: a transport that has
/// returned an error is never reused.
pub struct WsTransport {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsTransport {
    /// Connect to the endpoint.
    pub async fn connect(url: &str) -> NightwatchResult<Self> {
        let (stream, response) = connect_async(url).await?;
        debug!(status = %response.status(), "WebSocket handshake complete");
        Ok(Self { stream })
    }

    /// Send one text frame.
    pub async fn send_text(&mut self, text: String) -> NightwatchResult<()> {
        trace!(len = text.len(), "Sending frame");
        self.stream.send(Message::Text(text.into())).await?;
        Ok(())
    }

    /// Receive the next text frame.
    ///
    /// Non-text frames (ping/pong/binary) are transport chatter and are
    /// skipped. A close frame or end-of-stream means the server hung up.
    pub async fn recv_text(&mut self) -> NightwatchResult<String> {
        loop {
            let message = match self.stream.next().await {
                Some(frame) => frame?,
                None => return Err(NightwatchError::ConnectionClosed),
            };
            match message {
                Message::Text(text) => return Ok(text.as_str().to_owned()),
                Message::Close(frame) => {
                    debug!(frame = ?frame, "Server sent a close frame");
                    return Err(NightwatchError::ConnectionClosed);
                }
                other => trace!(kind = ?other, "Skipping non-text frame"),
            }
        }
    }
}
