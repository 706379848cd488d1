//! Configuration for nightwatch.

use crate::error::{NightwatchError, NightwatchResult};
use std::fmt;
use std::time::Duration;
use url::Url;

/// Default WebSocket endpoint of a local Home Assistant install.
pub const DEFAULT_URL: &str = "ws://localhost:8123/api/websocket";

/// Nightwatch configuration.
#[derive(Clone)]
pub struct Config {
    /// Home Assistant WebSocket endpoint
    pub url: String,

    /// Long-lived access token presented during the auth handshake
    pub access_token: String,

    /// The one entity whose state drives the backlight
    pub entity_id: String,

    /// Pause between a session ending and the next connection attempt
    pub reconnect_delay: Duration,

    /// Pause between acquiring the LED device and commanding lights-out
    pub settle_delay: Duration,
}

impl Config {
    /// Create a config for the given endpoint, token, and entity.
    ///
    /// Delays start at their defaults: 5s reconnect, 500ms settle.
    pub fn new(
        url: impl Into<String>,
        access_token: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            access_token: access_token.into(),
            entity_id: entity_id.into(),
            reconnect_delay: Duration::from_secs(5),
            settle_delay: backlight::DEFAULT_SETTLE_DELAY,
        }
    }

    /// Validate fields that would otherwise fail deep inside a session.
    pub fn validate(&self) -> NightwatchResult<()> {
        let url = Url::parse(&self.url)
            .map_err(|e| NightwatchError::Config(format!("invalid URL {:?}: {}", self.url, e)))?;
        match url.scheme() {
            "ws" | "wss" => {}
            other => {
                return Err(NightwatchError::Config(format!(
                    "URL scheme must be ws or wss, got {:?}",
                    other
                )));
            }
        }
        if self.access_token.is_empty() {
            return Err(NightwatchError::Config("access token is empty".to_string()));
        }
        if self.entity_id.is_empty() {
            return Err(NightwatchError::Config("entity id is empty".to_string()));
        }
        Ok(())
    }
}

// The access token must never reach logs or debug output.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("url", &self.url)
            .field("access_token", &"<redacted>")
            .field("entity_id", &self.entity_id)
            .field("reconnect_delay", &self.reconnect_delay)
            .field("settle_delay", &self.settle_delay)
            .finish()
    }
}
