//! Protocol session: auth handshake, subscription bootstrap, frame dispatch.

use crate::config::Config;
use crate::correlator::{RequestCorrelator, RequestKind};
use crate::error::{NightwatchError, NightwatchResult};
use crate::reconciler::Reconciler;
use crate::transport::WsTransport;
use backlight::{LedDriver, NightmodeController};
use hass_protocol::{ClientMessage, DecodeError, EntityState, ServerMessage};
use tracing::{debug, error, info, warn};

/// Where the session stands in the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionPhase {
    /// Connected, waiting for the server to ask for credentials
    AwaitingAuthRequired,
    /// Credentials sent, waiting for the verdict
    AwaitingAuthResult,
    /// Authenticated and subscribed, streaming events
    Steady,
    /// Credentials rejected; nothing further is sent on this connection
    AuthRejected,
}

/// One connection's worth of protocol state.
///
/// A session owns its transport, correlator, and phase; the supervisor
/// builds a fresh one for every connection attempt and reuses none of it.
pub struct Session<'a, D> {
    config: &'a Config,
    lights: &'a mut NightmodeController<D>,
    transport: WsTransport,
    requests: RequestCorrelator,
    reconciler: Reconciler,
    phase: SessionPhase,
}

impl<'a, D: LedDriver> Session<'a, D> {
    /// Connect to the endpoint and establish the output baseline.
    pub async fn connect(
        config: &'a Config,
        lights: &'a mut NightmodeController<D>,
    ) -> NightwatchResult<Session<'a, D>> {
        let transport = WsTransport::connect(&config.url).await?;
        info!(url = %config.url, "Connected");
        lights.reset_default()?;

        Ok(Self {
            config,
            lights,
            transport,
            requests: RequestCorrelator::new(),
            reconciler: Reconciler::new(config.entity_id.clone()),
            phase: SessionPhase::AwaitingAuthRequired,
        })
    }

    /// Receive and dispatch frames until the transport fails.
    ///
    /// Frames that decode to nothing usable are logged and dropped; a
    /// recognized message kind with an untrustworthy payload ends the
    /// session with a fatal error.
    pub async fn run(mut self) -> NightwatchResult<()> {
        loop {
            let text = self.transport.recv_text().await?;
            match ServerMessage::decode(&text) {
                Ok(message) => self.handle_message(message).await?,
                Err(e @ (DecodeError::Json(_) | DecodeError::MissingType)) => {
                    warn!(error = %e, frame = %truncate(&text), "Dropping undecodable frame");
                }
                Err(e) => return Err(NightwatchError::Protocol(e)),
            }
        }
    }

    async fn handle_message(&mut self, message: ServerMessage) -> NightwatchResult<()> {
        match message {
            ServerMessage::AuthRequired => self.handle_auth_required().await,
            ServerMessage::AuthOk { ha_version } => self.handle_auth_ok(ha_version).await,
            ServerMessage::AuthInvalid { message } => {
                error!(reason = %message, "Authentication rejected");
                self.phase = SessionPhase::AuthRejected;
                Ok(())
            }
            ServerMessage::Event { event } => {
                // Events are dispatched regardless of phase; filtering
                // happens at the entity level, not the protocol level.
                self.reconciler.on_event(&event.data, self.lights).await
            }
            ServerMessage::Result {
                id,
                success,
                result,
            } => self.handle_result(id, success, result).await,
            ServerMessage::Unrecognized => {
                debug!("Ignoring unrecognized message type");
                Ok(())
            }
        }
    }

    async fn handle_auth_required(&mut self) -> NightwatchResult<()> {
        if self.phase == SessionPhase::AuthRejected {
            warn!("Server asked for credentials after rejecting them, staying quiet");
            return Ok(());
        }
        info!("Server requested authentication");
        self.send(&ClientMessage::auth(self.config.access_token.clone()))
            .await?;
        self.phase = SessionPhase::AwaitingAuthResult;
        Ok(())
    }

    async fn handle_auth_ok(&mut self, ha_version: Option<String>) -> NightwatchResult<()> {
        if self.phase == SessionPhase::AuthRejected {
            warn!("Server accepted credentials it already rejected, staying quiet");
            return Ok(());
        }
        info!(
            ha_version = ha_version.as_deref().unwrap_or("unknown"),
            "Authenticated"
        );

        // Subscribe first, snapshot second, without waiting in between:
        // any change the snapshot misses arrives as an event.
        let subscribe = self.requests.create(RequestKind::Subscribe);
        self.send(&ClientMessage::subscribe_state_changes(subscribe.id))
            .await?;
        let snapshot = self.requests.create(RequestKind::GetStates);
        self.send(&ClientMessage::get_states(snapshot.id)).await?;

        self.phase = SessionPhase::Steady;
        Ok(())
    }

    async fn handle_result(
        &mut self,
        id: u64,
        success: bool,
        result: Option<Vec<EntityState>>,
    ) -> NightwatchResult<()> {
        match self.requests.resolve(id) {
            Some(RequestKind::Subscribe) => {
                if success {
                    info!(id, "Subscribed to state_changed events");
                } else {
                    warn!(id, "Subscription request failed");
                }
                Ok(())
            }
            Some(RequestKind::GetStates) => {
                if !success {
                    warn!(id, "State snapshot request failed");
                    return Ok(());
                }
                let states = result.ok_or(NightwatchError::EmptySnapshot { id })?;
                debug!(id, count = states.len(), "Applying state snapshot");
                self.reconciler.on_bootstrap(&states, self.lights).await
            }
            None => {
                debug!(id, "Result matches no outstanding request");
                Ok(())
            }
        }
    }

    async fn send(&mut self, message: &ClientMessage) -> NightwatchResult<()> {
        self.transport.send_text(message.to_json()?).await
    }
}

/// Clip a frame for log output.
fn truncate(text: &str) -> &str {
    const MAX: usize = 200;
    if text.len() <= MAX {
        return text;
    }
    let mut end = MAX;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
