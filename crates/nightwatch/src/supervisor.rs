//! Outer retry loop: keeps a session alive across transport failures.

use crate::config::Config;
use crate::error::NightwatchResult;
use crate::session::Session;
use backlight::{LedDriver, NightmodeController};
use tracing::{info, warn};

/// Runs sessions back to back, restarting on recoverable failure.
///
/// Each attempt gets a brand-new session: new connection, new request
/// correlator, output baseline re-established. Only transport-level
/// failures are retried; anything else propagates and stops the process.
pub struct Supervisor<D> {
    config: Config,
    lights: NightmodeController<D>,
}

impl<D: LedDriver> Supervisor<D> {
    /// Create a supervisor owning the backlight controller.
    pub fn new(config: Config, lights: NightmodeController<D>) -> Self {
        Self { config, lights }
    }

    /// Run sessions until a non-recoverable error.
    pub async fn run(&mut self) -> NightwatchResult<()> {
        let mut attempt: u64 = 0;
        loop {
            attempt += 1;
            info!(attempt, url = %self.config.url, "Starting session");

            let result = match Session::connect(&self.config, &mut self.lights).await {
                Ok(session) => session.run().await,
                Err(e) => Err(e),
            };

            let error = match result {
                Ok(()) => continue,
                Err(e) => e,
            };

            if !error.is_recoverable() {
                return Err(error);
            }

            warn!(
                attempt,
                error = %error,
                delay = ?self.config.reconnect_delay,
                "Session ended, reconnecting"
            );
            tokio::time::sleep(self.config.reconnect_delay).await;
        }
    }
}
