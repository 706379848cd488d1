//! Nightmode on/off semantics over an LED driver.

use crate::driver::LedDriver;
use crate::error::BacklightResult;
use std::time::Duration;
use tracing::{debug, info};

/// Delay between acquiring the device and commanding lights-out.
///
/// Some LED stacks drop commands issued immediately after acquisition, so
/// the controller always lets the device settle first.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Whether nightmode is currently applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NightmodeState {
    Enabled,
    Disabled,
}

/// Owns the nightmode latch and drives the LED backend.
///
/// Both transitions are idempotent: enable re-runs the full
/// acquire-settle-darken sequence, and disable forwards a shutdown the
/// driver accepts even when the device was never acquired.
pub struct NightmodeController<D> {
    driver: D,
    state: NightmodeState,
    settle_delay: Duration,
}

impl<D: LedDriver> NightmodeController<D> {
    /// Create a controller with the default settle delay.
    pub fn new(driver: D) -> Self {
        Self::with_settle_delay(driver, DEFAULT_SETTLE_DELAY)
    }

    /// Create a controller with a custom settle delay.
    pub fn with_settle_delay(driver: D, settle_delay: Duration) -> Self {
        Self {
            driver,
            state: NightmodeState::Disabled,
            settle_delay,
        }
    }

    /// Current latch state.
    pub fn state(&self) -> NightmodeState {
        self.state
    }

    /// Turn the backlight off.
    ///
    /// Acquires the device fresh each time, waits out the settle delay,
    /// then commands lights-out.
    pub async fn enable(&mut self) -> BacklightResult<()> {
        self.driver.init()?;
        tokio::time::sleep(self.settle_delay).await;
        self.driver.set_lighting(0, 0, 0)?;
        self.state = NightmodeState::Enabled;
        info!("Nightmode enabled");
        Ok(())
    }

    /// Return the backlight to its ambient default.
    pub fn disable(&mut self) -> BacklightResult<()> {
        self.driver.shutdown()?;
        self.state = NightmodeState::Disabled;
        info!("Nightmode disabled");
        Ok(())
    }

    /// Establish the baseline output state for a new session, regardless of
    /// what the previous session left behind. Equivalent to
    /// [`disable`](Self::disable).
    pub fn reset_default(&mut self) -> BacklightResult<()> {
        debug!("Resetting backlight to its default");
        self.disable()
    }
}
