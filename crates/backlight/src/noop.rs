//! No-op LED backend for hosts without a supported device.

use crate::driver::LedDriver;
use crate::error::BacklightResult;
use tracing::debug;

/// Driver that accepts every command and touches no hardware.
#[derive(Debug, Default)]
pub struct NoopLed;

impl NoopLed {
    pub fn new() -> Self {
        Self
    }
}

impl LedDriver for NoopLed {
    fn init(&mut self) -> BacklightResult<()> {
        debug!("noop LED init");
        Ok(())
    }

    fn shutdown(&mut self) -> BacklightResult<()> {
        debug!("noop LED shutdown");
        Ok(())
    }

    fn set_lighting(&mut self, r: u8, g: u8, b: u8) -> BacklightResult<()> {
        debug!(r, g, b, "noop LED set_lighting");
        Ok(())
    }
}
