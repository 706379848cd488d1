//! Driver seam for LED hardware backends.

use crate::error::BacklightResult;

/// Low-level lighting capability.
///
/// Object-safe so the binary can pick a backend at runtime.
///
/// Contract: `init` acquires the device and must tolerate repeated calls
/// without an intervening `shutdown` (the controller re-acquires on every
/// enable). `shutdown` releases the device back to its ambient default and
/// must succeed when the device was never acquired.
pub trait LedDriver: Send {
    /// Acquire the device.
    fn init(&mut self) -> BacklightResult<()>;

    /// Release the device, restoring its ambient default.
    fn shutdown(&mut self) -> BacklightResult<()>;

    /// Command an RGB color. Channels outside the device's range are scaled.
    fn set_lighting(&mut self, r: u8, g: u8, b: u8) -> BacklightResult<()>;
}

impl<T: LedDriver + ?Sized> LedDriver for Box<T> {
    fn init(&mut self) -> BacklightResult<()> {
        (**self).init()
    }

    fn shutdown(&mut self) -> BacklightResult<()> {
        (**self).shutdown()
    }

    fn set_lighting(&mut self, r: u8, g: u8, b: u8) -> BacklightResult<()> {
        (**self).set_lighting(r, g, b)
    }
}
