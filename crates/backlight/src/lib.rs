//! Keyboard backlight control.
//!
//! The protocol side of nightwatch decides *when* the backlight should
//! change; this crate owns *how*. [`NightmodeController`] holds the on/off
//! latch and the settle delay, and drives an [`LedDriver`] backend: sysfs on
//! Linux hosts exposing an LED class device, a no-op driver everywhere else.

pub mod controller;
pub mod driver;
pub mod error;
pub mod noop;
pub mod sysfs;

pub use controller::{NightmodeController, NightmodeState, DEFAULT_SETTLE_DELAY};
pub use driver::LedDriver;
pub use error::{BacklightError, BacklightResult};
pub use noop::NoopLed;
pub use sysfs::SysfsLed;
