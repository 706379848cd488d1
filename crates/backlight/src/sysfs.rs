//! Sysfs LED class backend.
//!
//! Drives one `/sys/class/leds/<name>/` directory: `brightness` is the
//! control file, `max_brightness` the device range.

use crate::driver::LedDriver;
use crate::error::{BacklightError, BacklightResult};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// LED backend over a sysfs LED class directory.
pub struct SysfsLed {
    dir: PathBuf,
    max_brightness: u32,
    /// Brightness captured by the first `init`, restored on `shutdown`.
    /// Kept across repeated `init` calls so re-enabling nightmode never
    /// captures the zero this driver wrote itself.
    saved: Option<u32>,
}

impl SysfsLed {
    /// Create a driver for the LED class directory at `dir`.
    ///
    /// The directory is not touched until `init`; a missing or bogus device
    /// surfaces as an error at first use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            max_brightness: 0,
            saved: None,
        }
    }

    fn read_value(&self, file: &str) -> BacklightResult<u32> {
        let path = self.dir.join(file);
        let text = fs::read_to_string(&path)?;
        text.trim().parse().map_err(|_| {
            BacklightError::Malformed(format!("{}: {:?}", path.display(), text.trim()))
        })
    }

    fn write_brightness(&self, value: u32) -> BacklightResult<()> {
        fs::write(self.dir.join("brightness"), value.to_string())?;
        Ok(())
    }
}

impl LedDriver for SysfsLed {
    fn init(&mut self) -> BacklightResult<()> {
        self.max_brightness = self.read_value("max_brightness")?;
        let current = self.read_value("brightness")?;
        if self.saved.is_none() {
            self.saved = Some(current);
            debug!(
                dir = %self.dir.display(),
                brightness = current,
                max_brightness = self.max_brightness,
                "Saved ambient brightness"
            );
        }
        Ok(())
    }

    fn shutdown(&mut self) -> BacklightResult<()> {
        if let Some(saved) = self.saved.take() {
            self.write_brightness(saved)?;
            debug!(dir = %self.dir.display(), brightness = saved, "Restored ambient brightness");
        }
        Ok(())
    }

    fn set_lighting(&mut self, r: u8, g: u8, b: u8) -> BacklightResult<()> {
        // Single-channel device: the brightest requested channel wins.
        let channel = u64::from(r.max(g).max(b));
        let scaled = channel * u64::from(self.max_brightness) / 255;
        self.write_brightness(scaled as u32)
    }
}

impl Drop for SysfsLed {
    fn drop(&mut self) {
        // Best effort: a dying process should not leave the keyboard dark.
        if let Some(saved) = self.saved.take() {
            if let Err(e) = self.write_brightness(saved) {
                warn!(dir = %self.dir.display(), error = %e, "Could not restore brightness");
            }
        }
    }
}
