//! Simulated laboratory instruments.
//!
//! Each device exposes one awaitable operation whose duration stands in for
//! real hardware I/O, and publishes the interaction to the
//! [`Bus`](crate::events::Bus) so it stays observable:
//!
//! - [`Monochromator::set_grating`] — suspends for the configured settle time
//! - [`Detector::acquire`] — suspends for the requested exposure
//! - [`PowerMeter::read`] — suspends for the read latency, yields a sample
//!
//! [`Bench`] bundles the three devices of one measurement station.

mod detector;
mod meter;
mod monochromator;

pub use detector::Detector;
pub use meter::PowerMeter;
pub use monochromator::Monochromator;

use crate::config::Config;
use crate::events::Bus;

/// The instruments of one measurement station.
pub struct Bench {
    /// Grating selector.
    pub monochromator: Monochromator,
    /// Spectrum camera.
    pub detector: Detector,
    /// Power meter.
    pub meter: PowerMeter,
}

impl Bench {
    /// Builds all three devices for `station`, wired to the same bus.
    pub fn new(station: &str, cfg: &Config, bus: Bus) -> Self {
        Self {
            monochromator: Monochromator::new(station, cfg.settle, bus.clone()),
            detector: Detector::new(station, bus.clone()),
            meter: PowerMeter::new(station, cfg.read_latency, bus),
        }
    }
}
