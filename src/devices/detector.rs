//! # Simulated spectrum detector.

use std::sync::Arc;
use std::time::Duration;

use tokio::time;

use crate::events::{Bus, Event, EventKind};

/// Spectrum camera for one station.
pub struct Detector {
    station: Arc<str>,
    bus: Bus,
}

impl Detector {
    /// Creates a detector for `station`.
    pub fn new(station: impl Into<Arc<str>>, bus: Bus) -> Self {
        Self {
            station: station.into(),
            bus,
        }
    }

    /// Integrates a spectrum for `exposure`.
    ///
    /// Suspends for the full exposure, then publishes
    /// [`EventKind::SpectrumAcquired`]. The suspension is cooperative: this
    /// is the long-running bounded operation a poller typically runs
    /// alongside.
    pub async fn acquire(&self, exposure: Duration) {
        time::sleep(exposure).await;
        self.bus.publish(
            Event::now(EventKind::SpectrumAcquired)
                .with_source(self.station.clone())
                .with_delay(exposure),
        );
    }
}
