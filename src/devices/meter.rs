//! # Simulated power meter.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::time;

use crate::events::{Bus, Event, EventKind};

/// Power meter for one station.
///
/// [`read`](PowerMeter::read) is the natural read operation for a
/// [`Poller`](crate::Poller): short, suspending, repeatable.
pub struct PowerMeter {
    station: Arc<str>,
    latency: Duration,
    bus: Bus,
}

impl PowerMeter {
    /// Creates a power meter for `station` with the given sampling latency.
    pub fn new(station: impl Into<Arc<str>>, latency: Duration, bus: Bus) -> Self {
        Self {
            station: station.into(),
            latency,
            bus,
        }
    }

    /// Samples the current power.
    ///
    /// Suspends for the sampling latency, publishes [`EventKind::Reading`]
    /// and returns the value: `7.5` W plus up to one watt of simulated noise.
    pub async fn read(&self) -> f64 {
        time::sleep(self.latency).await;
        let watts = 7.5 + rand::rng().random_range(0.0..1.0);
        self.bus.publish(
            Event::now(EventKind::Reading)
                .with_source(self.station.clone())
                .with_reading(watts),
        );
        watts
    }
}
