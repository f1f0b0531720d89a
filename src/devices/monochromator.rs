//! # Simulated monochromator.

use std::sync::Arc;
use std::time::Duration;

use tokio::time;

use crate::events::{Bus, Event, EventKind};

/// Grating selector for one station.
///
/// [`set_grating`](Monochromator::set_grating) suspends cooperatively for
/// the settle time, so sibling tasks keep running while the device "moves".
pub struct Monochromator {
    station: Arc<str>,
    settle: Duration,
    bus: Bus,
}

impl Monochromator {
    /// Creates a monochromator for `station` with the given settle time.
    pub fn new(station: impl Into<Arc<str>>, settle: Duration, bus: Bus) -> Self {
        Self {
            station: station.into(),
            settle,
            bus,
        }
    }

    /// Moves to the given grating (e.g. 300, 1200, 1800 lines/mm).
    ///
    /// Suspends for the configured settle time, then publishes
    /// [`EventKind::GratingSet`].
    pub async fn set_grating(&self, grating: u32) {
        time::sleep(self.settle).await;
        self.bus.publish(
            Event::now(EventKind::GratingSet)
                .with_source(self.station.clone())
                .with_label(format!("grating={grating}")),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_set_grating_publishes_after_settle() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let mchr = Monochromator::new("alice", Duration::from_secs(2), bus);

        let started = tokio::time::Instant::now();
        mchr.set_grating(300).await;
        assert!(started.elapsed() >= Duration::from_secs(2));

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::GratingSet);
        assert_eq!(ev.source.as_deref(), Some("alice"));
        assert_eq!(ev.label.as_deref(), Some("grating=300"));
    }
}
