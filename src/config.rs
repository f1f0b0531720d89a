//! # Global scope configuration.
//!
//! Provides [`Config`] — centralized settings for a [`Scope`](crate::Scope)
//! and the simulated devices built around it.
//!
//! Config is used in two ways:
//! 1. **Scope creation**: `Scope::new(config, subscribers)`
//! 2. **Defaults**: `Poller::with_defaults(name, read, &config)` and
//!    `Bench::new(station, &config, bus)`

use std::time::Duration;

/// Global configuration for a scope and its simulated bench.
///
/// ## Field semantics
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by the Bus)
/// - `settle`: monochromator grating settle time
/// - `read_latency`: power meter sampling latency
/// - `poll_interval`: default suspension between poll read cycles
#[derive(Clone, Debug)]
pub struct Config {
    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Slow subscribers that lag behind more than `bus_capacity` events
    /// receive `Lagged` and skip older items. Minimum value is 1.
    pub bus_capacity: usize,

    /// Time a monochromator takes to settle on a new grating.
    ///
    /// The simulated stand-in for the ~20 s a real device needs.
    pub settle: Duration,

    /// Time a power meter takes to produce one sample.
    pub read_latency: Duration,

    /// Default suspension between poll read cycles.
    ///
    /// Used by `Poller::with_defaults`; can be overridden per poller.
    pub poll_interval: Duration,
}

impl Config {
    /// Returns the bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `bus_capacity = 1024` (good baseline)
    /// - `settle = 2s` (simulated grating change)
    /// - `read_latency = 100ms` (simulated meter sample)
    /// - `poll_interval = 100ms`
    fn default() -> Self {
        Self {
            bus_capacity: 1024,
            settle: Duration::from_secs(2),
            read_latency: Duration::from_millis(100),
            poll_interval: Duration::from_millis(100),
        }
    }
}
