//! # Run events emitted by the scope, workers and devices.
//!
//! [`EventKind`] classifies events across three categories:
//! - **Pipeline lifecycle**: step and pipeline progress inside `run_group`.
//! - **Poll lifecycle**: the poller's cycles and its cancellation path.
//! - **Device interactions**: observable side effects of the simulated
//!   instruments.
//!
//! The [`Event`] struct carries metadata such as timestamps, the source
//! (pipeline, poller or station name), step labels and meter readings.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. `seq` restores the exact publication order even when
//! events are examined after the fact.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of run events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Pipeline lifecycle ===
    /// A pipeline step is starting its cooperative delay.
    ///
    /// Sets: `source` (pipeline), `label`, `delay_ms`.
    StepStarting,

    /// A pipeline step's delay elapsed.
    ///
    /// Sets: `source` (pipeline), `label`.
    StepCompleted,

    /// A pipeline finished its last step.
    ///
    /// Sets: `source` (pipeline).
    PipelineCompleted,

    /// Every pipeline of a group reached a terminal state.
    GroupCompleted,

    // === Poll lifecycle ===
    /// The poller started its read loop.
    ///
    /// Sets: `source` (poller).
    PollStarted,

    /// One read cycle completed.
    ///
    /// Sets: `source` (poller), `cycle` (1-based).
    PollCycle,

    /// The scope requested cancellation of the poller.
    ///
    /// Sets: `source` (poller).
    PollCancelRequested,

    /// The poller observed cancellation and ran its cleanup hook.
    ///
    /// Sets: `source` (poller).
    PollCleanedUp,

    /// The poller worker exited; the scope may now return.
    ///
    /// Sets: `source` (poller).
    PollTerminated,

    // === Device interactions ===
    /// A monochromator settled on a new grating.
    ///
    /// Sets: `source` (station), `label` (e.g. `grating=300`).
    GratingSet,

    /// A detector finished integrating a spectrum.
    ///
    /// Sets: `source` (station), `delay_ms` (exposure).
    SpectrumAcquired,

    /// A power meter produced a sample.
    ///
    /// Sets: `source` (station), `reading` (watts).
    Reading,
}

/// Run event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - the remaining fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Pipeline, poller or station name, if applicable.
    pub source: Option<Arc<str>>,
    /// Step label or device parameter description.
    pub label: Option<Arc<str>>,
    /// Step delay or exposure in milliseconds (compact).
    pub delay_ms: Option<u32>,
    /// Poll cycle count (starting from 1).
    pub cycle: Option<u32>,
    /// Meter reading in watts.
    pub reading: Option<f64>,
}

impl Event {
    /// Creates an event of the given kind with the current timestamp and the
    /// next global sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            source: None,
            label: None,
            delay_ms: None,
            cycle: None,
            reading: None,
        }
    }

    /// Attaches the originating pipeline, poller or station name.
    #[inline]
    pub fn with_source(mut self, source: impl Into<Arc<str>>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attaches a step label.
    #[inline]
    pub fn with_label(mut self, label: impl Into<Arc<str>>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Attaches a delay duration (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.delay_ms = Some(ms);
        self
    }

    /// Attaches a poll cycle count.
    #[inline]
    pub fn with_cycle(mut self, n: u32) -> Self {
        self.cycle = Some(n);
        self
    }

    /// Attaches a meter reading.
    #[inline]
    pub fn with_reading(mut self, watts: f64) -> Self {
        self.reading = Some(watts);
        self
    }
}
