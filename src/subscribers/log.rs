//! # LogWriter — simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for demos or debugging.
//!
//! ## Example output
//! ```text
//! [step-starting] pipeline="alice" label="grating=300" delay=2000ms
//! [step-completed] pipeline="alice" label="grating=300"
//! [pipeline-completed] pipeline="alice"
//! [poll-cycle] poller="meter" cycle=7
//! [reading] station="alice" watts=7.93
//! [poll-cancel-requested] poller="meter"
//! [poll-cleaned-up] poller="meter"
//! [poll-terminated] poller="meter"
//! [group-completed]
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Constructs a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::StepStarting => {
                println!(
                    "[step-starting] pipeline={:?} label={:?} delay={:?}ms",
                    e.source, e.label, e.delay_ms
                );
            }
            EventKind::StepCompleted => {
                println!("[step-completed] pipeline={:?} label={:?}", e.source, e.label);
            }
            EventKind::PipelineCompleted => {
                println!("[pipeline-completed] pipeline={:?}", e.source);
            }
            EventKind::GroupCompleted => {
                println!("[group-completed]");
            }
            EventKind::PollStarted => {
                println!("[poll-started] poller={:?}", e.source);
            }
            EventKind::PollCycle => {
                println!("[poll-cycle] poller={:?} cycle={:?}", e.source, e.cycle);
            }
            EventKind::PollCancelRequested => {
                println!("[poll-cancel-requested] poller={:?}", e.source);
            }
            EventKind::PollCleanedUp => {
                println!("[poll-cleaned-up] poller={:?}", e.source);
            }
            EventKind::PollTerminated => {
                println!("[poll-terminated] poller={:?}", e.source);
            }
            EventKind::GratingSet => {
                println!("[grating-set] station={:?} label={:?}", e.source, e.label);
            }
            EventKind::SpectrumAcquired => {
                println!(
                    "[spectrum-acquired] station={:?} exposure={:?}ms",
                    e.source, e.delay_ms
                );
            }
            EventKind::Reading => {
                println!("[reading] station={:?} watts={:?}", e.source, e.reading);
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
