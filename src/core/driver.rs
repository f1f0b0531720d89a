//! # Pipeline driver: walks one pipeline's steps in order.
//!
//! One driver runs per pipeline under [`Scope::run_group`](crate::Scope::run_group).
//! Each step is a cancellable cooperative sleep bracketed by events:
//!
//! ```text
//! StepStarting → [sleep(delay)] → StepCompleted → (next step)
//!                      │
//!                      └─ token cancelled → return (no further steps)
//! ```
//!
//! ## Rules
//! - Steps run **strictly in order** within one pipeline; step `k + 1` starts
//!   only after step `k`'s delay elapsed.
//! - Cancellation is checked at safe points only: the loop top and during
//!   the step sleep.
//! - A pipeline with no steps publishes `PipelineCompleted` immediately.

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::events::{Bus, Event, EventKind};
use crate::pipeline::Pipeline;

/// Runs all steps of `pipeline`, publishing progress to `bus`.
///
/// Returns early (without `PipelineCompleted`) if `token` fires.
pub(crate) async fn drive(pipeline: Pipeline, bus: Bus, token: CancellationToken) {
    let name = pipeline.name().to_string();

    for step in pipeline.steps() {
        if token.is_cancelled() {
            return;
        }

        bus.publish(
            Event::now(EventKind::StepStarting)
                .with_source(name.as_str())
                .with_label(step.label())
                .with_delay(step.delay()),
        );

        let sleep = time::sleep(step.delay());
        tokio::pin!(sleep);
        select! {
            _ = &mut sleep => {}
            _ = token.cancelled() => {
                return;
            }
        }

        bus.publish(
            Event::now(EventKind::StepCompleted)
                .with_source(name.as_str())
                .with_label(step.label()),
        );
    }

    bus.publish(Event::now(EventKind::PipelineCompleted).with_source(name.as_str()));
}
