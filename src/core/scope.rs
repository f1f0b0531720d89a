//! # Scope: supervises concurrent workers and fan-out delivery.
//!
//! The [`Scope`] owns the event bus, a [`SubscriberSet`], and the global
//! configuration. Each entry point spawns its workers into a `JoinSet`,
//! hands every worker a child [`CancellationToken`], and drains the set
//! before returning — the join barrier.
//!
//! ## High-level wiring
//! ```text
//! run_group(pipelines):
//!   Pipeline[0]   Pipeline[1]  ...  Pipeline[N-1]
//!       │             │                  │
//!       └──► driver::drive(p, bus, root.child_token())     (one per pipeline)
//!                     │
//!                     └──► JoinSet ──► drain (join barrier) ──► GroupCompleted
//!
//! run_bounded_poll(poller, bounded):
//!   JoinSet ◄── poller.run(root.child_token(), bus)
//!   bounded.run(root.child_token())  (awaited inline)
//!       └─ done ──► publish PollCancelRequested ──► root.cancel()
//!                        └──► drain JoinSet (poller acknowledges) ──► return
//!
//! Event flow:
//!   workers/devices ── publish(Event) ──► Bus ──► scope listener ──► SubscriberSet::emit
//! ```
//!
//! ## Rules
//! - Neither entry point returns before every owned worker is terminal
//!   (completed or cancelled-and-acknowledged).
//! - `TaskError::Canceled` from a worker is a graceful exit, not a failure.
//! - Worker panics are contained by the join barrier and reported as
//!   [`RunError::Panicked`] — after all workers joined.

use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::core::{driver, poller::Poller};
use crate::error::{RunError, TaskError};
use crate::events::{Bus, Event, EventKind};
use crate::pipeline::Pipeline;
use crate::subscribers::{Subscribe, SubscriberSet};
use crate::tasks::TaskRef;

/// Supervises concurrent pipeline and poller workers; owns event delivery.
pub struct Scope {
    /// Global configuration.
    pub cfg: Config,
    /// Event bus shared with all workers and devices.
    pub bus: Bus,
    subs: Arc<SubscriberSet>,
}

impl Scope {
    /// Creates a scope with the given config and subscribers.
    ///
    /// Must be called within a tokio runtime: the scope spawns its event
    /// listener and one worker per subscriber.
    pub fn new(cfg: Config, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        let subs = Arc::new(SubscriberSet::new(subscribers));

        let scope = Self { cfg, bus, subs };
        scope.spawn_listener();
        scope
    }

    /// Returns a clone of the bus, for wiring devices to this scope.
    pub fn bus(&self) -> Bus {
        self.bus.clone()
    }

    /// Subscribes to the bus and forwards events to the subscriber set.
    ///
    /// Lagged receivers skip missed items and keep going; the listener exits
    /// when the last bus sender is dropped.
    fn spawn_listener(&self) {
        if self.subs.is_empty() {
            return;
        }
        let mut rx = self.bus.subscribe();
        let set = Arc::clone(&self.subs);
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(ev) => set.emit(&ev),
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }

    /// Runs all `pipelines` concurrently; returns once every pipeline
    /// finished all of its steps.
    ///
    /// Within a pipeline, steps stay strictly ordered; across pipelines the
    /// scheduler interleaves freely, so the group's wall-clock time is the
    /// **maximum** of the pipelines' total delays, not their sum.
    ///
    /// An empty pipeline list is a no-op that returns immediately, with no
    /// events published.
    pub async fn run_group(&self, pipelines: Vec<Pipeline>) -> Result<(), RunError> {
        if pipelines.is_empty() {
            return Ok(());
        }

        let root = CancellationToken::new();
        let mut set = JoinSet::new();
        for pipeline in pipelines {
            set.spawn(driver::drive(pipeline, self.bus.clone(), root.child_token()));
        }

        let mut first_err: Option<RunError> = None;
        while let Some(res) = set.join_next().await {
            if let Err(join_err) = res {
                if first_err.is_none() {
                    first_err = Some(RunError::Panicked {
                        reason: join_err.to_string(),
                    });
                }
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => {
                self.bus.publish(Event::now(EventKind::GroupCompleted));
                Ok(())
            }
        }
    }

    /// Runs `poller` alongside `bounded` until the bounded task completes,
    /// then cancels the poller and waits for its acknowledgment.
    ///
    /// ### Flow
    /// 1. Spawn the poller with a child token.
    /// 2. Await `bounded` inline under the same root token.
    /// 3. Publish `PollCancelRequested`, cancel the root token.
    /// 4. Drain the join barrier: the call returns only after the poller ran
    ///    its cleanup and reached `Terminated`.
    ///
    /// Cancellation is the poller's designed termination path, so its
    /// `Canceled` exit maps to `Ok`. A failing bounded task still cancels
    /// and joins the poller; the failure is returned afterwards.
    pub async fn run_bounded_poll(&self, poller: Poller, bounded: TaskRef) -> Result<(), RunError> {
        let root = CancellationToken::new();
        let poller_name = poller.name().to_string();

        let mut set = JoinSet::new();
        set.spawn(poller.run(root.child_token(), self.bus.clone()));

        let bounded_res = bounded.run(root.child_token()).await;

        self.bus.publish(
            Event::now(EventKind::PollCancelRequested).with_source(poller_name.as_str()),
        );
        root.cancel();

        let mut first_err = match bounded_res {
            Ok(()) | Err(TaskError::Canceled) => None,
            Err(e) => Some(RunError::Task {
                task: bounded.name().to_string(),
                source: e,
            }),
        };

        while let Some(res) = set.join_next().await {
            match res {
                Ok(Ok(())) | Ok(Err(TaskError::Canceled)) => {}
                Ok(Err(e)) => {
                    if first_err.is_none() {
                        first_err = Some(RunError::Task {
                            task: poller_name.clone(),
                            source: e,
                        });
                    }
                }
                Err(join_err) => {
                    if first_err.is_none() {
                        first_err = Some(RunError::Panicked {
                            reason: join_err.to_string(),
                        });
                    }
                }
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
