//! # Poller: a repeating read task bounded only by cancellation.
//!
//! A [`Poller`] repeats `{ run read task, suspend for the poll interval }`
//! with no natural termination; its only terminal path is external
//! cancellation, delivered through the scope's [`CancellationToken`] and
//! observed at the poller's next suspension point — never mid-read.
//!
//! ## State machine
//! ```text
//! Running ──(cancellation observed at a suspension point)──► CancelPending
//!    CancelPending ──► Cancelled  (cleanup hook runs, exactly once)
//!       Cancelled ──► Terminated  (worker exits; the scope may return)
//! ```
//!
//! State transitions are observable through a `tokio::sync::watch` channel
//! ([`Poller::subscribe_state`]) and mirrored on the bus as
//! `PollCleanedUp` / `PollTerminated` events. The watch channel is
//! last-value-wins; the bus events carry the intermediate steps.
//!
//! ## Rules
//! - Cancellation is cooperative: an in-flight read always finishes.
//! - The cleanup hook runs exactly once, on the cancellation path only.
//! - The poller exits with [`TaskError::Canceled`], which the scope treats
//!   as the designed (graceful) termination.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::TaskError;
use crate::events::{Bus, Event, EventKind};
use crate::tasks::TaskRef;

/// Lifecycle of a poller worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// Read/suspend loop in progress.
    Running,
    /// Cancellation observed at a suspension point; cleanup not yet run.
    CancelPending,
    /// Cleanup hook completed.
    Cancelled,
    /// Worker exited; the owning scope's join barrier can release.
    Terminated,
}

/// A repeating read task with an interval, a once-only cleanup hook, and an
/// observable [`PollState`].
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use tokio_util::sync::CancellationToken;
/// use labrig::{Poller, TaskError, TaskFn};
///
/// let read = TaskFn::arc("meter-read", |_ctx: CancellationToken| async {
///     Ok::<(), TaskError>(())
/// });
/// let poller = Poller::new("meter", Duration::from_millis(100), read)
///     .with_cleanup(|| println!("poll stopped: spectrum finished"));
/// assert_eq!(poller.name(), "meter");
/// ```
pub struct Poller {
    name: Cow<'static, str>,
    interval: Duration,
    read: TaskRef,
    cleanup: Option<Arc<dyn Fn() + Send + Sync>>,
    state_tx: watch::Sender<PollState>,
}

impl Poller {
    /// Creates a poller that runs `read` every `interval`.
    pub fn new(name: impl Into<Cow<'static, str>>, interval: Duration, read: TaskRef) -> Self {
        let (state_tx, _) = watch::channel(PollState::Running);
        Self {
            name: name.into(),
            interval,
            read,
            cleanup: None,
            state_tx,
        }
    }

    /// Creates a poller inheriting the interval from global config.
    pub fn with_defaults(name: impl Into<Cow<'static, str>>, read: TaskRef, cfg: &Config) -> Self {
        Self::new(name, cfg.poll_interval, read)
    }

    /// Installs the cleanup hook, run exactly once when cancellation is
    /// observed.
    pub fn with_cleanup(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.cleanup = Some(Arc::new(f));
        self
    }

    /// The poller's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a watcher over the poller's [`PollState`].
    ///
    /// Subscribe before handing the poller to the scope; after
    /// `run_bounded_poll` returns the watcher reads [`PollState::Terminated`].
    ///
    /// The channel is last-value-wins: the cancellation-path transitions
    /// (`CancelPending` → `Cancelled` → `Terminated`) happen with no
    /// suspension between them, so a watcher that is not polled in between
    /// only sees the final state. The intermediate states are mirrored on
    /// the bus (`PollCleanedUp`, `PollTerminated`) for observers that need
    /// the full sequence.
    pub fn subscribe_state(&self) -> watch::Receiver<PollState> {
        self.state_tx.subscribe()
    }

    /// Runs the read/suspend loop until cancellation.
    ///
    /// ### Flow
    /// 1. Publish `PollStarted`.
    /// 2. Loop: run the read task (non-preemptible), publish `PollCycle`,
    ///    then suspend for the interval — the suspension doubles as the
    ///    cancellation point.
    /// 3. On observation: `CancelPending` → run cleanup → `Cancelled` →
    ///    publish `PollCleanedUp` → `Terminated` → publish `PollTerminated`.
    ///
    /// A read failure (other than `Canceled`) terminates the worker without
    /// cleanup; cleanup belongs to the cancellation path only.
    pub(crate) async fn run(self, token: CancellationToken, bus: Bus) -> Result<(), TaskError> {
        let name: Arc<str> = Arc::from(self.name.as_ref());
        let mut cycle: u32 = 0;

        bus.publish(Event::now(EventKind::PollStarted).with_source(name.clone()));

        loop {
            if token.is_cancelled() {
                break;
            }

            match self.read.run(token.child_token()).await {
                Ok(()) => {
                    cycle += 1;
                    bus.publish(
                        Event::now(EventKind::PollCycle)
                            .with_source(name.clone())
                            .with_cycle(cycle),
                    );
                }
                Err(TaskError::Canceled) => break,
                Err(e) => {
                    self.state_tx.send_replace(PollState::Terminated);
                    bus.publish(Event::now(EventKind::PollTerminated).with_source(name.clone()));
                    return Err(e);
                }
            }

            let sleep = time::sleep(self.interval);
            tokio::pin!(sleep);
            select! {
                _ = &mut sleep => {}
                _ = token.cancelled() => break,
            }
        }

        self.state_tx.send_replace(PollState::CancelPending);
        if let Some(cleanup) = &self.cleanup {
            cleanup();
        }
        self.state_tx.send_replace(PollState::Cancelled);
        bus.publish(Event::now(EventKind::PollCleanedUp).with_source(name.clone()));

        self.state_tx.send_replace(PollState::Terminated);
        bus.publish(Event::now(EventKind::PollTerminated).with_source(name));

        Err(TaskError::Canceled)
    }
}
