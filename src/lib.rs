//! # labrig
//!
//! **labrig** orchestrates simulated laboratory instrument runs with
//! cooperative asynchronous concurrency on a single-threaded tokio runtime.
//!
//! Real measurement sessions spend most of their time waiting on hardware:
//! a monochromator settling on a grating, a detector integrating a spectrum,
//! a power meter sampling. labrig models every wait as a cooperative
//! suspension so that independent instrument chains interleave on one thread
//! of control, and wraps the coordination patterns those sessions need.
//!
//! ## Architecture
//! ```text
//!     ┌──────────────┐   ┌──────────────┐        ┌──────────────┐
//!     │   Pipeline   │   │   Pipeline   │        │    Poller    │
//!     │  ("alice")   │   │   ("bob")    │        │ (meter loop) │
//!     └──────┬───────┘   └──────┬───────┘        └──────┬───────┘
//!            ▼                  ▼                       ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Scope (supervisor)                                               │
//! │  - owns the Bus and the SubscriberSet                             │
//! │  - spawns one worker per pipeline / poller (JoinSet)              │
//! │  - hands each worker a child CancellationToken                    │
//! │  - does not return until every worker is terminal                 │
//! └──────────────────────────────┬────────────────────────────────────┘
//!                                ▼
//!                     Bus (broadcast channel)
//!                                ▼
//!                      scope event listener
//!                                ▼
//!                         SubscriberSet
//!                     ┌─────────┼─────────┐
//!                     ▼         ▼         ▼
//!                 Journal   LogWriter   custom
//! ```
//!
//! ## Coordination patterns
//! | Pattern              | Entry point                 | Guarantee                                          |
//! |----------------------|-----------------------------|----------------------------------------------------|
//! | Grouped pipelines    | [`Scope::run_group`]        | returns after every pipeline finished; group wall-clock ≈ longest pipeline |
//! | Bounded polling      | [`Scope::run_bounded_poll`] | poller cancelled when the bounded task completes; cleanup runs once before return |
//! | Launch demonstration | [`launcher`]                | run-to-completion vs. staggered start; blocking-wait starvation hazard |
//!
//! Cancellation is cooperative throughout: a [`CancellationToken`]
//! propagates from the scope to every owned worker and is observed only at
//! suspension points — a poll read is never preempted mid-flight.
//!
//! [`CancellationToken`]: tokio_util::sync::CancellationToken
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use labrig::{Config, Pipeline, Scope};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scope = Scope::new(Config::default(), Vec::new());
//!
//!     let alice = Pipeline::new("alice")
//!         .step(Duration::from_millis(20), "grating=300")
//!         .step(Duration::from_millis(10), "spectrum");
//!     let bob = Pipeline::new("bob")
//!         .step(Duration::from_millis(15), "grating=1200")
//!         .step(Duration::from_millis(25), "spectrum");
//!
//!     // Both stations proceed concurrently; each station's steps stay ordered.
//!     scope.run_group(vec![alice, bob]).await?;
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod devices;
mod error;
mod events;
mod pipeline;
mod subscribers;
mod tasks;

// ---- Public re-exports ----

pub use crate::core::{launcher, PollState, Poller, Scope};
pub use config::Config;
pub use devices::{Bench, Detector, Monochromator, PowerMeter};
pub use error::{RunError, TaskError};
pub use events::{Bus, Event, EventKind};
pub use pipeline::{Pipeline, Step};
pub use subscribers::{Journal, Subscribe, SubscriberSet};
pub use tasks::{Task, TaskFn, TaskRef};

// Optional: expose a simple built-in stdout subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
