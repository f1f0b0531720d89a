//! Scope core: orchestration and lifecycle.
//!
//! The public API from this module is [`Scope`], which runs pipeline groups
//! and bounded polls, plus the [`Poller`] construct and the [`launcher`]
//! demonstration module.
//!
//! Internal modules:
//! - [`scope`]: owns bus and fan-out, spawns workers, drains the join barrier;
//! - [`driver`]: walks one pipeline's steps with cancellable sleeps;
//! - [`poller`]: the repeating read task and its cancellation state machine;
//! - [`launcher`]: run-to-completion and staggered-start demonstrations.

mod driver;
mod poller;
mod scope;

pub mod launcher;

pub use poller::{PollState, Poller};
pub use scope::Scope;
