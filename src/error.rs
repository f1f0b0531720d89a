//! Error types used by the labrig scope and tasks.
//!
//! Two enums cover the whole crate:
//!
//! - [`RunError`] — failures surfaced by a scope entry point.
//! - [`TaskError`] — failures raised by individual task executions.
//!
//! Cancellation is deliberately **not** a failure: [`TaskError::Canceled`] is
//! the designed termination path for an otherwise-infinite task (the poller),
//! and the scope treats it as a graceful exit.

use thiserror::Error;

/// Errors surfaced by [`Scope`](crate::Scope) entry points.
///
/// A scope never returns early on failure: it drains its join barrier first,
/// then reports the first error observed.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RunError {
    /// A task owned by the scope returned a genuine failure.
    #[error("task '{task}' failed: {source}")]
    Task {
        /// Name of the failing task.
        task: String,
        /// The underlying task error.
        #[source]
        source: TaskError,
    },

    /// A worker panicked; the panic was contained by the join barrier.
    #[error("worker panicked: {reason}")]
    Panicked {
        /// Stringified join failure.
        reason: String,
    },
}

/// Errors produced by task execution.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TaskError {
    /// Task execution failed.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Task observed cancellation at a suspension point and exited.
    ///
    /// This is a control-flow signal, not a fault: the scope maps it to a
    /// successful termination.
    #[error("cancelled at suspension point")]
    Canceled,
}
