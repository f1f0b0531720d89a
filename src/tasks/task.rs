//! # Task abstraction.
//!
//! The [`Task`] trait is the crate's unit of awaitable work: the bounded
//! operation of a poll run, a single poll read, or a launch-demo operation.
//! A task receives a [`CancellationToken`] and should check it at its
//! suspension points to stop cooperatively.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;

/// Shared handle to a task (`Arc<dyn Task>`).
pub type TaskRef = Arc<dyn Task>;

/// Asynchronous, cancelable unit of work.
///
/// A `Task` has a stable [`name`](Task::name) and an async
/// [`run`](Task::run) method that receives a [`CancellationToken`].
/// Implementors should check cancellation at suspension points and return
/// [`TaskError::Canceled`] (or `Ok`) promptly when it fires.
///
/// # Example
/// ```
/// use tokio_util::sync::CancellationToken;
/// use async_trait::async_trait;
/// use labrig::{Task, TaskError};
///
/// struct Demo;
///
/// #[async_trait]
/// impl Task for Demo {
///     fn name(&self) -> &str { "demo" }
///
///     async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError> {
///         if ctx.is_cancelled() {
///             return Err(TaskError::Canceled);
///         }
///         // do work...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Task: Send + Sync + 'static {
    /// Returns a stable, human-readable task name.
    fn name(&self) -> &str;

    /// Executes the task until completion or cancellation.
    async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError>;
}
