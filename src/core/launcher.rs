//! # Launch demonstrations: run-to-completion vs. staggered start.
//!
//! Two ways of starting delayed operations on a cooperative scheduler:
//!
//! - [`run_to_completion`] awaits one task inline — nothing else starts
//!   until it finishes.
//! - [`run_staggered`] spawns two tasks back to back and joins both,
//!   reporting the order in which they actually finished.
//!
//! On a **current-thread** runtime the staggered pair exposes the classic
//! starvation hazard: if the first task opens with a non-yielding blocking
//! wait (see [`blocking_wait`]), the second task is not polled at all until
//! that wait returns — concurrency resumes only at the first suspension
//! point. Elapsed wall-clock time therefore reflects which segments truly
//! overlapped.
//!
//! ```text
//! spawn(blocker)   spawn(sprinter)   join
//!      │
//!      ├── blocking_wait(D)      ◄── holds the executor thread; sprinter starved
//!      ├── suspend(long)         ◄── first yield; sprinter finally polled
//!      │        ├── sprinter: suspend(short), finishes first
//!      └── blocker finishes last
//! ```

use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{RunError, TaskError};
use crate::tasks::TaskRef;

/// Completion record of a staggered launch.
#[derive(Debug)]
pub struct LaunchOutcome {
    /// Task names in the order they finished.
    pub order: Vec<String>,
    /// Wall-clock time from first spawn to last join.
    pub elapsed: Duration,
}

/// Awaits `task` inline and returns its elapsed wall-clock time.
///
/// Nothing else is started: the caller's next operation begins only after
/// `task` completed.
pub async fn run_to_completion(task: TaskRef) -> Result<Duration, TaskError> {
    let started = Instant::now();
    task.run(CancellationToken::new()).await?;
    Ok(started.elapsed())
}

/// Spawns `first` then `second` and joins both, recording completion order.
///
/// On a current-thread runtime, `first` is polled before `second`; a
/// non-yielding opening segment in `first` delays `second`'s start by its
/// full duration. Once both are suspended, whichever becomes ready first
/// resumes first.
pub async fn run_staggered(first: TaskRef, second: TaskRef) -> Result<LaunchOutcome, RunError> {
    let started = Instant::now();

    let mut set: JoinSet<(String, Result<(), TaskError>)> = JoinSet::new();
    for task in [first, second] {
        set.spawn(async move {
            let name = task.name().to_string();
            let res = task.run(CancellationToken::new()).await;
            (name, res)
        });
    }

    let mut order = Vec::with_capacity(2);
    let mut first_err: Option<RunError> = None;
    while let Some(res) = set.join_next().await {
        match res {
            Ok((name, Ok(()))) | Ok((name, Err(TaskError::Canceled))) => order.push(name),
            Ok((name, Err(e))) => {
                order.push(name.clone());
                if first_err.is_none() {
                    first_err = Some(RunError::Task {
                        task: name,
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
        None => Ok(LaunchOutcome {
            order,
            elapsed: started.elapsed(),
        }),
    }
}

/// A deliberately non-yielding wait.
///
/// **Starvation hazard, kept on purpose.** This holds the executor thread
/// for the full duration; on a current-thread runtime every sibling task is
/// starved until it returns. Real code should suspend with
/// `tokio::time::sleep` instead — this exists to make the hazard observable.
pub fn blocking_wait(duration: Duration) {
    std::thread::sleep(duration);
}
