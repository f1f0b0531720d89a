//! # Demo: bounded_poll
//!
//! A power meter is polled every 100 ms while the detector integrates a
//! one-second spectrum. When the exposure completes the scope cancels the
//! poller, its cleanup hook reports once, and only then does the call return.
//!
//! ## Flow
//! ```text
//! Poller("meter") ──► Scope::run_bounded_poll()
//!     ├─► PollStarted, PollCycle × ~5 (read 100ms + interval 100ms)
//!     │
//! bounded: detector.acquire(1s)
//!     └─ done ──► PollCancelRequested ──► root.cancel()
//!                     └─► cleanup hook ──► PollCleanedUp ──► PollTerminated
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example bounded_poll --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use labrig::{Bench, Config, LogWriter, Poller, Scope, Subscribe, TaskError, TaskFn, TaskRef};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::default();
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let scope = Scope::new(cfg, subs);

    // One station's instruments, wired to the scope's bus
    let bench = Bench::new("alice", &scope.cfg, scope.bus());
    let meter = Arc::new(bench.meter);
    let detector = Arc::new(bench.detector);

    // The repeating read: one meter sample per cycle
    let read: TaskRef = {
        let meter = meter.clone();
        TaskFn::arc("meter-read", move |_ctx: CancellationToken| {
            let meter = meter.clone();
            async move {
                meter.read().await;
                Ok::<(), TaskError>(())
            }
        })
    };
    let poller = Poller::with_defaults("alice-meter", read, &scope.cfg)
        .with_cleanup(|| println!("meter poll stopped: exposure finished"));

    // The bounded operation: a one-second exposure
    let exposure: TaskRef = {
        let detector = detector.clone();
        TaskFn::arc("spectrum", move |_ctx: CancellationToken| {
            let detector = detector.clone();
            async move {
                detector.acquire(Duration::from_secs(1)).await;
                Ok::<(), TaskError>(())
            }
        })
    };

    scope.run_bounded_poll(poller, exposure).await?;

    // Let the fan-out flush before exit
    tokio::time::sleep(Duration::from_millis(10)).await;
    Ok(())
}
