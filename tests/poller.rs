//! Cancellation semantics of `Scope::run_bounded_poll`.
//!
//! All tests run on the paused tokio clock.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use labrig::{
    Bench, Config, EventKind, Journal, PollState, Poller, RunError, Scope, Subscribe, TaskError,
    TaskFn,
};

fn scope_with_journal() -> (Scope, Arc<Journal>) {
    let journal = Arc::new(Journal::new());
    let subs: Vec<Arc<dyn Subscribe>> = vec![journal.clone()];
    (Scope::new(Config::default(), subs), journal)
}

async fn drain_fanout() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

#[tokio::test(start_paused = true)]
async fn cycles_track_the_bounded_window() {
    let (scope, _journal) = scope_with_journal();

    let reads = Arc::new(AtomicU32::new(0));
    let read = {
        let reads = reads.clone();
        TaskFn::arc("counter-read", move |_ctx: CancellationToken| {
            let reads = reads.clone();
            async move {
                reads.fetch_add(1, Ordering::Relaxed);
                Ok::<(), TaskError>(())
            }
        })
    };

    let cleanups = Arc::new(AtomicU32::new(0));
    let poller = {
        let cleanups = cleanups.clone();
        Poller::new("meter", Duration::from_millis(100), read)
            .with_cleanup(move || {
                cleanups.fetch_add(1, Ordering::Relaxed);
            })
    };

    let bounded = TaskFn::arc("exposure", |_ctx: CancellationToken| async {
        tokio::time::sleep(Duration::from_secs(1)).await;
        Ok::<(), TaskError>(())
    });

    scope.run_bounded_poll(poller, bounded).await.unwrap();

    // ~floor(1s / 100ms) cycles, within one interval of tolerance.
    let n = reads.load(Ordering::Relaxed);
    assert!((9..=11).contains(&n), "unexpected cycle count: {n}");
    assert_eq!(cleanups.load(Ordering::Relaxed), 1);
}

#[tokio::test(start_paused = true)]
async fn cleanup_runs_once_after_cancel_and_before_return() {
    let (scope, journal) = scope_with_journal();

    let read = TaskFn::arc("noop-read", |_ctx: CancellationToken| async { Ok::<(), TaskError>(()) });
    let poller = Poller::new("meter", Duration::from_millis(100), read);
    let mut state = poller.subscribe_state();

    let bounded = TaskFn::arc("exposure", |_ctx: CancellationToken| async {
        tokio::time::sleep(Duration::from_millis(350)).await;
        Ok::<(), TaskError>(())
    });

    scope.run_bounded_poll(poller, bounded).await.unwrap();

    // The join barrier released only after the poller acknowledged.
    assert_eq!(*state.borrow_and_update(), PollState::Terminated);

    drain_fanout().await;
    assert_eq!(journal.count(EventKind::PollCleanedUp).await, 1);
    assert_eq!(journal.count(EventKind::PollTerminated).await, 1);

    let requested = journal.first_seq(EventKind::PollCancelRequested).await.unwrap();
    let cleaned = journal.first_seq(EventKind::PollCleanedUp).await.unwrap();
    let terminated = journal.first_seq(EventKind::PollTerminated).await.unwrap();
    assert!(requested < cleaned, "cleanup preceded the cancel request");
    assert!(cleaned < terminated);

    // No read cycle after the cleanup ran.
    let last_cycle = journal.last_seq(EventKind::PollCycle).await.unwrap();
    assert!(last_cycle < cleaned);
}

#[tokio::test(start_paused = true)]
async fn meter_polling_during_an_exposure() {
    let (scope, journal) = scope_with_journal();
    let bench = Bench::new("alice", &scope.cfg, scope.bus());

    let meter = Arc::new(bench.meter);
    let read = {
        let meter = meter.clone();
        TaskFn::arc("meter-read", move |_ctx: CancellationToken| {
            let meter = meter.clone();
            async move {
                meter.read().await;
                Ok::<(), TaskError>(())
            }
        })
    };
    let poller = Poller::with_defaults("alice-meter", read, &scope.cfg);

    let detector = Arc::new(bench.detector);
    let bounded = {
        let detector = detector.clone();
        TaskFn::arc("spectrum", move |_ctx: CancellationToken| {
            let detector = detector.clone();
            async move {
                detector.acquire(Duration::from_secs(1)).await;
                Ok::<(), TaskError>(())
            }
        })
    };

    scope.run_bounded_poll(poller, bounded).await.unwrap();
    drain_fanout().await;

    // Each cycle costs read latency (100ms) + interval (100ms): ~5 in 1s.
    let cycles = journal.count(EventKind::PollCycle).await;
    assert!((4..=6).contains(&cycles), "unexpected cycle count: {cycles}");
    assert_eq!(journal.count(EventKind::Reading).await, cycles);
    assert_eq!(journal.count(EventKind::SpectrumAcquired).await, 1);

    // Readings carry plausible wattage.
    for ev in journal.snapshot().await {
        if ev.kind == EventKind::Reading {
            let watts = ev.reading.unwrap();
            assert!((7.5..8.5).contains(&watts), "reading out of band: {watts}");
        }
    }
}

#[tokio::test(start_paused = true)]
async fn in_flight_read_is_never_preempted() {
    let (scope, _journal) = scope_with_journal();

    // Read takes 300ms; the bounded task finishes at 250ms, mid-read.
    let finished_reads = Arc::new(AtomicU32::new(0));
    let read = {
        let finished_reads = finished_reads.clone();
        TaskFn::arc("slow-read", move |_ctx: CancellationToken| {
            let finished_reads = finished_reads.clone();
            async move {
                tokio::time::sleep(Duration::from_millis(300)).await;
                finished_reads.fetch_add(1, Ordering::Relaxed);
                Ok::<(), TaskError>(())
            }
        })
    };
    let poller = Poller::new("meter", Duration::from_millis(100), read);
    let mut state = poller.subscribe_state();

    let bounded = TaskFn::arc("exposure", |_ctx: CancellationToken| async {
        tokio::time::sleep(Duration::from_millis(250)).await;
        Ok::<(), TaskError>(())
    });

    scope.run_bounded_poll(poller, bounded).await.unwrap();

    // The read that was in flight at cancellation time ran to completion.
    assert_eq!(finished_reads.load(Ordering::Relaxed), 1);
    assert_eq!(*state.borrow_and_update(), PollState::Terminated);
}

#[tokio::test(start_paused = true)]
async fn failing_bounded_task_still_joins_the_poller() {
    let (scope, journal) = scope_with_journal();

    let cleanups = Arc::new(AtomicU32::new(0));
    let read = TaskFn::arc("noop-read", |_ctx: CancellationToken| async {
        Ok::<(), TaskError>(())
    });
    let poller = {
        let cleanups = cleanups.clone();
        Poller::new("meter", Duration::from_millis(100), read).with_cleanup(move || {
            cleanups.fetch_add(1, Ordering::Relaxed);
        })
    };
    let mut state = poller.subscribe_state();

    let bounded = TaskFn::arc("exposure", |_ctx: CancellationToken| async {
        tokio::time::sleep(Duration::from_millis(250)).await;
        Err::<(), TaskError>(TaskError::Fail {
            error: "shutter jammed".into(),
        })
    });

    let err = scope.run_bounded_poll(poller, bounded).await.unwrap_err();
    match err {
        RunError::Task { task, .. } => assert_eq!(task, "exposure"),
        other => panic!("unexpected error: {other}"),
    }

    // The failure did not skip the join barrier: the poller was cancelled,
    // ran its cleanup and terminated before the error surfaced.
    assert_eq!(*state.borrow_and_update(), PollState::Terminated);
    assert_eq!(cleanups.load(Ordering::Relaxed), 1);

    drain_fanout().await;
    assert_eq!(journal.count(EventKind::PollCleanedUp).await, 1);
    assert_eq!(journal.count(EventKind::PollTerminated).await, 1);
}

#[tokio::test(start_paused = true)]
async fn read_failure_terminates_the_poller_without_cleanup() {
    let (scope, journal) = scope_with_journal();

    let cleanups = Arc::new(AtomicU32::new(0));
    let read = TaskFn::arc("broken-read", |_ctx: CancellationToken| async {
        Err::<(), TaskError>(TaskError::Fail {
            error: "sensor unplugged".into(),
        })
    });
    let poller = {
        let cleanups = cleanups.clone();
        Poller::new("meter", Duration::from_millis(100), read).with_cleanup(move || {
            cleanups.fetch_add(1, Ordering::Relaxed);
        })
    };
    let mut state = poller.subscribe_state();

    let bounded = TaskFn::arc("exposure", |_ctx: CancellationToken| async {
        tokio::time::sleep(Duration::from_millis(250)).await;
        Ok::<(), TaskError>(())
    });

    let err = scope.run_bounded_poll(poller, bounded).await.unwrap_err();
    match err {
        RunError::Task { task, .. } => assert_eq!(task, "meter"),
        other => panic!("unexpected error: {other}"),
    }

    // A read failure is not cancellation: the cleanup hook stays unused and
    // no cleanup event is published, but the worker still reached Terminated
    // before the call returned.
    assert_eq!(cleanups.load(Ordering::Relaxed), 0);
    assert_eq!(*state.borrow_and_update(), PollState::Terminated);

    drain_fanout().await;
    assert_eq!(journal.count(EventKind::PollCleanedUp).await, 0);
    assert_eq!(journal.count(EventKind::PollTerminated).await, 1);
    assert_eq!(journal.count(EventKind::PollCycle).await, 0);
}
