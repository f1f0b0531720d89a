//! Timing and ordering properties of `Scope::run_group`.
//!
//! All tests run on the paused tokio clock: delays are virtual, assertions
//! on elapsed time are exact.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use labrig::{Config, EventKind, Journal, Pipeline, Scope, Subscribe};

fn scope_with_journal() -> (Scope, Arc<Journal>) {
    let journal = Arc::new(Journal::new());
    let subs: Vec<Arc<dyn Subscribe>> = vec![journal.clone()];
    (Scope::new(Config::default(), subs), journal)
}

/// Lets the bus listener and subscriber workers drain queued events.
async fn drain_fanout() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

#[tokio::test(start_paused = true)]
async fn group_wall_clock_is_the_longest_pipeline() {
    let (scope, _journal) = scope_with_journal();

    let short = Pipeline::new("alice").step(Duration::from_secs(1), "a");
    let long = Pipeline::new("bob")
        .step(Duration::from_secs(2), "b")
        .step(Duration::from_secs(3), "b2");

    let started = Instant::now();
    scope.run_group(vec![short, long]).await.unwrap();
    let elapsed = started.elapsed();

    // max(1, 2 + 3) = 5, not 1 + 2 + 3 = 6.
    assert!(elapsed >= Duration::from_secs(5), "too fast: {elapsed:?}");
    assert!(
        elapsed < Duration::from_secs(6),
        "pipelines were serialized: {elapsed:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn steps_stay_ordered_within_a_pipeline() {
    let (scope, journal) = scope_with_journal();

    let pipeline = Pipeline::new("alice")
        .step(Duration::from_secs(2), "grating=300")
        .step(Duration::from_millis(100), "spectrum")
        .step(Duration::from_secs(2), "grating=1800");

    scope.run_group(vec![pipeline]).await.unwrap();
    drain_fanout().await;

    let events = journal.snapshot().await;
    let starts: Vec<_> = events
        .iter()
        .filter(|ev| ev.kind == EventKind::StepStarting)
        .collect();
    let labels: Vec<_> = starts.iter().map(|ev| ev.label.as_deref().unwrap()).collect();
    assert_eq!(labels, vec!["grating=300", "spectrum", "grating=1800"]);

    // Step k+1 starts only after step k completed.
    let completions: Vec<_> = events
        .iter()
        .filter(|ev| ev.kind == EventKind::StepCompleted)
        .collect();
    for (done, next) in completions.iter().zip(starts.iter().skip(1)) {
        assert!(
            done.seq < next.seq,
            "step started before its predecessor completed"
        );
    }

    // The pipeline terminal event comes after every step, the group terminal
    // event after every pipeline.
    let pipe_done = journal.first_seq(EventKind::PipelineCompleted).await.unwrap();
    let group_done = journal.first_seq(EventKind::GroupCompleted).await.unwrap();
    assert!(completions.iter().all(|ev| ev.seq < pipe_done));
    assert!(pipe_done < group_done);
}

#[tokio::test(start_paused = true)]
async fn pipelines_interleave_across_the_group() {
    let (scope, journal) = scope_with_journal();

    let alice = Pipeline::new("alice")
        .step(Duration::from_secs(2), "grating=300")
        .step(Duration::from_secs(5), "spectrum");
    let bob = Pipeline::new("bob")
        .step(Duration::from_secs(2), "grating=1200")
        .step(Duration::from_secs(1), "spectrum");

    scope.run_group(vec![alice, bob]).await.unwrap();
    drain_fanout().await;

    // Bob's pipeline finishes while Alice's is still mid-exposure.
    let events = journal.snapshot().await;
    let bob_done = events
        .iter()
        .find(|ev| {
            ev.kind == EventKind::PipelineCompleted && ev.source.as_deref() == Some("bob")
        })
        .expect("bob completed")
        .seq;
    let alice_last_step = events
        .iter()
        .find(|ev| {
            ev.kind == EventKind::StepCompleted
                && ev.source.as_deref() == Some("alice")
                && ev.label.as_deref() == Some("spectrum")
        })
        .expect("alice finished her exposure")
        .seq;
    assert!(bob_done < alice_last_step);

    assert_eq!(journal.count(EventKind::PipelineCompleted).await, 2);
    assert_eq!(journal.count(EventKind::GroupCompleted).await, 1);
}

#[tokio::test(start_paused = true)]
async fn empty_group_is_an_immediate_no_op() {
    let (scope, journal) = scope_with_journal();

    let started = Instant::now();
    scope.run_group(Vec::new()).await.unwrap();
    assert_eq!(started.elapsed(), Duration::ZERO);

    drain_fanout().await;
    assert!(journal.snapshot().await.is_empty(), "no events expected");
}

#[tokio::test(start_paused = true)]
async fn pipeline_without_steps_completes_immediately() {
    let (scope, journal) = scope_with_journal();

    let started = Instant::now();
    scope
        .run_group(vec![Pipeline::new("idle")])
        .await
        .unwrap();
    assert_eq!(started.elapsed(), Duration::ZERO);

    drain_fanout().await;
    assert_eq!(journal.count(EventKind::PipelineCompleted).await, 1);
    assert_eq!(journal.count(EventKind::StepStarting).await, 0);
}
