//! # Demo: measurement_group
//!
//! Two measurement stations run their grating/exposure chains concurrently
//! under one scope. Each station's steps stay strictly ordered; the group
//! finishes when the slower station does.
//!
//! ## Flow
//! ```text
//! Pipeline("alice") ─┐
//! Pipeline("bob")  ──┼──► Scope::run_group()
//!                    │        ├─► driver per pipeline (child token)
//!                    │        ├─► StepStarting / StepCompleted events
//!                    │        └─► join barrier ──► GroupCompleted
//!                    └──► Bus ──► LogWriter (stdout)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example measurement_group --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use labrig::{Config, LogWriter, Pipeline, Scope, Subscribe};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Default config; the step delays below are explicit anyway
    let cfg = Config::default();

    // 2. Print every event as it happens
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let scope = Scope::new(cfg, subs);

    // 3. Each station: settle on a grating, expose, settle again, expose
    let alice = Pipeline::new("alice")
        .step(Duration::from_secs(2), "grating=300")
        .step(Duration::from_millis(100), "spectrum")
        .step(Duration::from_secs(2), "grating=1800")
        .step(Duration::from_secs(5), "spectrum");
    let bob = Pipeline::new("bob")
        .step(Duration::from_secs(2), "grating=1200")
        .step(Duration::from_secs(1), "spectrum");

    // 4. ~9.1s wall clock (alice's total), not ~12.1s (the sum)
    let started = std::time::Instant::now();
    scope.run_group(vec![alice, bob]).await?;
    println!("group finished in {:?}", started.elapsed());

    // Let the fan-out flush before exit
    tokio::time::sleep(Duration::from_millis(10)).await;
    Ok(())
}
