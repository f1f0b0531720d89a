//! # Pipeline: one ordered chain of timed steps.
//!
//! A [`Pipeline`] models the work of a single measurement station: a strict
//! sequence of [`Step`]s, each a cooperative delay with a label. Pipelines
//! carry no behavior of their own; the scope's driver walks the steps in
//! order, and independent pipelines overlap freely under
//! [`Scope::run_group`](crate::Scope::run_group).
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use labrig::Pipeline;
//!
//! let alice = Pipeline::new("alice")
//!     .step(Duration::from_secs(2), "grating=300")
//!     .step(Duration::from_millis(100), "spectrum")
//!     .step(Duration::from_secs(2), "grating=1800")
//!     .step(Duration::from_secs(5), "spectrum");
//!
//! assert_eq!(alice.len(), 4);
//! assert_eq!(alice.total_delay(), Duration::from_millis(9100));
//! ```

use std::borrow::Cow;
use std::time::Duration;

/// One timed step of a pipeline.
#[derive(Clone, Debug)]
pub struct Step {
    label: Cow<'static, str>,
    delay: Duration,
}

impl Step {
    /// Creates a step with the given delay and label.
    pub fn new(delay: Duration, label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            label: label.into(),
            delay,
        }
    }

    /// The step's label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The step's cooperative delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// A named, strictly ordered sequence of timed steps.
///
/// Step `k + 1` begins only after step `k`'s delay elapsed; the pipeline
/// completes when its last step's delay elapses. A pipeline without steps
/// completes immediately.
#[derive(Clone, Debug)]
pub struct Pipeline {
    name: Cow<'static, str>,
    steps: Vec<Step>,
}

impl Pipeline {
    /// Creates an empty pipeline with the given name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Appends a step (builder style).
    pub fn step(mut self, delay: Duration, label: impl Into<Cow<'static, str>>) -> Self {
        self.steps.push(Step::new(delay, label));
        self
    }

    /// The pipeline's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The steps, in execution order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True if the pipeline has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of all step delays.
    ///
    /// Under `run_group`, the group's wall-clock time is the **maximum** of
    /// this value over all pipelines, not the sum.
    pub fn total_delay(&self) -> Duration {
        self.steps.iter().map(Step::delay).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_step_order() {
        let p = Pipeline::new("alice")
            .step(Duration::from_secs(2), "grating=300")
            .step(Duration::from_millis(100), "spectrum");

        let labels: Vec<&str> = p.steps().iter().map(Step::label).collect();
        assert_eq!(labels, vec!["grating=300", "spectrum"]);
    }

    #[test]
    fn test_total_delay_sums_steps() {
        let p = Pipeline::new("bob")
            .step(Duration::from_secs(2), "a")
            .step(Duration::from_secs(3), "b");
        assert_eq!(p.total_delay(), Duration::from_secs(5));
    }

    #[test]
    fn test_empty_pipeline() {
        let p = Pipeline::new("idle");
        assert!(p.is_empty());
        assert_eq!(p.len(), 0);
        assert_eq!(p.total_delay(), Duration::ZERO);
    }
}
