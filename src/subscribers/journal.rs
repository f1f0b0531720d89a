//! # Journal: event recorder.
//!
//! [`Journal`] keeps every observed [`Event`] in publication order. It is the
//! crate's instrument for asserting ordering and cardinality properties in
//! tests, and works equally as a post-run audit trail.
//!
//! ## Rules
//! - Events are appended in queue order (per-subscriber FIFO), which for a
//!   single scope listener equals global `seq` order.
//! - Reads (`snapshot`, `count`) are **eventually consistent** with respect
//!   to in-flight fan-out; drain the fan-out (yield) before asserting.

use tokio::sync::RwLock;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;
use async_trait::async_trait;

/// Thread-safe recorder of all observed events.
#[derive(Default)]
pub struct Journal {
    entries: RwLock<Vec<Event>>,
}

impl Journal {
    /// Creates an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all recorded events, in publication order.
    pub async fn snapshot(&self) -> Vec<Event> {
        self.entries.read().await.clone()
    }

    /// Returns how many events of the given kind were recorded.
    pub async fn count(&self, kind: EventKind) -> usize {
        self.entries
            .read()
            .await
            .iter()
            .filter(|ev| ev.kind == kind)
            .count()
    }

    /// Returns the sequence number of the first event of the given kind.
    pub async fn first_seq(&self, kind: EventKind) -> Option<u64> {
        self.entries
            .read()
            .await
            .iter()
            .find(|ev| ev.kind == kind)
            .map(|ev| ev.seq)
    }

    /// Returns the sequence number of the last event of the given kind.
    pub async fn last_seq(&self, kind: EventKind) -> Option<u64> {
        self.entries
            .read()
            .await
            .iter()
            .rev()
            .find(|ev| ev.kind == kind)
            .map(|ev| ev.seq)
    }
}

#[async_trait]
impl Subscribe for Journal {
    async fn on_event(&self, event: &Event) {
        self.entries.write().await.push(event.clone());
    }

    fn name(&self) -> &'static str {
        "Journal"
    }
}
