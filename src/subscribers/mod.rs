//! # Event subscribers for the labrig scope.
//!
//! Subscribers observe the events broadcast through the
//! [`Bus`](crate::events::Bus) without ever blocking the publishers.
//!
//! ## Architecture
//! ```text
//!   Scope listener ── emit(&Event) ──► SubscriberSet
//!                                          │  (Arc-clone per subscriber)
//!                                          ├──► [queue S1] ─► worker S1 ─► on_event()
//!                                          ├──► [queue S2] ─► worker S2 ─► on_event()
//!                                          └──► [queue SN] ─► worker SN ─► on_event()
//! ```
//!
//! ## Contents
//! - [`Subscribe`] — the extension point for custom handlers
//! - [`SubscriberSet`] — non-blocking fan-out with per-subscriber queues
//! - [`Journal`] — stateful recorder, the crate's test instrument
//! - [`LogWriter`] — stdout printer (feature `logging`)

mod journal;
mod set;
mod subscribe;

#[cfg(feature = "logging")]
mod log;

pub use journal::Journal;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
