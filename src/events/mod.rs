//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to runtime events emitted by sessions, the poll and
//! deadline drivers, the gate and subscriber workers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Gate`, `PollDriver`, `DeadlineDriver`, `SessionHandle`,
//!   `SubscriberSet` workers (overflow/panic).
//! - **Consumers**: `Gate::subscriber_listener()` (fans out to `SubscriberSet`)
//!   and any ad-hoc `Bus::subscribe()` receiver (tests, demos).
//!
//! See the crate-level docs for the system-level wiring diagram.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
