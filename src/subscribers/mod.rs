//! # Event subscribers for the rendergate runtime.
//!
//! This module provides the [`Subscribe`] trait and the [`SubscriberSet`]
//! fan-out used to dispatch events broadcast through the
//! [`Bus`](crate::events::Bus).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Session ── publish(Event) ──► Bus ──► Gate::subscriber_listener
//!                                              │
//!                                              ▼
//!                                        SubscriberSet::emit_arc
//!                                              │
//!                                    ┌─────────┼──────────┐
//!                                    ▼         ▼          ▼
//!                              ConsoleWriter  Metrics   Custom ...
//! ```
//!
//! ## Subscriber types
//! - **Passive subscribers** - observe and react to events (logging, metrics, alerts)
//! - **Stateful subscribers** - maintain counters or dashboards from the stream
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use rendergate::{Subscribe, Event, EventKind};
//! use async_trait::async_trait;
//!
//! struct MetricsSubscriber;
//!
//! #[async_trait]
//! impl Subscribe for MetricsSubscriber {
//!     async fn on_event(&self, event: &Event) {
//!         match event.kind {
//!             EventKind::VariantContaminated => {
//!                 // increment contamination counter
//!             }
//!             _ => {}
//!         }
//!     }
//! }
//! ```

mod set;
mod subscribe;

#[cfg(feature = "logging")]
mod embedded;

pub use set::SubscriberSet;
pub use subscribe::Subscribe;

#[cfg(feature = "logging")]
pub use embedded::ConsoleWriter;
