//! # Runtime events emitted by sessions and the gate.
//!
//! The [`EventKind`] enum classifies event types across two categories:
//! - **Session events**: one waiting episode's flow (registered, condition
//!   met, applied, contaminated, timeout, cancelled)
//! - **Subscriber events**: fan-out infrastructure reports (overflow, panic)
//!
//! The [`Event`] struct carries additional metadata such as timestamps, the
//! variant label, condition identities, reasons, and failure details.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use rendergate::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::SelectorTimeout)
//!     .with_variant("hero-1")
//!     .with_reason("Selectors not found or other error thrown: #missing; Variant: hero-1")
//!     .with_timeout(Duration::from_millis(300));
//!
//! assert_eq!(ev.kind, EventKind::SelectorTimeout);
//! assert_eq!(ev.variant.as_deref(), Some("hero-1"));
//! assert_eq!(ev.timeout_ms, Some(300));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `subscriber`: subscriber name
    /// - `reason`: panic info/message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `subscriber`: subscriber name
    /// - `reason`: reason string (e.g., "full", "closed")
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SubscriberOverflow,

    // === Session lifecycle events ===
    /// A waiting episode was registered and its drivers armed.
    ///
    /// Sets:
    /// - `variant`: variant label
    /// - `remaining`: number of registered conditions
    /// - `timeout_ms`: effective deadline (ms), measured from page-complete
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SessionRegistered,

    /// One condition was satisfied and left the outstanding set.
    ///
    /// Sets:
    /// - `variant`: variant label
    /// - `condition`: the satisfied condition's identity
    /// - `remaining`: conditions still outstanding after this tick
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ConditionMet,

    /// All conditions were satisfied and the render routine succeeded.
    ///
    /// Sets:
    /// - `variant`: variant label
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    VariantApplied,

    /// The render routine failed after its conditions were met.
    ///
    /// Sets:
    /// - `variant`: variant label
    /// - `details`: the render error's message
    /// - `reason`: `"Variant #<label> wasn't applied"`
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    VariantContaminated,

    /// The deadline elapsed with conditions still unmet.
    ///
    /// Sets:
    /// - `variant`: variant label (absent for standalone emissions)
    /// - `reason`: the full timeout message
    /// - `timeout_ms`: the elapsed deadline (ms), when session-bound
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SelectorTimeout,

    /// A session was cancelled through its handle before completion.
    ///
    /// Sets:
    /// - `variant`: variant label
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SessionCancelled,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Variant label of the owning session, if applicable.
    pub variant: Option<Arc<str>>,
    /// Identity of the condition this event refers to.
    pub condition: Option<Arc<str>>,
    /// Human-readable reason (timeout message, contamination reason, panic info).
    pub reason: Option<Arc<str>>,
    /// Failure details (a render error's message).
    pub details: Option<Arc<str>>,
    /// Deadline in milliseconds (compact).
    pub timeout_ms: Option<u32>,
    /// Conditions still outstanding after the event.
    pub remaining: Option<u32>,
    /// Name of the subscriber, for subscriber events.
    pub subscriber: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            variant: None,
            condition: None,
            reason: None,
            details: None,
            timeout_ms: None,
            remaining: None,
            subscriber: None,
        }
    }

    /// Attaches a variant label.
    #[inline]
    pub fn with_variant(mut self, variant: impl Into<Arc<str>>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Attaches a condition identity.
    #[inline]
    pub fn with_condition(mut self, condition: impl Into<Arc<str>>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches failure details.
    #[inline]
    pub fn with_details(mut self, details: impl Into<Arc<str>>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Attaches a deadline duration (stored as milliseconds).
    #[inline]
    pub fn with_timeout(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.timeout_ms = Some(ms);
        self
    }

    /// Attaches an outstanding-conditions count.
    #[inline]
    pub fn with_remaining(mut self, n: u32) -> Self {
        self.remaining = Some(n);
        self
    }

    /// Attaches a subscriber name.
    #[inline]
    pub fn with_subscriber(mut self, subscriber: impl Into<Arc<str>>) -> Self {
        self.subscriber = Some(subscriber.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_subscriber(subscriber)
            .with_reason(reason)
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_subscriber(subscriber)
            .with_reason(info)
    }

    /// True for events produced by the fan-out stage itself.
    ///
    /// Dropping or mishandling one of these must not generate another
    /// report, otherwise a lagging subscriber feeds its own event stream.
    #[inline]
    pub fn is_subscriber_event(&self) -> bool {
        matches!(
            self.kind,
            EventKind::SubscriberOverflow | EventKind::SubscriberPanicked
        )
    }
}
