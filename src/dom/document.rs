//! # Document seam: readiness source and DOM capabilities.
//!
//! [`Document`] is the single environment dependency of the runtime. It
//! bundles the readiness-state source (current phase plus a change
//! notification) with the two DOM capabilities the runtime consumes: a
//! selector existence check and a root-element marker attribute.
//!
//! Keeping this behind a trait means the whole engine runs against
//! [`FakePage`](crate::FakePage) in tests and demos, with a real browser
//! bridge slotting in unchanged.
//!
//! ## Contract
//! - `ready_state()` never moves backwards.
//! - The value held by [`Document::ready_changes`] receivers and
//!   `ready_state()` must agree: publish a new phase through the watch
//!   channel before (or at the same moment as) exposing it from
//!   `ready_state()`.
//! - `exists()` follows query-list semantics: a comma-separated selector is
//!   satisfied when any one alternative matches.

use tokio::sync::watch;

/// Page load phase, ordered from least to most loaded.
///
/// The ordering is total: `Loading < Interactive < Complete`, so "at least
/// interactive" is expressed as `state >= ReadyState::Interactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReadyState {
    /// The document is still being parsed.
    Loading,
    /// Parsing finished; sub-resources may still be loading.
    Interactive,
    /// The document and its sub-resources have fully loaded.
    Complete,
}

/// Capabilities the runtime needs from a live document.
///
/// Implementations must be cheap to call: `exists` runs once per outstanding
/// selector per poll tick and is expected to be a synchronous state
/// inspection, not an I/O round-trip. Bridges to an asynchronous DOM should
/// poll into a local snapshot and answer from it.
pub trait Document: Send + Sync + 'static {
    /// Current load phase.
    fn ready_state(&self) -> ReadyState;

    /// Change-notification receiver for the load phase.
    ///
    /// `borrow()` on the receiver yields the current phase, so subscribing
    /// and then checking the value cannot miss a transition.
    fn ready_changes(&self) -> watch::Receiver<ReadyState>;

    /// True if at least one element matches `selector`.
    fn exists(&self, selector: &str) -> bool;

    /// True if the root element carries the marker attribute `name`.
    fn has_root_marker(&self, name: &str) -> bool;

    /// Sets the marker attribute `name` on the root element.
    fn set_root_marker(&self, name: &str);

    /// True once the phase is at least [`ReadyState::Interactive`].
    fn is_interactive_or_later(&self) -> bool {
        self.ready_state() >= ReadyState::Interactive
    }

    /// True once the phase is [`ReadyState::Complete`].
    fn is_complete(&self) -> bool {
        self.ready_state() == ReadyState::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_state_is_totally_ordered() {
        assert!(ReadyState::Loading < ReadyState::Interactive);
        assert!(ReadyState::Interactive < ReadyState::Complete);
        assert!(
            ReadyState::Complete >= ReadyState::Interactive,
            "complete must satisfy an interactive-or-later check"
        );
    }
}
