//! # FakePage: in-memory document for tests and demos.
//!
//! Drives the engine without a rendering environment: tests flip the ready
//! state and add/remove elements while sessions poll against it.
//!
//! ## Example
//! ```rust
//! use rendergate::{Document, FakePage, ReadyState};
//!
//! let page = FakePage::new();
//! assert!(!page.exists("#app"));
//!
//! page.add_element("#app");
//! page.set_ready_state(ReadyState::Interactive);
//!
//! assert!(page.exists("#app"));
//! assert!(page.is_interactive_or_later());
//! ```

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use super::document::{Document, ReadyState};

/// In-memory [`Document`] implementation.
///
/// Elements are stored as bare selector strings: `add_element("#a")` makes
/// `exists("#a")` true. Comma-separated queries match when any one
/// alternative is present, mirroring query-list semantics.
pub struct FakePage {
    ready_tx: watch::Sender<ReadyState>,
    elements: Mutex<HashSet<String>>,
    markers: Mutex<HashSet<String>>,
}

impl FakePage {
    /// Creates a page in the [`ReadyState::Loading`] phase with no elements.
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(ReadyState::Loading)
    }

    /// Creates a page already in the given phase.
    #[must_use]
    pub fn with_state(state: ReadyState) -> Self {
        let (ready_tx, _rx) = watch::channel(state);
        Self {
            ready_tx,
            elements: Mutex::new(HashSet::new()),
            markers: Mutex::new(HashSet::new()),
        }
    }

    /// Advances the load phase and notifies watchers.
    ///
    /// The phase never moves backwards; setting an earlier phase is a no-op.
    pub fn set_ready_state(&self, state: ReadyState) {
        self.ready_tx.send_if_modified(|current| {
            if state > *current {
                *current = state;
                true
            } else {
                false
            }
        });
    }

    /// Makes `selector` match from now on.
    pub fn add_element(&self, selector: &str) {
        self.lock_elements().insert(selector.to_string());
    }

    /// Removes a previously added element.
    pub fn remove_element(&self, selector: &str) {
        self.lock_elements().remove(selector);
    }

    fn lock_elements(&self) -> MutexGuard<'_, HashSet<String>> {
        self.elements.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_markers(&self) -> MutexGuard<'_, HashSet<String>> {
        self.markers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for FakePage {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for FakePage {
    fn ready_state(&self) -> ReadyState {
        *self.ready_tx.borrow()
    }

    fn ready_changes(&self) -> watch::Receiver<ReadyState> {
        self.ready_tx.subscribe()
    }

    fn exists(&self, selector: &str) -> bool {
        let elements = self.lock_elements();
        selector
            .split(',')
            .map(str::trim)
            .any(|part| elements.contains(part))
    }

    fn has_root_marker(&self, name: &str) -> bool {
        self.lock_markers().contains(name)
    }

    fn set_root_marker(&self, name: &str) {
        self.lock_markers().insert(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exists_matches_any_alternative_in_query_list() {
        let page = FakePage::new();
        page.add_element(".cta-fallback");

        assert!(page.exists(".cta-fallback"));
        assert!(
            page.exists("#cta-btn, .cta-fallback"),
            "query list must match when one alternative is present"
        );
        assert!(!page.exists("#cta-btn"));
    }

    #[test]
    fn test_ready_state_never_regresses() {
        let page = FakePage::new();
        page.set_ready_state(ReadyState::Complete);
        page.set_ready_state(ReadyState::Interactive);

        assert_eq!(page.ready_state(), ReadyState::Complete);
    }

    #[test]
    fn test_ready_changes_observes_transitions() {
        let page = FakePage::new();
        let rx = page.ready_changes();
        assert_eq!(*rx.borrow(), ReadyState::Loading);

        page.set_ready_state(ReadyState::Interactive);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow(), ReadyState::Interactive);
    }

    #[test]
    fn test_markers_are_persistent() {
        let page = FakePage::new();
        assert!(!page.has_root_marker("promo-hero"));

        page.set_root_marker("promo-hero");
        assert!(page.has_root_marker("promo-hero"));
        assert!(!page.has_root_marker("promo-footer"));
    }
}
