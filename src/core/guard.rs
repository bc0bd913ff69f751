//! # At-most-once page mutations.
//!
//! Provides [`RunGuard`] which keys one-shot mutations on a marker attached
//! to the page's root element. Re-running the same script (SPA navigation,
//! double-injected tags) finds the marker and skips the mutation.
//!
//! ## Rules
//! - The marker is set **before** the mutation runs, so a mutation that
//!   panics still counts as consumed.
//! - Markers are independent: each marker name guards its own mutation.

use std::sync::Arc;

use crate::dom::Document;

/// Guards a page mutation so it applies at most once per page.
pub struct RunGuard {
    doc: Arc<dyn Document>,
}

impl RunGuard {
    pub fn new(doc: Arc<dyn Document>) -> Self {
        Self { doc }
    }

    /// Runs `apply` unless `marker` is already present on the root element.
    ///
    /// Returns `true` if the mutation ran, `false` if it was skipped.
    pub fn run(&self, marker: &str, apply: impl FnOnce()) -> bool {
        if self.doc.has_root_marker(marker) {
            return false;
        }
        self.doc.set_root_marker(marker);
        apply();
        true
    }
}
