//! # Document lifecycle waits.
//!
//! Provides [`DocLifecycle`] async helpers that complete when the page
//! reaches a target [`ReadyState`].
//!
//! ## Rules
//! - `ready()` completes at **interactive or later**, `complete()` at
//!   **complete**.
//! - If the page is already at (or past) the target, completion is deferred
//!   by one `next_tick` so callers never observe a same-tick callback.
//! - If the target is reached while waiting, completion is immediate (no
//!   extra deferral on top of the transition).
//! - A page that never reaches the target never completes the wait.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use crate::dom::{Document, ReadyState};

/// Async waits over a page's ready state.
///
/// Cloning is cheap; clones observe the same page.
#[derive(Clone)]
pub(crate) struct DocLifecycle {
    doc: Arc<dyn Document>,
    next_tick: Duration,
}

impl DocLifecycle {
    pub(crate) fn new(doc: Arc<dyn Document>, next_tick: Duration) -> Self {
        Self { doc, next_tick }
    }

    /// Completes when the page is interactive or later.
    pub(crate) async fn ready(&self) {
        self.wait_for(ReadyState::Interactive).await;
    }

    /// Completes when the page is complete.
    pub(crate) async fn complete(&self) {
        self.wait_for(ReadyState::Complete).await;
    }

    async fn wait_for(&self, target: ReadyState) {
        let mut rx = self.doc.ready_changes();
        if *rx.borrow() >= target {
            sleep(self.next_tick).await;
            return;
        }
        while rx.changed().await.is_ok() {
            if *rx.borrow_and_update() >= target {
                return;
            }
        }
        // Sender gone without ever reaching the target: the wait stays open.
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::FakePage;
    use std::time::Instant;
    use tokio::time::timeout;

    fn lifecycle_over(page: &Arc<FakePage>) -> DocLifecycle {
        DocLifecycle::new(Arc::clone(page) as Arc<dyn Document>, Duration::from_millis(10))
    }

    #[tokio::test]
    async fn test_already_complete_is_deferred_one_tick() {
        let page = Arc::new(FakePage::with_state(ReadyState::Complete));
        let lc = lifecycle_over(&page);

        let started = Instant::now();
        lc.ready().await;
        let elapsed = started.elapsed();

        assert!(elapsed >= Duration::from_millis(10), "completed on the same tick");
        assert!(elapsed < Duration::from_millis(200));
    }

    #[tokio::test]
    async fn test_transition_completes_without_extra_tick() {
        let page = Arc::new(FakePage::new());
        let lc = lifecycle_over(&page);

        let setter = Arc::clone(&page);
        tokio::spawn(async move {
            sleep(Duration::from_millis(30)).await;
            setter.set_ready_state(ReadyState::Complete);
        });

        let started = Instant::now();
        lc.complete().await;
        let elapsed = started.elapsed();

        assert!(elapsed >= Duration::from_millis(25));
        assert!(elapsed < Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_interactive_satisfies_ready_but_not_complete() {
        let page = Arc::new(FakePage::new());
        page.set_ready_state(ReadyState::Interactive);
        let lc = lifecycle_over(&page);

        lc.ready().await;

        let still_waiting = timeout(Duration::from_millis(50), lc.complete()).await;
        assert!(still_waiting.is_err(), "complete() must wait past interactive");
    }
}
