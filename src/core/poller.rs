//! # Session drivers: condition polling and the deadline.
//!
//! Each session is driven by two spawned tasks racing over the shared
//! [`SessionState`](super::session::SessionState):
//!
//! - [`PollDriver`] sweeps the outstanding conditions on a fixed cadence
//!   and runs the render routine once the set empties.
//! - [`DeadlineDriver`] arms the timeout **after** the page reaches the
//!   complete state and closes the session if conditions are still unmet
//!   when it fires.
//!
//! ## Event flow
//! ```text
//! Conditions met:
//!   sweep → empty → begin_render → render()
//!                                    ├─ Ok  → publish VariantApplied      → Done(Satisfied)
//!                                    └─ Err → publish VariantContaminated → Done(RenderFailed)
//!
//! Deadline:
//!   page complete → sleep(timeout) → claim → publish SelectorTimeout
//!                                          → [clear] stop polling
//!                                          → reject(notice)
//! ```
//!
//! ## Rules
//! - The **first** sweep happens one interval after the session starts;
//!   conditions present at call time are caught within one interval.
//! - The render slot is claimed **before** the render runs; a deadline
//!   firing mid-render stands down.
//! - With `clear_on_timeout = false` the poll loop keeps sweeping after a
//!   timeout, but the claimed phase keeps the render from ever running.

use std::sync::Arc;
use std::time::Duration;

use tokio::{select, time};

use crate::dom::Document;
use crate::error::{RenderError, TimeoutNotice};
use crate::events::{Event, EventKind};

use super::lifecycle::DocLifecycle;
use super::session::{Outcome, Phase, SessionState};
use super::sweep::sweep;

/// Render routine of one session. Runs at most once.
pub(crate) type RenderFn = Box<dyn FnOnce() -> Result<(), RenderError> + Send>;

/// Timeout callback of one session. Runs at most once.
pub(crate) type RejectFn = Box<dyn FnOnce(TimeoutNotice) + Send>;

/// Sweeps conditions on a fixed cadence and renders when they are all met.
pub(crate) struct PollDriver {
    pub(crate) state: Arc<SessionState>,
    pub(crate) doc: Arc<dyn Document>,
    pub(crate) interval: Duration,
}

impl PollDriver {
    /// Runs the poll loop until the session renders, is stopped, or the
    /// conditions drain after a non-clearing timeout.
    ///
    /// ### Flow
    /// 1. Sleep one interval, then sweep the outstanding conditions
    /// 2. Repeat until the set is empty or the poll token is cancelled
    /// 3. Claim the render slot; stand down if the session already closed
    /// 4. Run the render routine and record the outcome
    pub(crate) async fn run(self, render: RenderFn) {
        loop {
            select! {
                _ = time::sleep(self.interval) => {}
                _ = self.state.poll_token.cancelled() => return,
            }
            if sweep(&self.state, self.doc.as_ref()).await {
                break;
            }
        }

        if !self.state.begin_render() {
            return;
        }
        self.state.poll_token.cancel();

        match render() {
            Ok(()) => {
                self.state.bus.publish(
                    Event::new(EventKind::VariantApplied)
                        .with_variant(Arc::clone(&self.state.variant)),
                );
                self.state.finish_render(Outcome::Satisfied);
            }
            Err(err) => {
                let details: Arc<str> = Arc::from(err.to_string());
                self.state.bus.publish(
                    Event::new(EventKind::VariantContaminated)
                        .with_variant(Arc::clone(&self.state.variant))
                        .with_reason(format!(
                            "Variant #{} wasn't applied",
                            self.state.variant
                        ))
                        .with_details(Arc::clone(&details)),
                );
                self.state.finish_render(Outcome::RenderFailed { details });
            }
        }
    }
}

/// Arms the timeout once the page is complete and closes late sessions.
pub(crate) struct DeadlineDriver {
    pub(crate) state: Arc<SessionState>,
    pub(crate) lifecycle: DocLifecycle,
    pub(crate) timeout: Duration,
    pub(crate) clear_on_timeout: bool,
}

impl DeadlineDriver {
    /// Runs the deadline until it fires or the session closes first.
    ///
    /// ### Flow
    /// 1. Wait for the page to reach the complete state
    /// 2. Sleep the timeout
    /// 3. Claim the session; stand down if it rendered or was cancelled
    /// 4. Publish `SelectorTimeout`, optionally stop polling, call `reject`
    ///
    /// A page that never completes never arms the timeout: the reject
    /// callback is not invoked for such sessions.
    pub(crate) async fn run(self, reject: RejectFn) {
        let done = |p: &Phase| matches!(p, Phase::Done(_));
        let mut phase_rx = self.state.phase.subscribe();

        select! {
            _ = self.lifecycle.complete() => {}
            _ = phase_rx.wait_for(done) => return,
        }
        select! {
            _ = time::sleep(self.timeout) => {}
            _ = phase_rx.wait_for(done) => return,
        }

        if !self.state.claim_timeout() {
            return;
        }

        let unmet = self.state.unmet_identities().await;
        let message = format!(
            "Selectors not found or other error thrown: {}; Variant: {}",
            unmet.join("|"),
            self.state.variant
        );
        self.state.bus.publish(
            Event::new(EventKind::SelectorTimeout)
                .with_variant(Arc::clone(&self.state.variant))
                .with_reason(message.clone())
                .with_timeout(self.timeout),
        );
        if self.clear_on_timeout {
            self.state.poll_token.cancel();
        }
        reject(TimeoutNotice::new(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::Condition;
    use crate::dom::{FakePage, ReadyState};
    use crate::events::Bus;
    use std::sync::atomic::{AtomicU64, Ordering};
    use tokio::sync::oneshot;
    use tokio::time::{sleep, timeout as with_timeout};

    fn state_with(conditions: Vec<Condition>, bus: Bus) -> Arc<SessionState> {
        Arc::new(SessionState::new(Arc::from("exp-1"), conditions, bus))
    }

    #[tokio::test]
    async fn test_poll_driver_renders_once_conditions_met() {
        let page = Arc::new(FakePage::new());
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();
        let state = state_with(vec![Condition::selector("#hero")], bus);
        let ran = Arc::new(AtomicU64::new(0));

        let driver = PollDriver {
            state: Arc::clone(&state),
            doc: Arc::clone(&page) as Arc<dyn Document>,
            interval: Duration::from_millis(10),
        };
        let counter = Arc::clone(&ran);
        let worker = tokio::spawn(driver.run(Box::new(move || {
            counter.fetch_add(1, Ordering::Relaxed);
            Ok(())
        })));

        sleep(Duration::from_millis(35)).await;
        assert_eq!(ran.load(Ordering::Relaxed), 0, "rendered before the selector existed");

        page.add_element("#hero");
        worker.await.unwrap();

        assert_eq!(ran.load(Ordering::Relaxed), 1);
        assert_eq!(state.outcome(), Some(Outcome::Satisfied));

        let met = rx.recv().await.unwrap();
        assert_eq!(met.kind, EventKind::ConditionMet);
        let applied = rx.recv().await.unwrap();
        assert_eq!(applied.kind, EventKind::VariantApplied);
    }

    #[tokio::test]
    async fn test_poll_driver_reports_contamination() {
        let page = Arc::new(FakePage::new());
        page.add_element("#hero");
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();
        let state = state_with(vec![Condition::selector("#hero")], bus);

        let driver = PollDriver {
            state: Arc::clone(&state),
            doc: Arc::clone(&page) as Arc<dyn Document>,
            interval: Duration::from_millis(10),
        };
        driver
            .run(Box::new(|| {
                Err(RenderError::Failed {
                    reason: "mutation blew up".into(),
                })
            }))
            .await;

        assert_eq!(
            state.outcome(),
            Some(Outcome::RenderFailed {
                details: Arc::from("mutation blew up")
            })
        );

        let met = rx.recv().await.unwrap();
        assert_eq!(met.kind, EventKind::ConditionMet);
        let contaminated = rx.recv().await.unwrap();
        assert_eq!(contaminated.kind, EventKind::VariantContaminated);
        assert_eq!(
            contaminated.reason.as_deref(),
            Some("Variant #exp-1 wasn't applied")
        );
        assert_eq!(contaminated.details.as_deref(), Some("mutation blew up"));
    }

    #[tokio::test]
    async fn test_deadline_armed_only_after_page_complete() {
        let page = Arc::new(FakePage::new());
        let state = state_with(vec![Condition::selector("#missing")], Bus::new(8));
        let lifecycle =
            DocLifecycle::new(Arc::clone(&page) as Arc<dyn Document>, Duration::from_millis(1));

        let driver = DeadlineDriver {
            state: Arc::clone(&state),
            lifecycle,
            timeout: Duration::from_millis(20),
            clear_on_timeout: true,
        };
        let (tx, rx) = oneshot::channel::<String>();
        tokio::spawn(driver.run(Box::new(move |notice| {
            let _ = tx.send(notice.message);
        })));

        // The timeout is far exceeded while the page still loads.
        sleep(Duration::from_millis(80)).await;
        assert!(state.is_active(), "deadline fired before the page completed");

        page.set_ready_state(ReadyState::Complete);
        let message = with_timeout(Duration::from_millis(500), rx)
            .await
            .unwrap()
            .unwrap();
        assert!(message.starts_with("Selectors not found or other error thrown: #missing"));
        assert_eq!(state.outcome(), Some(Outcome::TimedOut));
        assert!(state.poll_token.is_cancelled());
    }

    #[tokio::test]
    async fn test_deadline_stands_down_after_render_claim() {
        let page = Arc::new(FakePage::with_state(ReadyState::Complete));
        let state = state_with(vec![], Bus::new(8));
        let lifecycle =
            DocLifecycle::new(Arc::clone(&page) as Arc<dyn Document>, Duration::from_millis(1));

        assert!(state.begin_render());

        let driver = DeadlineDriver {
            state: Arc::clone(&state),
            lifecycle,
            timeout: Duration::from_millis(10),
            clear_on_timeout: true,
        };
        let (tx, rx) = oneshot::channel::<String>();
        driver
            .run(Box::new(move |notice| {
                let _ = tx.send(notice.message);
            }))
            .await;

        // The reject sender was dropped unused.
        assert!(rx.await.is_err(), "reject ran for a rendering session");
        assert!(!state.poll_token.is_cancelled());
    }

    #[tokio::test]
    async fn test_non_clearing_timeout_leaves_polling_running() {
        let page = Arc::new(FakePage::with_state(ReadyState::Complete));
        let bus = Bus::new(8);
        let mut events = bus.subscribe();
        let state = state_with(vec![Condition::selector("#late")], bus);
        let lifecycle =
            DocLifecycle::new(Arc::clone(&page) as Arc<dyn Document>, Duration::from_millis(1));

        let ran = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&ran);
        tokio::spawn(
            PollDriver {
                state: Arc::clone(&state),
                doc: Arc::clone(&page) as Arc<dyn Document>,
                interval: Duration::from_millis(10),
            }
            .run(Box::new(move || {
                counter.fetch_add(1, Ordering::Relaxed);
                Ok(())
            })),
        );

        let (tx, rx) = oneshot::channel::<String>();
        DeadlineDriver {
            state: Arc::clone(&state),
            lifecycle,
            timeout: Duration::from_millis(30),
            clear_on_timeout: false,
        }
        .run(Box::new(move |notice| {
            let _ = tx.send(notice.message);
        }))
        .await;

        assert!(rx.await.is_ok());
        assert!(!state.poll_token.is_cancelled(), "non-clearing timeout stopped the poll");

        // The selector shows up late: sweeps continue, but the session is
        // closed, so the render must never run.
        page.add_element("#late");
        sleep(Duration::from_millis(60)).await;
        assert_eq!(ran.load(Ordering::Relaxed), 0);
        assert_eq!(state.outcome(), Some(Outcome::TimedOut));

        // The late satisfaction was still observed on the bus.
        let mut kinds = Vec::new();
        while let Ok(ev) = events.try_recv() {
            kinds.push(ev.kind);
        }
        assert!(kinds.contains(&EventKind::SelectorTimeout));
        assert!(
            kinds.contains(&EventKind::ConditionMet),
            "post-timeout sweeps must still report satisfied conditions"
        );
    }
}
