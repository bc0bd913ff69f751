//! # Session state: one waiting episode from registration to outcome.
//!
//! A session is created by `Gate::wait_for_exist` and driven by two tasks:
//! the poll driver (condition sweeps + render) and the deadline driver
//! (timeout measured from page-complete). Both race to move the shared
//! [`Phase`] forward; the watch channel's compare-and-set is the only
//! arbiter.
//!
//! ## Phase diagram
//! ```text
//!  Waiting ──► Rendering ──► Done(Satisfied | RenderFailed)
//!     │
//!     ├──────────────────► Done(TimedOut)
//!     └──────────────────► Done(Cancelled)
//! ```
//!
//! ## Rules
//! - Every transition out of `Waiting` is a **claim**: exactly one of
//!   render, timeout and cancel wins, the others observe a `false` claim
//!   and stand down.
//! - `Rendering` belongs to the poll driver alone; the deadline can no
//!   longer fire once conditions were met, even if the render is slow.
//! - `Done` is terminal.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tokio_util::sync::CancellationToken;

use crate::conditions::Condition;
use crate::events::{Bus, Event, EventKind};

/// Terminal result of a session.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// All conditions were met and the render routine succeeded.
    Satisfied,
    /// The deadline elapsed with conditions still unmet.
    TimedOut,
    /// Conditions were met but the render routine returned an error.
    RenderFailed {
        /// The render error's message.
        details: Arc<str>,
    },
    /// The session was cancelled through its handle.
    Cancelled,
}

/// Where a session currently stands.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Phase {
    Waiting,
    Rendering,
    Done(Outcome),
}

/// Shared state of one waiting episode.
///
/// Owned jointly by the poll driver, the deadline driver and the
/// [`SessionHandle`].
pub(crate) struct SessionState {
    pub(crate) variant: Arc<str>,
    pub(crate) remaining: Mutex<Vec<Condition>>,
    pub(crate) phase: watch::Sender<Phase>,
    pub(crate) poll_token: CancellationToken,
    pub(crate) bus: Bus,
}

impl SessionState {
    pub(crate) fn new(variant: Arc<str>, conditions: Vec<Condition>, bus: Bus) -> Self {
        Self {
            variant,
            remaining: Mutex::new(conditions),
            phase: watch::Sender::new(Phase::Waiting),
            poll_token: CancellationToken::new(),
            bus,
        }
    }

    /// Claims the render slot. Succeeds only from `Waiting`.
    pub(crate) fn begin_render(&self) -> bool {
        self.phase.send_if_modified(|p| {
            if matches!(p, Phase::Waiting) {
                *p = Phase::Rendering;
                true
            } else {
                false
            }
        })
    }

    /// Closes a claimed render slot with its outcome.
    pub(crate) fn finish_render(&self, outcome: Outcome) {
        self.phase.send_if_modified(|p| {
            if matches!(p, Phase::Rendering) {
                *p = Phase::Done(outcome.clone());
                true
            } else {
                false
            }
        });
    }

    /// Claims the timeout. Succeeds only from `Waiting`.
    pub(crate) fn claim_timeout(&self) -> bool {
        self.phase.send_if_modified(|p| {
            if matches!(p, Phase::Waiting) {
                *p = Phase::Done(Outcome::TimedOut);
                true
            } else {
                false
            }
        })
    }

    /// Claims cancellation. Succeeds only from `Waiting`.
    pub(crate) fn claim_cancel(&self) -> bool {
        self.phase.send_if_modified(|p| {
            if matches!(p, Phase::Waiting) {
                *p = Phase::Done(Outcome::Cancelled);
                true
            } else {
                false
            }
        })
    }

    pub(crate) fn is_active(&self) -> bool {
        matches!(*self.phase.borrow(), Phase::Waiting | Phase::Rendering)
    }

    pub(crate) fn outcome(&self) -> Option<Outcome> {
        match &*self.phase.borrow() {
            Phase::Done(out) => Some(out.clone()),
            _ => None,
        }
    }

    /// Identities of the conditions still outstanding, for timeout reports.
    pub(crate) async fn unmet_identities(&self) -> Vec<String> {
        let remaining = self.remaining.lock().await;
        remaining.iter().map(|c| c.to_string()).collect()
    }
}

/// Caller-side view of a session.
///
/// Obtained from `Gate::wait_for_exist`. Lets the caller observe the
/// session's progress, await its terminal [`Outcome`], or cancel it.
///
/// Cloning is cheap; clones observe and control the same session.
#[derive(Clone)]
pub struct SessionHandle {
    state: Arc<SessionState>,
    phase_rx: watch::Receiver<Phase>,
}

impl SessionHandle {
    pub(crate) fn new(state: Arc<SessionState>) -> Self {
        let phase_rx = state.phase.subscribe();
        Self { state, phase_rx }
    }

    /// Variant label this session waits for.
    pub fn variant(&self) -> &str {
        &self.state.variant
    }

    /// True while the session has not reached a terminal outcome.
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// The terminal outcome, if the session already finished.
    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome()
    }

    /// Waits for the session to finish and returns its outcome.
    pub async fn finished(&mut self) -> Outcome {
        let done = self
            .phase_rx
            .wait_for(|p| matches!(p, Phase::Done(_)))
            .await;
        if done.is_ok() {
            if let Some(out) = self.state.outcome() {
                return out;
            }
        }
        // The phase sender lives in the shared state we hold, so the wait
        // cannot observe a closed channel in practice.
        Outcome::Cancelled
    }

    /// Cancels the session.
    ///
    /// Returns `true` if this call closed the session; `false` if it had
    /// already finished or started rendering.
    pub fn cancel(&self) -> bool {
        if !self.state.claim_cancel() {
            return false;
        }
        self.state.poll_token.cancel();
        self.state.bus.publish(
            Event::new(EventKind::SessionCancelled).with_variant(Arc::clone(&self.state.variant)),
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Duration};

    fn state_with(conditions: Vec<Condition>) -> Arc<SessionState> {
        Arc::new(SessionState::new(
            Arc::from("exp-1"),
            conditions,
            Bus::new(8),
        ))
    }

    #[test]
    fn test_exactly_one_claim_wins() {
        let state = state_with(vec![]);
        assert!(state.begin_render());
        assert!(!state.begin_render(), "render slot claimed twice");
        assert!(!state.claim_timeout(), "timeout claimed after render");
        assert!(!state.claim_cancel(), "cancel claimed after render");
    }

    #[test]
    fn test_timeout_claim_blocks_render() {
        let state = state_with(vec![]);
        assert!(state.claim_timeout());
        assert!(!state.begin_render());
        assert_eq!(state.outcome(), Some(Outcome::TimedOut));
    }

    #[test]
    fn test_finish_render_records_outcome() {
        let state = state_with(vec![]);
        assert!(state.outcome().is_none());
        assert!(state.is_active());

        assert!(state.begin_render());
        assert!(state.is_active(), "rendering still counts as active");

        state.finish_render(Outcome::Satisfied);
        assert_eq!(state.outcome(), Some(Outcome::Satisfied));
        assert!(!state.is_active());
    }

    #[tokio::test]
    async fn test_unmet_identities_reads_remaining() {
        let state = state_with(vec![
            Condition::selector("#a"),
            Condition::selector(".b"),
        ]);
        let unmet = state.unmet_identities().await;
        assert_eq!(unmet, vec!["#a".to_string(), ".b".to_string()]);
    }

    #[tokio::test]
    async fn test_handle_cancel_claims_once_and_publishes() {
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();
        let state = Arc::new(SessionState::new(Arc::from("exp-9"), vec![], bus));
        let handle = SessionHandle::new(Arc::clone(&state));

        assert!(handle.cancel());
        assert!(!handle.cancel(), "second cancel must not claim again");
        assert_eq!(handle.outcome(), Some(Outcome::Cancelled));
        assert!(state.poll_token.is_cancelled());

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::SessionCancelled);
        assert_eq!(ev.variant.as_deref(), Some("exp-9"));
    }

    #[tokio::test]
    async fn test_finished_waits_for_terminal_phase() {
        let state = state_with(vec![]);
        let mut handle = SessionHandle::new(Arc::clone(&state));

        let claimer = Arc::clone(&state);
        tokio::spawn(async move {
            sleep(Duration::from_millis(20)).await;
            claimer.claim_timeout();
        });

        assert_eq!(handle.finished().await, Outcome::TimedOut);
    }
}
