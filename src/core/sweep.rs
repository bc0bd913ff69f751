//! # Run a single condition sweep for a session.
//!
//! Checks a session's outstanding conditions against the page, publishes
//! [`ConditionMet`](crate::events::EventKind::ConditionMet) for each one that
//! passed, and reports whether the set is now empty.
//!
//! ## Rules
//! - A condition that passes is **removed**: once met, it is never
//!   re-checked, even if the element disappears on a later tick.
//! - Conditions that fail stay for the next sweep.
//! - An empty set sweeps to `true` immediately (a wait with no conditions
//!   is satisfied on its first tick).

use std::sync::Arc;

use crate::dom::Document;
use crate::events::{Event, EventKind};

use super::session::SessionState;

/// Sweeps `state`'s outstanding conditions once against `doc`.
///
/// Returns `true` when nothing is left outstanding.
///
/// ### Event semantics
/// Publishes one `ConditionMet` per newly satisfied condition; `remaining`
/// on each event is the count still outstanding after the whole sweep.
pub(crate) async fn sweep(state: &SessionState, doc: &dyn Document) -> bool {
    let mut met = Vec::new();

    let left = {
        let mut remaining = state.remaining.lock().await;
        remaining.retain(|c| {
            if c.is_met(doc) {
                met.push(c.to_string());
                false
            } else {
                true
            }
        });
        remaining.len() as u32
    };

    for identity in met {
        publish_met(state, identity, left);
    }

    left == 0
}

/// Publishes `ConditionMet` for one satisfied condition.
fn publish_met(state: &SessionState, identity: String, left: u32) {
    state.bus.publish(
        Event::new(EventKind::ConditionMet)
            .with_variant(Arc::clone(&state.variant))
            .with_condition(identity)
            .with_remaining(left),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::Condition;
    use crate::dom::FakePage;
    use crate::events::Bus;

    fn state_with(conditions: Vec<Condition>, bus: Bus) -> SessionState {
        SessionState::new(Arc::from("exp-1"), conditions, bus)
    }

    #[tokio::test]
    async fn test_empty_set_sweeps_true() {
        let page = FakePage::new();
        let state = state_with(vec![], Bus::new(8));
        assert!(sweep(&state, &page).await);
    }

    #[tokio::test]
    async fn test_partial_sweep_keeps_unmet() {
        let page = FakePage::new();
        page.add_element("#present");
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();
        let state = state_with(
            vec![Condition::selector("#present"), Condition::selector("#absent")],
            bus,
        );

        assert!(!sweep(&state, &page).await);
        assert_eq!(state.unmet_identities().await, vec!["#absent".to_string()]);

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::ConditionMet);
        assert_eq!(ev.condition.as_deref(), Some("#present"));
        assert_eq!(ev.remaining, Some(1));
    }

    #[tokio::test]
    async fn test_met_condition_is_not_rechecked() {
        let page = FakePage::new();
        page.add_element("#flaky");
        let state = state_with(vec![Condition::selector("#flaky")], Bus::new(8));

        assert!(sweep(&state, &page).await);

        // The element vanishing afterwards must not bring the condition back.
        page.remove_element("#flaky");
        assert!(sweep(&state, &page).await);
    }
}
