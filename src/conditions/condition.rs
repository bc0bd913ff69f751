//! # Readiness conditions.
//!
//! A [`Condition`] gates a render routine: a session keeps polling until
//! every registered condition has been satisfied once. Three shapes exist:
//!
//! - [`Condition::Selector`] - a CSS selector, satisfied when the document
//!   has at least one match;
//! - [`Condition::AnyOf`] - ordered alternatives OR'd together, collapsed
//!   into one comma-joined selector at registration;
//! - [`Condition::Predicate`] - a named zero-argument closure, satisfied
//!   once it returns `true`.
//!
//! ## Rules
//! - Conditions are immutable once registered.
//! - A satisfied condition is removed from the outstanding set and never
//!   re-checked.
//! - `Display` yields the identity used in timeout messages: the selector
//!   text, or the predicate's name.
//!
//! ## Example
//! ```rust
//! use rendergate::Condition;
//!
//! let banner = Condition::selector("#hero-banner");
//! let cta = Condition::any_of(["#cta-btn", ".cta-fallback"]);
//! let hydrated = Condition::predicate("app-hydrated", || true);
//!
//! assert_eq!(banner.to_string(), "#hero-banner");
//! assert_eq!(cta.normalize().to_string(), "#cta-btn,.cta-fallback");
//! assert_eq!(hydrated.to_string(), "app-hydrated");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::dom::Document;

/// Shared predicate closure, re-evaluated once per poll tick until it
/// returns `true`.
pub type PredicateFn = Arc<dyn Fn() -> bool + Send + Sync>;

/// One readiness condition gating a render routine.
#[derive(Clone)]
pub enum Condition {
    /// CSS selector; satisfied when the document has at least one match.
    Selector(String),
    /// Ordered alternatives, satisfied when any one matches.
    AnyOf(Vec<String>),
    /// Named predicate; satisfied once the closure returns `true`.
    Predicate {
        /// Identity used in events and timeout messages.
        name: Cow<'static, str>,
        /// The check itself.
        check: PredicateFn,
    },
}

impl Condition {
    /// Creates a selector condition.
    pub fn selector(selector: impl Into<String>) -> Self {
        Condition::Selector(selector.into())
    }

    /// Creates an alternatives condition.
    pub fn any_of<I, S>(selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Condition::AnyOf(selectors.into_iter().map(Into::into).collect())
    }

    /// Creates a named predicate condition.
    pub fn predicate<F>(name: impl Into<Cow<'static, str>>, check: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Condition::Predicate {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// Collapses [`Condition::AnyOf`] into a single comma-joined selector.
    ///
    /// Registration applies this to every condition, so the outstanding set
    /// only ever holds `Selector` and `Predicate` entries.
    #[must_use]
    pub fn normalize(self) -> Self {
        match self {
            Condition::AnyOf(parts) => Condition::Selector(parts.join(",")),
            other => other,
        }
    }

    /// Evaluates the condition once against `doc`.
    ///
    /// Selectors use [`Document::exists`]; predicates are invoked. There is
    /// no failure channel here: a check either holds or it does not yet.
    pub fn is_met(&self, doc: &dyn Document) -> bool {
        match self {
            Condition::Selector(selector) => doc.exists(selector),
            Condition::AnyOf(parts) => doc.exists(&parts.join(",")),
            Condition::Predicate { check, .. } => check(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Selector(selector) => f.write_str(selector),
            Condition::AnyOf(parts) => f.write_str(&parts.join(",")),
            Condition::Predicate { name, .. } => f.write_str(name),
        }
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Selector(selector) => f.debug_tuple("Selector").field(selector).finish(),
            Condition::AnyOf(parts) => f.debug_tuple("AnyOf").field(parts).finish(),
            Condition::Predicate { name, .. } => f.debug_tuple("Predicate").field(name).finish(),
        }
    }
}

impl From<&str> for Condition {
    fn from(selector: &str) -> Self {
        Condition::Selector(selector.to_string())
    }
}

impl From<String> for Condition {
    fn from(selector: String) -> Self {
        Condition::Selector(selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::FakePage;

    #[test]
    fn test_normalize_collapses_alternatives() {
        let cond = Condition::any_of(["#a", "#b", ".c"]).normalize();
        match &cond {
            Condition::Selector(s) => assert_eq!(s, "#a,#b,.c"),
            other => panic!("expected Selector after normalize, got {other:?}"),
        }
    }

    #[test]
    fn test_normalize_keeps_selector_and_predicate() {
        let sel = Condition::selector("#a").normalize();
        assert!(matches!(sel, Condition::Selector(_)));

        let pred = Condition::predicate("ready", || true).normalize();
        assert!(matches!(pred, Condition::Predicate { .. }));
    }

    #[test]
    fn test_display_yields_condition_identity() {
        assert_eq!(Condition::selector("#missing").to_string(), "#missing");
        assert_eq!(Condition::any_of(["#a", "#b"]).to_string(), "#a,#b");
        assert_eq!(
            Condition::predicate("menu-hydrated", || false).to_string(),
            "menu-hydrated"
        );
    }

    #[test]
    fn test_selector_is_met_via_document() {
        let page = FakePage::new();
        let cond = Condition::selector("#app");
        assert!(!cond.is_met(&page));

        page.add_element("#app");
        assert!(cond.is_met(&page));
    }

    #[test]
    fn test_any_of_is_met_when_one_alternative_present() {
        let page = FakePage::new();
        page.add_element(".fallback");

        let cond = Condition::any_of(["#primary", ".fallback"]);
        assert!(cond.is_met(&page), "one present alternative must satisfy");
        assert!(cond.normalize().is_met(&page));
    }

    #[test]
    fn test_predicate_is_met_by_invocation() {
        let page = FakePage::new();
        let flag = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));

        let seen = flag.clone();
        let cond = Condition::predicate("flag-set", move || {
            seen.load(std::sync::atomic::Ordering::Relaxed)
        });

        assert!(!cond.is_met(&page));
        flag.store(true, std::sync::atomic::Ordering::Relaxed);
        assert!(cond.is_met(&page));
    }

    #[test]
    fn test_from_str_builds_selector() {
        let cond: Condition = "#hero".into();
        assert!(matches!(cond, Condition::Selector(ref s) if s == "#hero"));
    }
}
