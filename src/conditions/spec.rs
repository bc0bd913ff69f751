//! # Wait specification for a poll session.
//!
//! Defines [`WaitSpec`], the registration bundle handed to
//! [`Gate::wait_for_exist`](crate::Gate::wait_for_exist): the conditions to
//! poll, the variant label, and optional per-call overrides for the deadline
//! and the clear-on-timeout behavior.
//!
//! ## Rules
//! - Conditions are normalized at construction: every
//!   [`Condition::AnyOf`](crate::Condition::AnyOf) collapses into one
//!   comma-joined selector.
//! - Overrides left unset inherit the gate's [`Config`](crate::Config)
//!   values at registration time.
//! - The variant label defaults to `""`; it has no behavioral meaning, it
//!   only identifies the session in events and messages.

use std::borrow::Cow;
use std::time::Duration;

use super::condition::Condition;

/// Specification for one waiting episode.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use rendergate::{Condition, WaitSpec};
///
/// let spec = WaitSpec::new([
///     Condition::selector("#hero-banner"),
///     Condition::any_of(["#cta-btn", ".cta-fallback"]),
/// ])
/// .with_variant("hero-1")
/// .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(spec.variant(), "hero-1");
/// assert_eq!(spec.timeout(), Some(Duration::from_secs(5)));
/// // Alternatives were collapsed at construction:
/// assert_eq!(spec.conditions()[1].to_string(), "#cta-btn,.cta-fallback");
/// ```
#[derive(Clone, Debug)]
pub struct WaitSpec {
    conditions: Vec<Condition>,
    variant: Cow<'static, str>,
    timeout: Option<Duration>,
    clear_on_timeout: Option<bool>,
}

impl WaitSpec {
    /// Creates a specification from a sequence of conditions.
    ///
    /// Conditions are normalized here, before polling ever begins.
    pub fn new<I>(conditions: I) -> Self
    where
        I: IntoIterator<Item = Condition>,
    {
        Self {
            conditions: conditions
                .into_iter()
                .map(Condition::normalize)
                .collect(),
            variant: Cow::Borrowed(""),
            timeout: None,
            clear_on_timeout: None,
        }
    }

    /// Shorthand for a spec made of plain selector conditions.
    pub fn selectors<I, S>(selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(selectors.into_iter().map(Condition::selector))
    }

    /// Returns a new spec with the given variant label.
    #[must_use]
    pub fn with_variant(mut self, variant: impl Into<Cow<'static, str>>) -> Self {
        self.variant = variant.into();
        self
    }

    /// Returns a new spec with a per-call deadline override.
    ///
    /// The deadline is measured from page-complete, not from registration.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns a new spec overriding whether the poll loop is also stopped
    /// when the deadline fires.
    #[must_use]
    pub fn with_clear_on_timeout(mut self, clear: bool) -> Self {
        self.clear_on_timeout = Some(clear);
        self
    }

    /// Returns the normalized conditions.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Returns the variant label.
    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Returns the deadline override, if set.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the clear-on-timeout override, if set.
    pub fn clear_on_timeout(&self) -> Option<bool> {
        self.clear_on_timeout
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        Vec<Condition>,
        Cow<'static, str>,
        Option<Duration>,
        Option<bool>,
    ) {
        (
            self.conditions,
            self.variant,
            self.timeout,
            self.clear_on_timeout,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_alternatives() {
        let spec = WaitSpec::new([
            Condition::selector("#a"),
            Condition::any_of(["#b", "#c"]),
        ]);
        assert!(
            spec.conditions()
                .iter()
                .all(|c| !matches!(c, Condition::AnyOf(_))),
            "registered conditions must be Selector or Predicate only"
        );
        assert_eq!(spec.conditions()[1].to_string(), "#b,#c");
    }

    #[test]
    fn test_defaults_are_inherit_markers() {
        let spec = WaitSpec::selectors(["#a"]);
        assert_eq!(spec.variant(), "");
        assert_eq!(spec.timeout(), None);
        assert_eq!(spec.clear_on_timeout(), None);
    }

    #[test]
    fn test_overrides_are_kept() {
        let spec = WaitSpec::selectors(["#a"])
            .with_variant("exp-7")
            .with_timeout(Duration::from_millis(300))
            .with_clear_on_timeout(false);

        assert_eq!(spec.variant(), "exp-7");
        assert_eq!(spec.timeout(), Some(Duration::from_millis(300)));
        assert_eq!(spec.clear_on_timeout(), Some(false));
    }
}
