//! Error and notice types used by the rendergate runtime.
//!
//! This module defines two shapes:
//!
//! - [`RenderError`] — errors raised by a render routine after its gating
//!   conditions were met.
//! - [`TimeoutNotice`] — the payload handed to a session's reject handle when
//!   the deadline elapses with conditions still unmet.
//!
//! [`RenderError`] provides helper methods (`as_label`, `as_message`) for
//! logging/metrics sinks. A timeout is not modeled as an error type: it is a
//! notice on the reject channel, recoverable by the caller, while a render
//! failure terminates its session and re-surfaces through the session handle.

use thiserror::Error;

/// # Errors produced by a render routine.
///
/// Returned by the callback passed to
/// [`Gate::wait_for_exist`](crate::Gate::wait_for_exist). A render error is
/// reported to the observer plane exactly once and then re-surfaces to the
/// caller as [`Outcome::RenderFailed`](crate::Outcome::RenderFailed); it is
/// never swallowed and never retried.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RenderError {
    /// The routine could not apply its page mutation.
    #[error("{reason}")]
    Failed {
        /// The underlying failure message.
        reason: String,
    },

    /// An element the routine relied on disappeared between the condition
    /// check and the mutation.
    #[error("element vanished before mutation: {selector}")]
    ElementVanished {
        /// Selector of the element that went missing.
        selector: String,
    },
}

impl RenderError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use rendergate::RenderError;
    ///
    /// let err = RenderError::Failed { reason: "banner node readonly".into() };
    /// assert_eq!(err.as_label(), "render_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RenderError::Failed { .. } => "render_failed",
            RenderError::ElementVanished { .. } => "render_element_vanished",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RenderError::Failed { reason } => reason.clone(),
            RenderError::ElementVanished { selector } => {
                format!("element vanished before mutation: {selector}")
            }
        }
    }
}

/// Payload delivered to a session's reject handle on timeout.
///
/// Carries the fixed-format message listing every still-unmet condition and
/// the variant label. Timeouts are non-fatal: delivery of this notice is the
/// only failure signal for unmet conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutNotice {
    /// Human-readable summary:
    /// `"Selectors not found or other error thrown: <unmet>; Variant: <label>"`.
    pub message: String,
}

impl TimeoutNotice {
    /// Wraps a prepared message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for TimeoutNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
