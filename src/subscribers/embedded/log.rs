//! # ConsoleWriter — simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to the console.
//! Session flow goes to stdout, failures (timeouts, contaminations) go to
//! stderr. Use it for test or demo.
//!
//! ## Example output
//! ```text
//! [registered] variant="hero-1" conditions=2 timeout_ms=60000
//! [met] variant="hero-1" condition="#cta" remaining=1
//! [applied] variant="hero-1"
//! [cancelled] variant="hero-1"
//! [selector-timeout] Selectors not found or other error thrown: #missing; Variant: hero-1
//! [contaminated] variant="hero-1" reason="Variant #hero-1 wasn't applied"
//! ```

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;
use async_trait::async_trait;

/// Event writer subscriber.
#[derive(Default)]
pub struct ConsoleWriter;

impl ConsoleWriter {
    /// Construct a new [`ConsoleWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for ConsoleWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::SessionRegistered => {
                println!(
                    "[registered] variant={:?} conditions={:?} timeout_ms={:?}",
                    e.variant, e.remaining, e.timeout_ms
                );
            }
            EventKind::ConditionMet => {
                println!(
                    "[met] variant={:?} condition={:?} remaining={:?}",
                    e.variant, e.condition, e.remaining
                );
            }
            EventKind::VariantApplied => {
                println!("[applied] variant={:?}", e.variant);
            }
            EventKind::SessionCancelled => {
                println!("[cancelled] variant={:?}", e.variant);
            }
            EventKind::SelectorTimeout => {
                eprintln!(
                    "[selector-timeout] {}",
                    e.reason.as_deref().unwrap_or("unknown"),
                );
            }
            EventKind::VariantContaminated => {
                eprintln!(
                    "[contaminated] variant={:?} reason={:?} details={:?}",
                    e.variant, e.reason, e.details
                );
            }
            EventKind::SubscriberOverflow => {
                println!(
                    "[subscriber-overflow] subscriber={:?} reason={:?}",
                    e.subscriber, e.reason
                );
            }
            EventKind::SubscriberPanicked => {
                println!(
                    "[subscriber-panicked] subscriber={} info={}",
                    e.subscriber.as_deref().unwrap_or("unknown"),
                    e.reason.as_deref().unwrap_or("unknown"),
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "ConsoleWriter"
    }
}
