//! # Gate: orchestrates waiting sessions, fan-out delivery, and page waits.
//!
//! The [`Gate`] owns the event bus, a [`SubscriberSet`], the page handle and
//! global runtime configuration. It registers waiting sessions, spawns their
//! poll and deadline drivers, and exposes page-lifecycle waits and the
//! one-shot mutation guard.
//!
//! ## Key responsibilities
//! - register sessions via [`Gate::wait_for_exist`] and spawn their drivers
//! - subscribe to the [`Bus`] and **fan-out** events via [`SubscriberSet`]
//! - expose page-lifecycle waits (`doc_ready` / `doc_complete`)
//! - guard one-shot page mutations via [`Gate::run_variant`]
//!
//! ## High-level architecture
//! ```text
//! Registration:
//!   WaitSpec ──► Gate::wait_for_exist(spec, render, resolve, reject)
//!       │
//!       ├──► SessionState (variant, conditions, phase, poll token)
//!       ├──► spawn PollDriver::run(render)        (sweeps every poll_interval)
//!       ├──► spawn DeadlineDriver::run(reject)    (armed at page-complete)
//!       ├──► resolve()                            (before returning)
//!       └──► SessionHandle                        (observe / await / cancel)
//!
//! Event flow (as wired here):
//!   drivers ── publish(Event) ──► Bus ──► Gate listener ──► SubscriberSet::emit_arc
//!                                                      ┌─────────┬─────────┐
//!                                                      ▼         ▼         ▼
//!                                               [queue S1] [queue S2] ... [queue SN]
//!                                                      │         │         │
//!                                               worker S1 worker S2 ... worker SN
//!                                                      │         │         │
//!                                             sub.on_event(&Event) (per subscriber)
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use rendergate::{Config, Document, FakePage, GateBuilder, Outcome, WaitSpec};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let page = Arc::new(FakePage::new());
//!     let gate = GateBuilder::new(Config::default(), Arc::clone(&page) as Arc<dyn Document>)
//!         .build();
//!
//!     let mut session = gate.wait_for_exist(
//!         WaitSpec::selectors(["#hero"]).with_variant("exp-1"),
//!         || Ok(()), // mutate the page here
//!         || println!("session registered"),
//!         |notice| eprintln!("{notice}"),
//!     );
//!
//!     page.add_element("#hero");
//!     assert_eq!(session.finished().await, Outcome::Satisfied);
//! }
//! ```

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::conditions::WaitSpec;
use crate::core::config::Config;
use crate::core::guard::RunGuard;
use crate::core::lifecycle::DocLifecycle;
use crate::core::poller::{DeadlineDriver, PollDriver};
use crate::core::session::{SessionHandle, SessionState};
use crate::dom::Document;
use crate::error::{RenderError, TimeoutNotice};
use crate::events::{Bus, Event, EventKind};
use crate::subscribers::SubscriberSet;

/// Coordinates waiting sessions, event delivery (via [`SubscriberSet`]), and
/// page-lifecycle waits.
///
/// Build one via [`GateBuilder`](crate::GateBuilder).
pub struct Gate {
    cfg: Config,
    doc: Arc<dyn Document>,
    bus: Bus,
    subs: Arc<SubscriberSet>,
    lifecycle: DocLifecycle,
    guard: RunGuard,
}

impl Gate {
    /// Creates a [`GateBuilder`](crate::GateBuilder) over the given page.
    pub fn builder(cfg: Config, doc: Arc<dyn Document>) -> super::builder::GateBuilder {
        super::builder::GateBuilder::new(cfg, doc)
    }

    pub(crate) fn new_internal(
        cfg: Config,
        doc: Arc<dyn Document>,
        bus: Bus,
        subs: Arc<SubscriberSet>,
    ) -> Self {
        let lifecycle = DocLifecycle::new(Arc::clone(&doc), cfg.next_tick);
        let guard = RunGuard::new(Arc::clone(&doc));
        Self {
            cfg,
            doc,
            bus,
            subs,
            lifecycle,
            guard,
        }
    }

    /// Registers a waiting session: polls `spec`'s conditions and runs
    /// `render` once they are all met.
    ///
    /// ### Flow
    /// 1. Resolve per-wait overrides against the config defaults
    /// 2. Publish `SessionRegistered` and spawn the two drivers
    /// 3. Call `resolve()` (synchronously, before this method returns)
    /// 4. Return a [`SessionHandle`] for observation and cancellation
    ///
    /// ### Callback semantics
    /// - `render` runs **at most once**, on the driver task, after every
    ///   condition passed a sweep. Its error closes the session as
    ///   contaminated.
    /// - `resolve` confirms registration; it does **not** mean the
    ///   conditions were met.
    /// - `reject` runs at most once, only if the deadline fires first. The
    ///   deadline is measured from the page's complete state, not from this
    ///   call.
    ///
    /// ### Timing
    /// The first sweep happens one `poll_interval` after registration;
    /// conditions already satisfied now are acted on within one interval.
    pub fn wait_for_exist<R, S, J>(
        &self,
        spec: WaitSpec,
        render: R,
        resolve: S,
        reject: J,
    ) -> SessionHandle
    where
        R: FnOnce() -> Result<(), RenderError> + Send + 'static,
        S: FnOnce(),
        J: FnOnce(TimeoutNotice) + Send + 'static,
    {
        let (conditions, variant, timeout, clear) = spec.into_parts();
        let timeout = self.cfg.effective_timeout(timeout);
        let clear_on_timeout = self.cfg.effective_clear_on_timeout(clear);
        let count = conditions.len() as u32;

        let variant: Arc<str> = Arc::from(variant.as_ref());
        let state = Arc::new(SessionState::new(
            Arc::clone(&variant),
            conditions,
            self.bus.clone(),
        ));

        self.bus.publish(
            Event::new(EventKind::SessionRegistered)
                .with_variant(Arc::clone(&variant))
                .with_timeout(timeout)
                .with_remaining(count),
        );

        tokio::spawn(
            PollDriver {
                state: Arc::clone(&state),
                doc: Arc::clone(&self.doc),
                interval: self.cfg.poll_interval_clamped(),
            }
            .run(Box::new(render)),
        );
        tokio::spawn(
            DeadlineDriver {
                state: Arc::clone(&state),
                lifecycle: self.lifecycle.clone(),
                timeout,
                clear_on_timeout,
            }
            .run(Box::new(reject)),
        );

        let handle = SessionHandle::new(state);
        resolve();
        handle
    }

    /// Runs `apply` unless `marker` is already present on the page's root
    /// element. See [`RunGuard`].
    ///
    /// Returns `true` if the mutation ran.
    pub fn run_variant(&self, marker: &str, apply: impl FnOnce()) -> bool {
        self.guard.run(marker, apply)
    }

    /// Completes when the page is interactive or later.
    ///
    /// Defers by one tick if the page is already there.
    pub async fn doc_ready(&self) {
        self.lifecycle.ready().await;
    }

    /// Completes when the page is complete.
    ///
    /// Defers by one tick if the page is already there.
    pub async fn doc_complete(&self) {
        self.lifecycle.complete().await;
    }

    /// Runs `f` once the page is interactive or later.
    pub fn on_doc_ready(&self, f: impl FnOnce() + Send + 'static) {
        let lifecycle = self.lifecycle.clone();
        tokio::spawn(async move {
            lifecycle.ready().await;
            f();
        });
    }

    /// Runs `f` once the page is complete.
    pub fn on_doc_complete(&self, f: impl FnOnce() + Send + 'static) {
        let lifecycle = self.lifecycle.clone();
        tokio::spawn(async move {
            lifecycle.complete().await;
            f();
        });
    }

    /// Publishes a standalone `SelectorTimeout` report, outside any session.
    ///
    /// Lets callers funnel timeout messages from elsewhere into the same
    /// subscriber pipeline.
    pub fn emit_selector_timeout(&self, message: impl Into<Arc<str>>) {
        self.bus
            .publish(Event::new(EventKind::SelectorTimeout).with_reason(message));
    }

    /// Creates a receiver for the gate's event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// The gate's configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Subscribes to the bus and forwards events to the subscriber set
    /// (fire-and-forget).
    pub(crate) fn subscriber_listener(&self) {
        let mut rx = self.bus.subscribe();
        let set = Arc::clone(&self.subs);
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(ev) => set.emit_arc(Arc::new(ev)),
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }
}
