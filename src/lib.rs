//! # rendergate
//!
//! **Rendergate** is a small runtime for condition-gated page mutations.
//!
//! It provides primitives to defer a mutation (a "render") until a set of
//! conditions holds on a page: selectors existing, predicates passing, the
//! document reaching a ready state. Sessions that run out of time or whose
//! render fails are closed and reported, so a variant is either applied
//! cleanly or accounted for. The crate is designed as a building block for
//! experimentation engines and render-orchestration layers.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   WaitSpec   │   │   WaitSpec   │   │   WaitSpec   │
//!     │ (variant #1) │   │ (variant #2) │   │ (variant #3) │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Gate (runtime orchestrator)                                      │
//! │  - Bus (broadcast events)                                         │
//! │  - SubscriberSet (fans out to user subscribers)                   │
//! │  - DocLifecycle (waits on the page's ready state)                 │
//! │  - RunGuard (at-most-once mutations via root markers)             │
//! └──────┬──────────────────┬──────────────────┬───────────────┬──────┘
//!        ▼                  ▼                  ▼               │
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   │
//!     │   Session    │   │   Session    │   │   Session    │   │
//!     │ (poll+deadl.)│   │ (poll+deadl.)│   │ (poll+deadl.)│   │
//!     └┬─────────────┘   └┬─────────────┘   └┬─────────────┘   │
//!      │                  │                  │                 │
//!      │ Publishes        │ Publishes        │ Publishes       │
//!      │ Events:          │ Events:          │ Events:         │
//!      │ - ConditionMet   │ - VariantApplied │ - SelectorTime. │
//!      │ - VariantContam. │ - SessionCancel. │ - ...           │
//!      │                  │                  │                 │
//!      ▼                  ▼                  ▼                 ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                        Bus (broadcast channel)                    │
//! │                   (capacity: Config::bus_capacity)                │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                       ┌────────────────────────┐
//!                       │  subscriber_listener   │
//!                       │      (in Gate)         │
//!                       └───────────┬────────────┘
//!                                   ▼
//!                             SubscriberSet
//!                            (per-sub queues)
//!                          ┌─────────┼─────────┐
//!                          ▼         ▼         ▼
//!                          worker1  worker2  workerN
//!                          ▼         ▼         ▼
//!                     sub1.on   sub2.on   subN.on
//!                      _event()  _event()  _event()
//! ```
//!
//! ### Lifecycle
//! ```text
//! WaitSpec ──► Gate::wait_for_exist(spec, render, resolve, reject)
//!
//!   ├─► publish SessionRegistered
//!   ├─► spawn poll driver + deadline driver (race over the phase)
//!   ├─► resolve()                     (before the call returns)
//!   └─► SessionHandle                 (observe / await / cancel)
//!
//! poll driver:                         deadline driver:
//! loop {                               wait page-complete
//!   ├─► sleep(poll_interval)           sleep(timeout)
//!   └─► sweep conditions               claim ─► publish SelectorTimeout
//!         ├─ met ─► ConditionMet              ├─► [clear] stop polling
//!         └─ all met:                         └─► reject(notice)
//!              claim render slot
//!              ├─ Ok  ─► VariantApplied      ─► Done(Satisfied)
//!              └─ Err ─► VariantContaminated ─► Done(RenderFailed)
//! }
//!
//! Exactly one of render / timeout / cancel claims the session; the
//! losers stand down. Done is terminal.
//! ```
//!
//! ## Features
//! | Area              | Description                                                             | Key types / traits                       |
//! |-------------------|-------------------------------------------------------------------------|------------------------------------------|
//! | **Waiting API**   | Register gated renders and observe or cancel them.                      | [`Gate`], [`WaitSpec`], [`SessionHandle`]|
//! | **Conditions**    | Selector, selector-list and predicate conditions.                       | [`Condition`]                            |
//! | **Page handles**  | Abstract page surface; a controllable fake for tests and demos.         | [`Document`], [`ReadyState`], [`FakePage`]|
//! | **Subscriber API**| Hook into session lifecycle events (logging, metrics, custom subscribers).| [`Subscribe`]                          |
//! | **One-shot guard**| Apply a mutation at most once per page.                                 | [`RunGuard`]                             |
//! | **Errors**        | Typed errors for renders and timeout notices.                           | [`RenderError`], [`TimeoutNotice`]       |
//! | **Configuration** | Centralize runtime settings.                                            | [`Config`]                               |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`ConsoleWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use rendergate::{Config, Document, FakePage, Gate, Outcome, WaitSpec};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let mut cfg = Config::default();
//!     cfg.poll_interval = Duration::from_millis(25);
//!
//!     // Build subscribers (optional)
//!     #[cfg(feature = "logging")]
//!     let subs: Vec<Arc<dyn rendergate::Subscribe>> = {
//!         use rendergate::ConsoleWriter;
//!         vec![Arc::new(ConsoleWriter::default())]
//!     };
//!     #[cfg(not(feature = "logging"))]
//!     let subs: Vec<Arc<dyn rendergate::Subscribe>> = Vec::new();
//!
//!     // A controllable page; production code implements `Document` over a
//!     // real page handle.
//!     let page = Arc::new(FakePage::new());
//!
//!     let gate = Gate::builder(cfg, Arc::clone(&page) as Arc<dyn Document>)
//!         .with_subscribers(subs)
//!         .build();
//!
//!     // Defer a render until "#hero" exists.
//!     let mut session = gate.wait_for_exist(
//!         WaitSpec::selectors(["#hero"]).with_variant("hero-1"),
//!         || Ok(()), // apply the page mutation here
//!         || {},
//!         |notice| eprintln!("{notice}"),
//!     );
//!
//!     // The element shows up; the next sweep applies the variant.
//!     page.add_element("#hero");
//!     assert_eq!(session.finished().await, Outcome::Satisfied);
//! }
//! ```
mod conditions;
mod core;
mod dom;
mod error;
mod events;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::{Config, Gate, GateBuilder, Outcome, RunGuard, SessionHandle};
pub use conditions::{Condition, PredicateFn, WaitSpec};
pub use dom::{Document, FakePage, ReadyState};
pub use error::{RenderError, TimeoutNotice};
pub use events::{Bus, Event, EventKind};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in console subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::ConsoleWriter;
