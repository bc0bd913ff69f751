//! Runtime core: orchestration and session lifecycle.
//!
//! This module contains the embedded implementation of the rendergate
//! runtime. The public API from this module is [`Gate`] (built via
//! [`GateBuilder`]), plus the session handle and outcome types it hands out.
//!
//! Internal modules:
//! - [`gate`]: registers sessions, spawns drivers, fans out events;
//! - [`poller`]: the per-session poll and deadline driver tasks;
//! - [`sweep`]: one condition sweep with event publishing;
//! - [`session`]: shared phase machine, outcome, caller-side handle;
//! - [`lifecycle`]: async waits over the page's ready state;
//! - [`guard`]: at-most-once page mutations keyed on a root marker;
//! - [`config`]: runtime defaults and per-wait fallbacks.

mod builder;
mod config;
mod gate;
mod guard;
mod lifecycle;
mod poller;
mod session;
mod sweep;

pub use builder::GateBuilder;
pub use config::Config;
pub use gate::Gate;
pub use guard::RunGuard;
pub use session::{Outcome, SessionHandle};
