//! # Document abstraction.
//!
//! The runtime's only environment dependency, kept behind a seam:
//! - [`Document`] - readiness source plus the DOM capabilities the engine uses
//! - [`ReadyState`] - ordered load phases
//! - [`FakePage`] - in-memory implementation for tests and demos

mod document;
mod fake;

pub use document::{Document, ReadyState};
pub use fake::FakePage;
