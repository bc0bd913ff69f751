//! # Conditions and wait specifications.
//!
//! This module provides the registration-side types:
//! - [`Condition`] - tagged readiness condition (selector / alternatives / predicate)
//! - [`PredicateFn`] - shared predicate closure type
//! - [`WaitSpec`] - bundle of conditions plus per-call overrides

mod condition;
mod spec;

pub use condition::{Condition, PredicateFn};
pub use spec::WaitSpec;
