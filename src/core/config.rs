//! # Global runtime configuration.
//!
//! Provides [`Config`] centralized settings for the gate runtime.
//!
//! Config is used in two ways:
//! 1. **Gate creation**: `GateBuilder::new(config, page)`
//! 2. **Per-wait defaults**: `WaitSpec` fields left unset fall back to these values
//!
//! ## Sentinel values
//! - `WaitSpec::timeout = None` → `Config::timeout` applies
//! - `WaitSpec::clear_on_timeout = None` → `Config::clear_on_timeout` applies

use std::time::Duration;

/// Global configuration for the gate runtime.
///
/// Defines:
/// - **Polling cadence**: interval between condition sweeps
/// - **Deadline behavior**: default timeout and what happens to polling after it
/// - **Scheduling**: the one-tick deferral used for already-reached page states
/// - **Event system**: bus capacity for event delivery
///
/// ## Field semantics
/// - `poll_interval`: Sleep between condition sweeps (min 1ms; clamped)
/// - `timeout`: Default deadline per wait, measured from page-complete
/// - `clear_on_timeout`: Whether the deadline stops polling when it fires
/// - `next_tick`: Deferral applied when a page state is already reached
/// - `bus_capacity`: Event bus ring buffer size (min 1; clamped by Bus)
///
/// ## Notes
/// All fields are public for flexibility. Prefer using helper accessors to avoid
/// sprinkling sentinel checks across the codebase.
#[derive(Clone, Debug)]
pub struct Config {
    /// Interval between condition sweeps.
    ///
    /// Each session sleeps this long, then checks its outstanding conditions.
    /// The first sweep happens one interval after registration, so a condition
    /// already satisfied at call time is detected within one interval.
    pub poll_interval: Duration,

    /// Default deadline for a wait.
    ///
    /// Counted from the moment the page reaches the complete state, not from
    /// registration. Overridable per wait via `WaitSpec::with_timeout`.
    pub timeout: Duration,

    /// Whether the deadline stops the session's polling when it fires.
    ///
    /// With `false`, polling keeps running after the timeout was reported;
    /// the session is already closed, so later sweeps can no longer apply
    /// the variant. Overridable per wait via `WaitSpec::with_clear_on_timeout`.
    pub clear_on_timeout: bool,

    /// Deferral used when a waited-for page state is already reached.
    ///
    /// Keeps "wait for ready" callbacks asynchronous even when the page is
    /// ready at call time.
    pub next_tick: Duration,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Slow subscribers that lag behind more than `bus_capacity` messages will
    /// receive `Lagged` and skip older items. Minimum value is 1 (enforced by Bus).
    pub bus_capacity: usize,
}

impl Config {
    /// Returns the poll interval clamped to a minimum of 1ms.
    ///
    /// A zero interval would turn the sweep loop into a busy spin.
    #[inline]
    pub fn poll_interval_clamped(&self) -> Duration {
        self.poll_interval.max(Duration::from_millis(1))
    }

    /// Returns the deadline for a wait, preferring the per-wait override.
    #[inline]
    pub fn effective_timeout(&self, per_wait: Option<Duration>) -> Duration {
        per_wait.unwrap_or(self.timeout)
    }

    /// Returns the clear-on-timeout flag for a wait, preferring the per-wait
    /// override.
    #[inline]
    pub fn effective_clear_on_timeout(&self, per_wait: Option<bool>) -> bool {
        per_wait.unwrap_or(self.clear_on_timeout)
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    ///
    /// The `Bus` should use this value to avoid constructing an invalid channel.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `poll_interval = 100ms` (checks conditions ten times a second)
    /// - `timeout = 60s` (deadline counted from page-complete)
    /// - `clear_on_timeout = true` (polling stops when the deadline fires)
    /// - `next_tick = 1ms` (smallest deferral that stays off the current tick)
    /// - `bus_capacity = 1024` (good baseline)
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            timeout: Duration::from_secs(60),
            clear_on_timeout: true,
            next_tick: Duration::from_millis(1),
            bus_capacity: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.poll_interval, Duration::from_millis(100));
        assert_eq!(cfg.timeout, Duration::from_secs(60));
        assert!(cfg.clear_on_timeout);
    }

    #[test]
    fn test_effective_values_prefer_override() {
        let cfg = Config::default();
        assert_eq!(
            cfg.effective_timeout(Some(Duration::from_millis(250))),
            Duration::from_millis(250)
        );
        assert_eq!(cfg.effective_timeout(None), Duration::from_secs(60));
        assert!(!cfg.effective_clear_on_timeout(Some(false)));
        assert!(cfg.effective_clear_on_timeout(None));
    }

    #[test]
    fn test_clamps() {
        let cfg = Config {
            poll_interval: Duration::ZERO,
            bus_capacity: 0,
            ..Config::default()
        };
        assert_eq!(cfg.poll_interval_clamped(), Duration::from_millis(1));
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }
}
