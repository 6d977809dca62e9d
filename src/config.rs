//! # Crate-wide defaults.
//!
//! Provides [`Config`] centralized settings for test sinks and trackers.
//!
//! Config is used in two ways:
//! 1. **Test sinks**: `TestSink::with_config(&config)` picks up wait windows
//! 2. **Trackers**: `Tracker::with_config(&config)` pre-sizes entry storage
//!
//! ## Sentinel values
//! - `terminal_timeout = 0s` → wait for a terminal event without a deadline
//! - `tracker_capacity = 0` → no preallocation

use std::time::Duration;

/// Defaults shared by [`TestSink`](crate::TestSink) and [`Tracker`](crate::Tracker).
///
/// ## Field semantics
/// - `terminal_timeout`: how long `await_terminal_event` waits (`0s` = forever)
/// - `quiet_window`: how long `assert_quiet` watches for a terminal event
/// - `tracker_capacity`: initial entry capacity of a tracker (`0` = none)
#[derive(Clone, Debug)]
pub struct Config {
    /// Default deadline for [`TestSink::await_terminal_event`](crate::TestSink::await_terminal_event).
    pub terminal_timeout: Duration,

    /// Window during which [`TestSink::assert_quiet`](crate::TestSink::assert_quiet)
    /// expects no terminal callback ("never completes").
    pub quiet_window: Duration,

    /// Initial capacity of a tracker's weak-entry storage.
    pub tracker_capacity: usize,
}

impl Config {
    /// Returns the terminal wait deadline as an `Option`.
    ///
    /// - `None` → wait without a deadline
    /// - `Some(d)` → give up after `d`
    #[inline]
    pub fn terminal_deadline(&self) -> Option<Duration> {
        if self.terminal_timeout == Duration::ZERO {
            None
        } else {
            Some(self.terminal_timeout)
        }
    }

    /// Returns the tracker capacity as an `Option`.
    #[inline]
    pub fn tracker_capacity_hint(&self) -> Option<usize> {
        if self.tracker_capacity == 0 {
            None
        } else {
            Some(self.tracker_capacity)
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `terminal_timeout = 5s`
    /// - `quiet_window = 1s`
    /// - `tracker_capacity = 0` (grow on demand)
    fn default() -> Self {
        Self {
            terminal_timeout: Duration::from_secs(5),
            quiet_window: Duration::from_secs(1),
            tracker_capacity: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels() {
        let mut cfg = Config::default();
        assert_eq!(cfg.terminal_deadline(), Some(Duration::from_secs(5)));
        assert_eq!(cfg.tracker_capacity_hint(), None);

        cfg.terminal_timeout = Duration::ZERO;
        cfg.tracker_capacity = 16;
        assert_eq!(cfg.terminal_deadline(), None);
        assert_eq!(cfg.tracker_capacity_hint(), Some(16));
    }
}
