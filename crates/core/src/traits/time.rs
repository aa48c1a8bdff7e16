//! Wall-clock abstraction for schedule evaluation.
//!
//! Daily windows are evaluated against local time of day, which on a device
//! only exists once the clock has been set (RTC, SNTP, GPS). The
//! [`WallClock`] trait hides where that time comes from.

use crate::time::TimeOfDay;
use core::cell::Cell;

/// Source of local wall-clock time.
///
/// # Example
///
/// ```
/// use nvparam_core::time::{parse_time_window, TimeOfDay};
/// use nvparam_core::traits::{MockClock, WallClock};
///
/// fn heater_allowed<C: WallClock>(clock: &C) -> bool {
///     parse_time_window("22:00-07:00").contains_now(clock)
/// }
///
/// let clock = MockClock::new();
/// assert!(!heater_allowed(&clock)); // clock not set yet
///
/// clock.set_unix(23 * 3600);
/// assert_eq!(clock.time_of_day(), Some(TimeOfDay::new(23, 0)));
/// assert!(heater_allowed(&clock));
/// ```
pub trait WallClock {
    /// Seconds since the unix epoch, `None` until the clock is set.
    fn unix_time(&self) -> Option<i64>;

    /// Offset of local time from UTC in seconds.
    fn utc_offset_secs(&self) -> i32 {
        0
    }

    /// Current local time of day.
    fn time_of_day(&self) -> Option<TimeOfDay> {
        self.unix_time()
            .map(|secs| TimeOfDay::from_unix(secs, self.utc_offset_secs()))
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Mock clock with controllable time.
///
/// Starts unset, like a device that has not synchronized yet.
#[derive(Clone, Default)]
pub struct MockClock {
    unix: Cell<Option<i64>>,
    utc_offset: Cell<i32>,
}

impl MockClock {
    /// Creates an unset clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock already set to `unix_secs`.
    pub fn with_unix(unix_secs: i64) -> Self {
        let clock = Self::new();
        clock.set_unix(unix_secs);
        clock
    }

    /// Sets the current time to an absolute value.
    pub fn set_unix(&self, unix_secs: i64) {
        self.unix.set(Some(unix_secs));
    }

    /// Forgets the current time.
    pub fn clear(&self) {
        self.unix.set(None);
    }

    /// Advances a set clock; no-op while unset.
    pub fn advance_secs(&self, secs: i64) {
        if let Some(now) = self.unix.get() {
            self.unix.set(Some(now.saturating_add(secs)));
        }
    }

    /// Sets the local offset from UTC.
    pub fn set_utc_offset(&self, secs: i32) {
        self.utc_offset.set(secs);
    }
}

impl WallClock for MockClock {
    fn unix_time(&self) -> Option<i64> {
        self.unix.get()
    }

    fn utc_offset_secs(&self) -> i32 {
        self.utc_offset.get()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
