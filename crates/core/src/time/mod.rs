//! Time-of-day and daily window encoding
//!
//! Schedules are stored as compact integers so they fit a single NVS item:
//!
//! - [`TimeOfDay`]: `hour * 100 + minute` (`07:30` is `730`)
//! - [`TimeWindow`]: `start * 10000 + end` (`23:00-06:00` is `23000600`)
//!
//! Windows are half-open: the start minute is inside, the end minute is
//! outside. A window whose start is not before its end wraps past midnight.
//! The window end may be [`TimeOfDay::END_OF_DAY`] (`24:00`) to cover the
//! rest of the day without wrapping.

mod scan;

use crate::traits::time::WallClock;
use alloc::format;
use alloc::string::String;
use scan::Scanner;

/// Seconds in a day
const SECONDS_PER_DAY: i64 = 86_400;

/// Time of day encoded as `hour * 100 + minute`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// 00:00
    pub const MIDNIGHT: Self = Self(0);

    /// Last valid minute of the day, 23:59
    pub const LAST_MINUTE: Self = Self(2359);

    /// 24:00, only meaningful as the end of a window
    pub const END_OF_DAY: Self = Self(2400);

    /// Create a time of day, clamping hour to 23 and minute to 59
    pub fn new(hour: u32, minute: u32) -> Self {
        Self((100 * hour.min(23) + minute.min(59)) as u16)
    }

    /// Wrap an encoded value as stored, without validation
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Encoded value
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Hour component
    pub const fn hour(self) -> u16 {
        self.0 / 100
    }

    /// Minute component
    pub const fn minute(self) -> u16 {
        self.0 % 100
    }

    /// Whether this is the 24:00 sentinel
    pub const fn is_end_of_day(self) -> bool {
        self.0 == Self::END_OF_DAY.0
    }

    /// Local time of day for a unix timestamp
    ///
    /// Seconds are dropped. `utc_offset_secs` is added before reducing to the
    /// day, so negative offsets and pre-1970 instants work.
    ///
    /// # Example
    ///
    /// ```
    /// use nvparam_core::time::TimeOfDay;
    ///
    /// // 2021-06-01 21:15:42 UTC, three hours east
    /// let t = TimeOfDay::from_unix(1_622_582_142, 3 * 3600);
    /// assert_eq!(t, TimeOfDay::new(0, 15));
    /// ```
    pub fn from_unix(unix_secs: i64, utc_offset_secs: i32) -> Self {
        let local = unix_secs.wrapping_add(utc_offset_secs as i64);
        let second_of_day = local.rem_euclid(SECONDS_PER_DAY);
        let hour = (second_of_day / 3600) as u32;
        let minute = ((second_of_day % 3600) / 60) as u32;
        Self::new(hour, minute)
    }
}

impl core::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Daily window encoded as `start * 10000 + end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeWindow(u32);

impl TimeWindow {
    /// Create a window from its bounds
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self(start.raw() as u32 * 10_000 + end.raw() as u32)
    }

    /// Wrap an encoded value as stored, without validation
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Encoded value
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Window start (inclusive)
    pub fn start(self) -> TimeOfDay {
        TimeOfDay::from_raw((self.0 / 10_000) as u16)
    }

    /// Window end (exclusive)
    pub fn end(self) -> TimeOfDay {
        TimeOfDay::from_raw((self.0 % 10_000) as u16)
    }

    /// Whether the window crosses midnight
    pub fn wraps_midnight(self) -> bool {
        self.start() >= self.end()
    }

    /// Whether `now` falls inside the window
    pub fn contains(self, now: TimeOfDay) -> bool {
        is_within_window(now, self)
    }

    /// Whether the clock's current local time falls inside the window
    ///
    /// Returns `false` while the clock is not set.
    pub fn contains_now<C: WallClock>(self, clock: &C) -> bool {
        clock
            .time_of_day()
            .is_some_and(|now| is_within_window(now, self))
    }
}

impl core::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let (start, end) = if self.0 > 0 {
            (self.start(), self.end())
        } else {
            (TimeOfDay::MIDNIGHT, TimeOfDay::MIDNIGHT)
        };
        write!(f, "{}-{}", start, end)
    }
}

/// Parse `H:MM`; missing fields read as zero, out-of-range fields clamp
///
/// Any single character separates hour and minute.
///
/// # Example
///
/// ```
/// use nvparam_core::time::{format_time_of_day, parse_time_of_day};
///
/// let t = parse_time_of_day("25:99");
/// assert_eq!(format_time_of_day(t), "23:59");
/// ```
pub fn parse_time_of_day(text: &str) -> TimeOfDay {
    let mut scan = Scanner::new(text);
    let hour = scan.number();
    let minute = if hour.is_some() && scan.any_char().is_some() {
        scan.number()
    } else {
        None
    };
    TimeOfDay::new(hour.unwrap_or(0), minute.unwrap_or(0))
}

/// Render as zero-padded `HH:MM`
pub fn format_time_of_day(t: TimeOfDay) -> String {
    format!("{}", t)
}

/// Parse `H:MM-H:MM`
///
/// Start fields clamp to 23/59. An end hour of 24 or more becomes the
/// 24:00 end-of-day sentinel (minute forced to 0); otherwise the end minute
/// clamps to 59.
pub fn parse_time_window(text: &str) -> TimeWindow {
    let mut scan = Scanner::new(text);
    let mut fields = [0u32; 4];
    for (index, field) in fields.iter_mut().enumerate() {
        if index > 0 && scan.any_char().is_none() {
            break;
        }
        match scan.number() {
            Some(n) => *field = n,
            None => break,
        }
    }
    let [h1, m1, h2, m2] = fields;

    let start = TimeOfDay::new(h1, m1);
    let end = if h2 >= 24 {
        TimeOfDay::END_OF_DAY
    } else {
        TimeOfDay::new(h2, m2)
    };
    TimeWindow::new(start, end)
}

/// Render as `HH:MM-HH:MM`; an all-zero window renders `00:00-00:00`
pub fn format_time_window(window: TimeWindow) -> String {
    format!("{}", window)
}

/// Whether `now` falls inside `window`
///
/// Non-wrapping (`start < end`): `start <= now < end`.
/// Wrapping (`start >= end`): everything except `end <= now < start`.
///
/// # Example
///
/// ```
/// use nvparam_core::time::{is_within_window, parse_time_window, TimeOfDay};
///
/// let night = parse_time_window("23:00-06:00");
/// assert!(is_within_window(TimeOfDay::new(23, 0), night));
/// assert!(is_within_window(TimeOfDay::new(5, 59), night));
/// assert!(!is_within_window(TimeOfDay::new(6, 0), night));
/// ```
pub fn is_within_window(now: TimeOfDay, window: TimeWindow) -> bool {
    let t0 = now.raw();
    let start = window.start().raw();
    let end = window.end().raw();
    if start < end {
        t0 >= start && t0 < end
    } else {
        !(t0 >= end && start > t0)
    }
}
