//! Trait abstractions for platform services.
//!
//! # Design
//!
//! - Trait definitions are pure and have no feature gates
//! - Mock implementations are always available for host testing
//! - Device implementations (RTC, SNTP-backed clocks) live with the firmware

pub mod time;

pub use time::{MockClock, WallClock};
