#![cfg_attr(not(test), no_std)]

//! nvparam - Typed parameters over a flash-backed key/value store
//!
//! Devices keep configuration, schedules and runtime state in NVS
//! namespaces. This crate persists [`Value`]s under `(namespace, key)` with
//! the read/write protocol in [`crate::core::parameters`], on top of any
//! [`NvsBackend`](platform::NvsBackend).
//!
//! Value and time codecs live in the `nvparam_core` crate and are re-exported
//! here.

extern crate alloc;

// Storage backends, traits and errors
pub mod platform;

// Logging and the parameter store
pub mod core;

pub use nvparam_core::time::{self, TimeOfDay, TimeWindow};
pub use nvparam_core::traits::{MockClock, WallClock};
pub use nvparam_core::value::{self, Value, ValueError, ValueKind};
