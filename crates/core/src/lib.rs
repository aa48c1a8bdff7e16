//! nvparam_core - Pure no_std value codecs for nvparam
//!
//! This crate contains the platform-agnostic part of the parameter store:
//! the closed set of value kinds, their text codec and comparison rules,
//! and the time-of-day / daily window codec. Nothing here touches flash.
//!
//! # Design Principles
//!
//! - **Pure no_std**: only `core` and `alloc`
//! - **Closed kinds**: every operation is an exhaustive match over [`value::Value`]
//! - **Trait abstractions**: wall-clock time injected via [`traits::WallClock`]
//!
//! # Modules
//!
//! - [`value`]: Value kinds, tagged values, text encode/decode, bounds checks
//! - [`time`]: Time-of-day and daily window encoding with midnight wrap
//! - [`traits`]: Platform-agnostic trait abstractions (WallClock)

#![no_std]

extern crate alloc;

pub mod time;
pub mod traits;
pub mod value;

pub use time::{TimeOfDay, TimeWindow};
pub use value::{Value, ValueError, ValueKind};
