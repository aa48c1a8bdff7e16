//! Platform abstraction traits
//!
//! This module defines the storage interfaces the parameter layer runs on.

pub mod flash;
pub mod nvs;

pub use flash::FlashInterface;
pub use nvs::{NvsBackend, NvsHandle, OpenMode};
