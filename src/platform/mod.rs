//! Storage platform layer
//!
//! Backend traits, error types and the backends shipped with the crate.

pub mod error;
pub mod flash_nvs;
pub mod item;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{FlashError, NvsError, Result};
pub use flash_nvs::{FlashNvs, FlashNvsConfig};
pub use traits::{FlashInterface, NvsBackend, NvsHandle, OpenMode};
