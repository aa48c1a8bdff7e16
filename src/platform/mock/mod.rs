//! Mock storage backends for testing
//!
//! Available in test builds and with the `mock` feature.

#![cfg(any(test, feature = "mock"))]

mod flash;
mod nvs;

pub use flash::MockFlash;
pub use nvs::{MockNvs, NvsOp};
