//! Parameter persistence
//!
//! [`ParamStore`] reads and writes typed [`Value`](nvparam_core::Value)s in
//! NVS namespaces. [`compat`] holds the bit-pattern accessors for floats,
//! doubles and timestamps.

pub mod compat;
pub mod store;

#[cfg(test)]
mod tests;

pub use store::{Namespace, ParamStore};
