//! Parameter persistence
//!
//! The parameter store and the logging macros it reports through.

pub mod logging;
pub mod parameters;
