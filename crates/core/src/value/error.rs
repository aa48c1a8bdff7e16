//! Value codec error types

use super::kind::ValueKind;

/// Errors from value codec operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValueError {
    /// Numeric kind code outside the known set
    UnknownKind(u8),
    /// Operation mixed two different kinds
    KindMismatch {
        /// Kind of the destination
        expected: ValueKind,
        /// Kind that was supplied
        found: ValueKind,
    },
}

impl core::fmt::Display for ValueError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ValueError::UnknownKind(code) => write!(f, "unknown value kind {}", code),
            ValueError::KindMismatch { expected, found } => {
                write!(f, "kind mismatch: expected {}, found {}", expected, found)
            }
        }
    }
}
