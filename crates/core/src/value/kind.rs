//! Value kinds
//!
//! The closed set of representations a parameter can take. Adding a kind
//! means extending every match in [`super`], the compiler points at each one.

use super::error::ValueError;
use bitflags::bitflags;

bitflags! {
    /// Static properties of a value kind
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct KindFlags: u8 {
        /// Ordered numeric kind, supports min/max bounds
        const NUMERIC = 0b0001;
        /// Signed representation
        const SIGNED = 0b0010;
        /// IEEE-754 floating point
        const FLOAT = 0b0100;
        /// Fixed native width (everything except strings)
        const FIXED_SIZE = 0b1000;
    }
}

/// Value kind tag
///
/// Numeric codes match the parameter tables of existing devices
/// (0 is reserved for "unknown").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ValueKind {
    /// 8-bit signed integer
    I8 = 1,
    /// 8-bit unsigned integer
    U8 = 2,
    /// 16-bit signed integer
    I16 = 3,
    /// 16-bit unsigned integer
    U16 = 4,
    /// 32-bit signed integer
    I32 = 5,
    /// 32-bit unsigned integer
    U32 = 6,
    /// 64-bit signed integer
    I64 = 7,
    /// 64-bit unsigned integer
    U64 = 8,
    /// 32-bit floating point
    F32 = 9,
    /// 64-bit floating point
    F64 = 10,
    /// UTF-8 string
    Str = 11,
    /// Time of day (`hour * 100 + minute`)
    Time = 12,
    /// Daily window (`start * 10000 + end`)
    Window = 13,
}

impl ValueKind {
    /// All kinds, in code order
    pub const ALL: [ValueKind; 13] = [
        ValueKind::I8,
        ValueKind::U8,
        ValueKind::I16,
        ValueKind::U16,
        ValueKind::I32,
        ValueKind::U32,
        ValueKind::I64,
        ValueKind::U64,
        ValueKind::F32,
        ValueKind::F64,
        ValueKind::Str,
        ValueKind::Time,
        ValueKind::Window,
    ];

    /// Stable numeric code
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Static properties of this kind
    pub fn flags(self) -> KindFlags {
        let int = KindFlags::NUMERIC | KindFlags::FIXED_SIZE;
        match self {
            ValueKind::I8 | ValueKind::I16 | ValueKind::I32 | ValueKind::I64 => {
                int | KindFlags::SIGNED
            }
            ValueKind::U8 | ValueKind::U16 | ValueKind::U32 | ValueKind::U64 => int,
            ValueKind::F32 | ValueKind::F64 => int | KindFlags::SIGNED | KindFlags::FLOAT,
            ValueKind::Str => KindFlags::empty(),
            ValueKind::Time | ValueKind::Window => KindFlags::FIXED_SIZE,
        }
    }

    /// Whether min/max bounds apply to this kind
    pub fn is_numeric(self) -> bool {
        self.flags().contains(KindFlags::NUMERIC)
    }

    /// Size in bytes of the native representation, `None` for strings
    pub fn native_size(self) -> Option<usize> {
        match self {
            ValueKind::I8 | ValueKind::U8 => Some(1),
            ValueKind::I16 | ValueKind::U16 | ValueKind::Time => Some(2),
            ValueKind::I32 | ValueKind::U32 | ValueKind::F32 | ValueKind::Window => Some(4),
            ValueKind::I64 | ValueKind::U64 | ValueKind::F64 => Some(8),
            ValueKind::Str => None,
        }
    }

    /// Short lowercase name, used in log lines
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::I8 => "i8",
            ValueKind::U8 => "u8",
            ValueKind::I16 => "i16",
            ValueKind::U16 => "u16",
            ValueKind::I32 => "i32",
            ValueKind::U32 => "u32",
            ValueKind::I64 => "i64",
            ValueKind::U64 => "u64",
            ValueKind::F32 => "float",
            ValueKind::F64 => "double",
            ValueKind::Str => "string",
            ValueKind::Time => "time",
            ValueKind::Window => "timespan",
        }
    }
}

impl TryFrom<u8> for ValueKind {
    type Error = ValueError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        ValueKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.code() == code)
            .ok_or(ValueError::UnknownKind(code))
    }
}

impl core::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for kind in ValueKind::ALL {
            assert_eq!(ValueKind::try_from(kind.code()), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(ValueKind::try_from(0), Err(ValueError::UnknownKind(0)));
        assert_eq!(ValueKind::try_from(14), Err(ValueError::UnknownKind(14)));
    }

    #[test]
    fn test_numeric_kinds() {
        assert!(ValueKind::U8.is_numeric());
        assert!(ValueKind::F64.is_numeric());
        assert!(!ValueKind::Str.is_numeric());
        assert!(!ValueKind::Time.is_numeric());
        assert!(!ValueKind::Window.is_numeric());
        assert!(ValueKind::F32.flags().contains(KindFlags::FLOAT));
        assert!(!ValueKind::U32.flags().contains(KindFlags::SIGNED));
    }

    #[test]
    fn test_native_size() {
        assert_eq!(ValueKind::I8.native_size(), Some(1));
        assert_eq!(ValueKind::Time.native_size(), Some(2));
        assert_eq!(ValueKind::Window.native_size(), Some(4));
        assert_eq!(ValueKind::F64.native_size(), Some(8));
        assert_eq!(ValueKind::Str.native_size(), None);
    }
}
