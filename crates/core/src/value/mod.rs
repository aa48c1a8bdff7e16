//! Typed parameter values
//!
//! A [`Value`] is a tagged union with one variant per [`ValueKind`], so the
//! kind a caller asserts and the payload it holds can never disagree. The
//! free functions at the bottom of this module mirror the parameter API used
//! by existing device firmware, where any side may be absent.
//!
//! # Text format
//!
//! | Kind | Text |
//! |------|------|
//! | integers | decimal (`0x`/octal accepted on input) |
//! | `F32`/`F64` | shortest decimal that round-trips |
//! | `Str` | verbatim |
//! | `Time` | `HH:MM` |
//! | `Window` | `HH:MM-HH:MM` |

mod error;
mod kind;
pub mod parse;

pub use error::ValueError;
pub use kind::{KindFlags, ValueKind};

use crate::time::{self, TimeOfDay, TimeWindow};
use alloc::string::{String, ToString};
use core::cmp::Ordering;

/// Parameter value
///
/// Equality is exact: floats compare with `==`, so `NaN != NaN` and
/// `0.0 == -0.0`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 8-bit signed integer
    I8(i8),
    /// 8-bit unsigned integer
    U8(u8),
    /// 16-bit signed integer
    I16(i16),
    /// 16-bit unsigned integer
    U16(u16),
    /// 32-bit signed integer
    I32(i32),
    /// 32-bit unsigned integer
    U32(u32),
    /// 64-bit signed integer
    I64(i64),
    /// 64-bit unsigned integer
    U64(u64),
    /// 32-bit floating point
    F32(f32),
    /// 64-bit floating point
    F64(f64),
    /// Owned UTF-8 string
    Str(String),
    /// Time of day
    Time(TimeOfDay),
    /// Daily window
    Window(TimeWindow),
}

impl Value {
    /// Kind tag of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::I8(_) => ValueKind::I8,
            Value::U8(_) => ValueKind::U8,
            Value::I16(_) => ValueKind::I16,
            Value::U16(_) => ValueKind::U16,
            Value::I32(_) => ValueKind::I32,
            Value::U32(_) => ValueKind::U32,
            Value::I64(_) => ValueKind::I64,
            Value::U64(_) => ValueKind::U64,
            Value::F32(_) => ValueKind::F32,
            Value::F64(_) => ValueKind::F64,
            Value::Str(_) => ValueKind::Str,
            Value::Time(_) => ValueKind::Time,
            Value::Window(_) => ValueKind::Window,
        }
    }

    /// Zero value of a kind (empty string, midnight, empty window)
    pub fn zero(kind: ValueKind) -> Self {
        match kind {
            ValueKind::I8 => Value::I8(0),
            ValueKind::U8 => Value::U8(0),
            ValueKind::I16 => Value::I16(0),
            ValueKind::U16 => Value::U16(0),
            ValueKind::I32 => Value::I32(0),
            ValueKind::U32 => Value::U32(0),
            ValueKind::I64 => Value::I64(0),
            ValueKind::U64 => Value::U64(0),
            ValueKind::F32 => Value::F32(0.0),
            ValueKind::F64 => Value::F64(0.0),
            ValueKind::Str => Value::Str(String::new()),
            ValueKind::Time => Value::Time(TimeOfDay::MIDNIGHT),
            ValueKind::Window => Value::Window(TimeWindow::from_raw(0)),
        }
    }

    /// Parse text into a value of the given kind
    ///
    /// Never fails: integers narrow with truncation after saturating at the
    /// 64-bit range, unparseable numbers become zero, times clamp.
    ///
    /// `I64` parses signed and saturates, so `"18446744073709551615"` reads
    /// as `i64::MAX` rather than wrapping to `-1` through an unsigned parse.
    pub fn from_text(kind: ValueKind, text: &str) -> Self {
        match kind {
            ValueKind::I8 => Value::I8(parse::parse_signed(text) as i8),
            ValueKind::U8 => Value::U8(parse::parse_unsigned(text) as u8),
            ValueKind::I16 => Value::I16(parse::parse_signed(text) as i16),
            ValueKind::U16 => Value::U16(parse::parse_unsigned(text) as u16),
            ValueKind::I32 => Value::I32(parse::parse_signed(text) as i32),
            ValueKind::U32 => Value::U32(parse::parse_unsigned(text) as u32),
            ValueKind::I64 => Value::I64(parse::parse_signed(text)),
            ValueKind::U64 => Value::U64(parse::parse_unsigned(text)),
            ValueKind::F32 => Value::F32(parse::parse_f32(text)),
            ValueKind::F64 => Value::F64(parse::parse_f64(text)),
            ValueKind::Str => Value::Str(String::from(text)),
            ValueKind::Time => Value::Time(time::parse_time_of_day(text)),
            ValueKind::Window => Value::Window(time::parse_time_window(text)),
        }
    }

    /// Render as text (see module docs for the format)
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// String payload, if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Overwrite this value with a copy of `src`
    ///
    /// The destination keeps its identity; for strings the old buffer is
    /// released once the copy is in place. Fails without touching `self`
    /// when the kinds differ.
    pub fn assign_from(&mut self, src: &Value) -> Result<(), ValueError> {
        if self.kind() != src.kind() {
            return Err(ValueError::KindMismatch {
                expected: self.kind(),
                found: src.kind(),
            });
        }
        *self = src.clone();
        Ok(())
    }

    /// Check `min <= self <= max` for numeric kinds
    ///
    /// A missing bound leaves that side open. Non-numeric kinds are always
    /// within bounds. A bound of another kind, or a NaN on either side,
    /// fails the check.
    pub fn within_bounds(&self, min: Option<&Value>, max: Option<&Value>) -> bool {
        if !self.kind().is_numeric() {
            return true;
        }
        let above_min = min.map_or(true, |min| {
            matches!(
                compare_numeric(self, min),
                Some(Ordering::Greater | Ordering::Equal)
            )
        });
        let below_max = max.map_or(true, |max| {
            matches!(
                compare_numeric(self, max),
                Some(Ordering::Less | Ordering::Equal)
            )
        });
        above_min && below_max
    }
}

/// Order two numeric values of the same kind
fn compare_numeric(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::I8(a), Value::I8(b)) => a.partial_cmp(b),
        (Value::U8(a), Value::U8(b)) => a.partial_cmp(b),
        (Value::I16(a), Value::I16(b)) => a.partial_cmp(b),
        (Value::U16(a), Value::U16(b)) => a.partial_cmp(b),
        (Value::I32(a), Value::I32(b)) => a.partial_cmp(b),
        (Value::U32(a), Value::U32(b)) => a.partial_cmp(b),
        (Value::I64(a), Value::I64(b)) => a.partial_cmp(b),
        (Value::U64(a), Value::U64(b)) => a.partial_cmp(b),
        (Value::F32(a), Value::F32(b)) => a.partial_cmp(b),
        (Value::F64(a), Value::F64(b)) => a.partial_cmp(b),
        _ => None,
    }
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::I8(v) => write!(f, "{}", v),
            Value::U8(v) => write!(f, "{}", v),
            Value::I16(v) => write!(f, "{}", v),
            Value::U16(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::U32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            Value::F32(v) => write!(f, "{}", v),
            Value::F64(v) => write!(f, "{}", v),
            Value::Str(s) => f.write_str(s),
            Value::Time(t) => write!(f, "{}", t),
            Value::Window(w) => write!(f, "{}", w),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Value {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.to_text().as_str());
    }
}

macro_rules! impl_from_native {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_native! {
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => Str,
    TimeOfDay => Time,
    TimeWindow => Window,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(String::from(s))
    }
}

/// Render a possibly absent value; absent input gives `None`
pub fn encode_to_text(value: Option<&Value>) -> Option<String> {
    value.map(Value::to_text)
}

/// Parse text into a freshly allocated value of `kind`
pub fn decode_from_text(kind: ValueKind, text: &str) -> Value {
    Value::from_text(kind, text)
}

/// Parse text for a raw kind code; unknown codes give `None`
pub fn decode_raw(code: u8, text: &str) -> Option<Value> {
    ValueKind::try_from(code)
        .ok()
        .map(|kind| Value::from_text(kind, text))
}

/// Deep copy; absent input gives absent output
pub fn clone_value(value: Option<&Value>) -> Option<Value> {
    value.cloned()
}

/// Compare two possibly absent values
///
/// Both absent is equal, exactly one absent is not, different kinds are not.
pub fn values_equal(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Replace `dest` with a copy of `src` (see [`Value::assign_from`])
pub fn assign_value(dest: &mut Value, src: &Value) -> Result<(), ValueError> {
    dest.assign_from(src)
}

/// Bounds check where the value itself may be absent (absent fails)
pub fn value_within_bounds(value: Option<&Value>, min: Option<&Value>, max: Option<&Value>) -> bool {
    value.is_some_and(|v| v.within_bounds(min, max))
}
