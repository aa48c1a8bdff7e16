//! Typed key/value items
//!
//! NVS items carry their own type tag. Backends in this crate keep one
//! [`NvsItem`] per key; the tag codes match the vendor driver's item types so
//! on-flash records stay recognizable.

use alloc::string::String;
use alloc::vec::Vec;

use crate::platform::error::NvsError;

/// Maximum namespace or key length in bytes
pub const MAX_NAME_LEN: usize = 15;

/// Maximum string item length in bytes
pub const MAX_STR_LEN: usize = 4000;

/// Maximum blob item length in bytes
pub const MAX_BLOB_LEN: usize = 4000;

/// Namespace or key name
pub type Name = heapless::String<16>;

/// Item type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ItemType {
    U8 = 0x01,
    I8 = 0x11,
    U16 = 0x02,
    I16 = 0x12,
    U32 = 0x04,
    I32 = 0x14,
    U64 = 0x08,
    I64 = 0x18,
    Str = 0x21,
    Blob = 0x42,
}

impl ItemType {
    /// Parse an on-flash type tag
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(ItemType::U8),
            0x11 => Some(ItemType::I8),
            0x02 => Some(ItemType::U16),
            0x12 => Some(ItemType::I16),
            0x04 => Some(ItemType::U32),
            0x14 => Some(ItemType::I32),
            0x08 => Some(ItemType::U64),
            0x18 => Some(ItemType::I64),
            0x21 => Some(ItemType::Str),
            0x42 => Some(ItemType::Blob),
            _ => None,
        }
    }

    /// Payload width for fixed-size types
    pub fn fixed_size(self) -> Option<usize> {
        match self {
            ItemType::U8 | ItemType::I8 => Some(1),
            ItemType::U16 | ItemType::I16 => Some(2),
            ItemType::U32 | ItemType::I32 => Some(4),
            ItemType::U64 | ItemType::I64 => Some(8),
            ItemType::Str | ItemType::Blob => None,
        }
    }
}

/// One stored item
#[derive(Debug, Clone, PartialEq)]
pub enum NvsItem {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    Str(String),
    Blob(Vec<u8>),
}

impl NvsItem {
    pub fn item_type(&self) -> ItemType {
        match self {
            NvsItem::U8(_) => ItemType::U8,
            NvsItem::I8(_) => ItemType::I8,
            NvsItem::U16(_) => ItemType::U16,
            NvsItem::I16(_) => ItemType::I16,
            NvsItem::U32(_) => ItemType::U32,
            NvsItem::I32(_) => ItemType::I32,
            NvsItem::U64(_) => ItemType::U64,
            NvsItem::I64(_) => ItemType::I64,
            NvsItem::Str(_) => ItemType::Str,
            NvsItem::Blob(_) => ItemType::Blob,
        }
    }

    /// Serialize the payload (little-endian for integers)
    pub fn payload(&self) -> Vec<u8> {
        match self {
            NvsItem::U8(v) => v.to_le_bytes().to_vec(),
            NvsItem::I8(v) => v.to_le_bytes().to_vec(),
            NvsItem::U16(v) => v.to_le_bytes().to_vec(),
            NvsItem::I16(v) => v.to_le_bytes().to_vec(),
            NvsItem::U32(v) => v.to_le_bytes().to_vec(),
            NvsItem::I32(v) => v.to_le_bytes().to_vec(),
            NvsItem::U64(v) => v.to_le_bytes().to_vec(),
            NvsItem::I64(v) => v.to_le_bytes().to_vec(),
            NvsItem::Str(s) => s.as_bytes().to_vec(),
            NvsItem::Blob(b) => b.clone(),
        }
    }

    /// Rebuild an item from its type tag and payload
    pub fn from_payload(item_type: ItemType, bytes: &[u8]) -> Option<Self> {
        if let Some(size) = item_type.fixed_size() {
            if bytes.len() != size {
                return None;
            }
        }

        let item = match item_type {
            ItemType::U8 => NvsItem::U8(bytes[0]),
            ItemType::I8 => NvsItem::I8(bytes[0] as i8),
            ItemType::U16 => NvsItem::U16(u16::from_le_bytes(bytes.try_into().ok()?)),
            ItemType::I16 => NvsItem::I16(i16::from_le_bytes(bytes.try_into().ok()?)),
            ItemType::U32 => NvsItem::U32(u32::from_le_bytes(bytes.try_into().ok()?)),
            ItemType::I32 => NvsItem::I32(i32::from_le_bytes(bytes.try_into().ok()?)),
            ItemType::U64 => NvsItem::U64(u64::from_le_bytes(bytes.try_into().ok()?)),
            ItemType::I64 => NvsItem::I64(i64::from_le_bytes(bytes.try_into().ok()?)),
            ItemType::Str => NvsItem::Str(String::from(core::str::from_utf8(bytes).ok()?)),
            ItemType::Blob => NvsItem::Blob(bytes.to_vec()),
        };
        Some(item)
    }
}

/// Validate a namespace name
pub fn namespace_name(namespace: &str) -> Result<Name, NvsError> {
    if namespace.is_empty() || namespace.len() > MAX_NAME_LEN {
        return Err(NvsError::InvalidName);
    }
    Name::try_from(namespace).map_err(|_| NvsError::InvalidName)
}

/// Validate a key name
pub fn key_name(key: &str) -> Result<Name, NvsError> {
    if key.is_empty() {
        return Err(NvsError::InvalidName);
    }
    if key.len() > MAX_NAME_LEN {
        return Err(NvsError::KeyTooLong);
    }
    Name::try_from(key).map_err(|_| NvsError::KeyTooLong)
}

/// Check a variable-length item against the backend limits
pub fn check_length(item: &NvsItem) -> Result<(), NvsError> {
    match item {
        NvsItem::Str(s) if s.len() > MAX_STR_LEN => Err(NvsError::ValueTooLong),
        NvsItem::Blob(b) if b.len() > MAX_BLOB_LEN => Err(NvsError::ValueTooLong),
        _ => Ok(()),
    }
}

/// Copy stored bytes into a caller buffer
pub(crate) fn copy_out(stored: &[u8], buf: &mut [u8]) -> Result<usize, NvsError> {
    let dest = buf
        .get_mut(..stored.len())
        .ok_or(NvsError::InvalidLength)?;
    dest.copy_from_slice(stored);
    Ok(stored.len())
}

/// Implements the fixed-width `NvsBackend` accessors on top of the
/// backend's `lookup(handle, key) -> Result<&NvsItem>` and
/// `stage(handle, key, NvsItem) -> Result<()>` methods.
macro_rules! fixed_item_accessors {
    ($($get:ident, $set:ident, $ty:ty, $variant:ident;)*) => {
        $(
            fn $get(&mut self, handle: NvsHandle, key: &str) -> Result<$ty> {
                match self.lookup(handle, key)? {
                    NvsItem::$variant(value) => Ok(*value),
                    _ => Err(NvsError::NotFound),
                }
            }

            fn $set(&mut self, handle: NvsHandle, key: &str, value: $ty) -> Result<()> {
                self.stage(handle, key, NvsItem::$variant(value))
            }
        )*
    };
}

pub(crate) use fixed_item_accessors;
