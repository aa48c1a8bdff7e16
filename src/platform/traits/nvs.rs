//! Key/value backend trait
//!
//! This module defines the namespace/key store the parameter layer persists
//! into. The method set follows the NVS driver API: open a namespace, read or
//! stage typed items through the handle, commit, close.

use crate::platform::Result;

/// Namespace access mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OpenMode {
    /// Reads only; a missing namespace is reported as `NotFound`
    ReadOnly,
    /// Reads and writes; a missing namespace is created
    ReadWrite,
}

/// Open namespace handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NvsHandle(u32);

impl NvsHandle {
    /// Wrap a backend-specific handle value
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Backend-specific handle value
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Key/value backend
///
/// # Item Typing
///
/// Every key stores exactly one typed item. Reading a key through an accessor
/// of another type reports `NvsError::NotFound`; writing a key with another
/// type replaces the item.
///
/// # Errors
///
/// - `NotInitialized` before a successful `flash_init`
/// - `InvalidHandle` for closed or unknown handles
/// - `ReadOnly` for writes through a read-only handle
/// - `InvalidName` / `KeyTooLong` for names outside 1..=15 bytes
/// - `ValueTooLong` for strings or blobs above the backend limit
pub trait NvsBackend {
    /// Mount the partition
    ///
    /// Returns `NoFreePages` or `NewVersionFound` when the partition has to
    /// be erased before it can be used.
    fn flash_init(&mut self) -> Result<()>;

    /// Erase the whole partition
    fn flash_erase(&mut self) -> Result<()>;

    /// Open a namespace
    fn open(&mut self, namespace: &str, mode: OpenMode) -> Result<NvsHandle>;

    /// Close a handle, dropping anything not committed
    fn close(&mut self, handle: NvsHandle);

    /// Persist every item staged through `handle`
    fn commit(&mut self, handle: NvsHandle) -> Result<()>;

    fn get_i8(&mut self, handle: NvsHandle, key: &str) -> Result<i8>;
    fn set_i8(&mut self, handle: NvsHandle, key: &str, value: i8) -> Result<()>;
    fn get_u8(&mut self, handle: NvsHandle, key: &str) -> Result<u8>;
    fn set_u8(&mut self, handle: NvsHandle, key: &str, value: u8) -> Result<()>;
    fn get_i16(&mut self, handle: NvsHandle, key: &str) -> Result<i16>;
    fn set_i16(&mut self, handle: NvsHandle, key: &str, value: i16) -> Result<()>;
    fn get_u16(&mut self, handle: NvsHandle, key: &str) -> Result<u16>;
    fn set_u16(&mut self, handle: NvsHandle, key: &str, value: u16) -> Result<()>;
    fn get_i32(&mut self, handle: NvsHandle, key: &str) -> Result<i32>;
    fn set_i32(&mut self, handle: NvsHandle, key: &str, value: i32) -> Result<()>;
    fn get_u32(&mut self, handle: NvsHandle, key: &str) -> Result<u32>;
    fn set_u32(&mut self, handle: NvsHandle, key: &str, value: u32) -> Result<()>;
    fn get_i64(&mut self, handle: NvsHandle, key: &str) -> Result<i64>;
    fn set_i64(&mut self, handle: NvsHandle, key: &str, value: i64) -> Result<()>;
    fn get_u64(&mut self, handle: NvsHandle, key: &str) -> Result<u64>;
    fn set_u64(&mut self, handle: NvsHandle, key: &str, value: u64) -> Result<()>;

    /// Stored string length in bytes
    fn get_str_len(&mut self, handle: NvsHandle, key: &str) -> Result<usize>;

    /// Copy a stored string into `buf`, returning the number of bytes written
    ///
    /// Fails with `InvalidLength` if `buf` is shorter than the stored string.
    fn get_str(&mut self, handle: NvsHandle, key: &str, buf: &mut [u8]) -> Result<usize>;

    fn set_str(&mut self, handle: NvsHandle, key: &str, value: &str) -> Result<()>;

    /// Stored blob length in bytes
    fn get_blob_len(&mut self, handle: NvsHandle, key: &str) -> Result<usize>;

    /// Copy a stored blob into `buf`, returning the number of bytes written
    ///
    /// Fails with `InvalidLength` if `buf` is shorter than the stored blob.
    fn get_blob(&mut self, handle: NvsHandle, key: &str, buf: &mut [u8]) -> Result<usize>;

    fn set_blob(&mut self, handle: NvsHandle, key: &str, value: &[u8]) -> Result<()>;
}
