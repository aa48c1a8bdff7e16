//! Bit-pattern accessors for kinds the backend has no native type for
//!
//! Floats, doubles and unix timestamps are stored as `u32`/`u64` items
//! holding their bit pattern. Older firmware stored them as raw blobs of the
//! native width, so reads try the integer item first and fall back to a blob.

use super::store::Namespace;
use crate::platform::error::NvsError;
use crate::platform::traits::{NvsBackend, NvsHandle};
use crate::platform::Result;

/// Read a blob that must be exactly `N` bytes
fn get_exact_blob<B: NvsBackend, const N: usize>(
    backend: &mut B,
    handle: NvsHandle,
    key: &str,
) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    let read = backend.get_blob(handle, key, &mut buf)?;
    if read != N {
        return Err(NvsError::InvalidLength);
    }
    Ok(buf)
}

/// Store an `f32` as its IEEE-754 bit pattern
pub fn set_f32<B: NvsBackend>(ns: &mut Namespace<'_, B>, key: &str, value: f32) -> Result<()> {
    let handle = ns.handle();
    ns.backend().set_u32(handle, key, value.to_bits())
}

/// Read an `f32`, accepting the legacy 4-byte blob
///
/// If both attempts fail the blob status is returned.
pub fn get_f32<B: NvsBackend>(ns: &mut Namespace<'_, B>, key: &str) -> Result<f32> {
    let handle = ns.handle();
    let backend = ns.backend();
    match backend.get_u32(handle, key) {
        Ok(bits) => Ok(f32::from_bits(bits)),
        Err(_) => get_exact_blob::<B, 4>(backend, handle, key).map(f32::from_le_bytes),
    }
}

/// Store an `f64` as its IEEE-754 bit pattern
pub fn set_f64<B: NvsBackend>(ns: &mut Namespace<'_, B>, key: &str, value: f64) -> Result<()> {
    let handle = ns.handle();
    ns.backend().set_u64(handle, key, value.to_bits())
}

/// Read an `f64`, accepting the legacy 8-byte blob
pub fn get_f64<B: NvsBackend>(ns: &mut Namespace<'_, B>, key: &str) -> Result<f64> {
    let handle = ns.handle();
    let backend = ns.backend();
    match backend.get_u64(handle, key) {
        Ok(bits) => Ok(f64::from_bits(bits)),
        Err(_) => get_exact_blob::<B, 8>(backend, handle, key).map(f64::from_le_bytes),
    }
}

/// Store a unix timestamp (seconds) as its two's-complement bit pattern
pub fn set_timestamp<B: NvsBackend>(
    ns: &mut Namespace<'_, B>,
    key: &str,
    unix_secs: i64,
) -> Result<()> {
    let handle = ns.handle();
    ns.backend().set_u64(handle, key, unix_secs as u64)
}

/// Read a unix timestamp, accepting the legacy 8-byte blob
pub fn get_timestamp<B: NvsBackend>(ns: &mut Namespace<'_, B>, key: &str) -> Result<i64> {
    let handle = ns.handle();
    let backend = ns.backend();
    match backend.get_u64(handle, key) {
        Ok(bits) => Ok(bits as i64),
        Err(_) => get_exact_blob::<B, 8>(backend, handle, key).map(i64::from_le_bytes),
    }
}
