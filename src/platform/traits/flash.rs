//! Flash interface trait
//!
//! Raw flash access for [`FlashNvs`](crate::platform::flash_nvs::FlashNvs),
//! which keeps the key/value image in erase-aligned slots.

use crate::platform::Result;

/// Flash interface trait
///
/// # Flash Characteristics
///
/// - Flash is organized in blocks (typically 4 KB)
/// - Erase operations set all bytes to 0xFF
/// - Write operations can only change bits from 1→0 (must erase first)
/// - Operations are blocking
///
/// # Memory Layout
///
/// ```text
/// [Firmware]       0x000000 - 0x040000 (256 KB) - DO NOT WRITE
/// [NVS slot 0]     0x040000 - 0x041000 (4 KB)
/// [NVS slot 1]     0x041000 - 0x042000 (4 KB)
/// [NVS slot 2]     0x042000 - 0x043000 (4 KB)
/// [NVS slot 3]     0x043000 - 0x044000 (4 KB)
/// ```
///
/// The partition base and slot count come from `NVS_PARTITION_BASE` and
/// `NVS_PARTITION_SLOTS` at build time.
pub trait FlashInterface {
    /// Read `buf.len()` bytes starting at `address`
    ///
    /// # Errors
    ///
    /// Returns `NvsError::Flash(FlashError::InvalidAddress)` if the range is
    /// out of bounds, `FlashError::ReadFailed` if the read fails.
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()>;

    /// Write `data` starting at `address`
    ///
    /// The target range must have been erased first.
    ///
    /// # Errors
    ///
    /// Returns `FlashError::InvalidAddress` for the firmware region,
    /// `FlashError::WriteFailed` if the write fails.
    fn write(&mut self, address: u32, data: &[u8]) -> Result<()>;

    /// Erase `size` bytes starting at `address`, setting them to 0xFF
    ///
    /// `address` and `size` must be multiples of [`block_size`](Self::block_size).
    fn erase(&mut self, address: u32, size: u32) -> Result<()>;

    /// Minimum erasable unit in bytes
    fn block_size(&self) -> u32;

    /// Total flash size in bytes
    fn capacity(&self) -> u32;
}
