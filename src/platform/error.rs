//! Storage error types
//!
//! Backend statuses mirror the NVS driver's error codes so log lines stay
//! comparable with devices running the vendor driver.

use core::fmt;

/// Result type for backend operations
pub type Result<T> = core::result::Result<T, NvsError>;

/// Base of the NVS status code range
const NVS_ERR_BASE: i32 = 0x1100;

/// Base of the SPI flash status code range
const FLASH_ERR_BASE: i32 = 0x6000;

/// Key/value backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NvsError {
    /// Partition not initialized (`flash_init` not called or failed)
    NotInitialized,
    /// Namespace or key does not exist (or exists with another item type)
    NotFound,
    /// Item type does not match the requested accessor
    TypeMismatch,
    /// Write through a read-only handle
    ReadOnly,
    /// Not enough space left in the partition
    NotEnoughSpace,
    /// Namespace name is empty or too long
    InvalidName,
    /// Handle is closed or was never opened
    InvalidHandle,
    /// Key name is longer than 15 bytes
    KeyTooLong,
    /// Caller buffer does not match the stored length
    InvalidLength,
    /// Partition has no free pages and must be erased
    NoFreePages,
    /// String or blob is longer than the backend allows
    ValueTooLong,
    /// Partition was written by a newer format version
    NewVersionFound,
    /// Stored bytes do not decode (e.g. string is not UTF-8)
    InvalidValue,
    /// Underlying flash operation failed
    Flash(FlashError),
}

/// Flash-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Erase operation failed
    EraseFailed,
    /// Write operation failed
    WriteFailed,
    /// Read operation failed
    ReadFailed,
    /// Invalid address (out of bounds or misaligned)
    InvalidAddress,
    /// Verify failed (data mismatch after write)
    VerifyFailed,
    /// Flash is busy
    Busy,
}

impl NvsError {
    /// Raw status code, as the vendor driver reports it
    pub fn code(&self) -> i32 {
        match self {
            NvsError::NotInitialized => NVS_ERR_BASE + 0x01,
            NvsError::NotFound => NVS_ERR_BASE + 0x02,
            NvsError::TypeMismatch => NVS_ERR_BASE + 0x03,
            NvsError::ReadOnly => NVS_ERR_BASE + 0x04,
            NvsError::NotEnoughSpace => NVS_ERR_BASE + 0x05,
            NvsError::InvalidName => NVS_ERR_BASE + 0x06,
            NvsError::InvalidHandle => NVS_ERR_BASE + 0x07,
            NvsError::KeyTooLong => NVS_ERR_BASE + 0x09,
            NvsError::InvalidLength => NVS_ERR_BASE + 0x0c,
            NvsError::NoFreePages => NVS_ERR_BASE + 0x0d,
            NvsError::ValueTooLong => NVS_ERR_BASE + 0x0e,
            NvsError::NewVersionFound => NVS_ERR_BASE + 0x10,
            NvsError::InvalidValue => NVS_ERR_BASE + 0x15,
            NvsError::Flash(e) => e.code(),
        }
    }

    /// Symbolic name of the status code
    pub fn name(&self) -> &'static str {
        match self {
            NvsError::NotInitialized => "ESP_ERR_NVS_NOT_INITIALIZED",
            NvsError::NotFound => "ESP_ERR_NVS_NOT_FOUND",
            NvsError::TypeMismatch => "ESP_ERR_NVS_TYPE_MISMATCH",
            NvsError::ReadOnly => "ESP_ERR_NVS_READ_ONLY",
            NvsError::NotEnoughSpace => "ESP_ERR_NVS_NOT_ENOUGH_SPACE",
            NvsError::InvalidName => "ESP_ERR_NVS_INVALID_NAME",
            NvsError::InvalidHandle => "ESP_ERR_NVS_INVALID_HANDLE",
            NvsError::KeyTooLong => "ESP_ERR_NVS_KEY_TOO_LONG",
            NvsError::InvalidLength => "ESP_ERR_NVS_INVALID_LENGTH",
            NvsError::NoFreePages => "ESP_ERR_NVS_NO_FREE_PAGES",
            NvsError::ValueTooLong => "ESP_ERR_NVS_VALUE_TOO_LONG",
            NvsError::NewVersionFound => "ESP_ERR_NVS_NEW_VERSION_FOUND",
            NvsError::InvalidValue => "ESP_ERR_NVS_CORRUPT_KEY_PART",
            NvsError::Flash(e) => e.name(),
        }
    }
}

impl FlashError {
    /// Raw status code, as the vendor flash driver reports it
    pub fn code(&self) -> i32 {
        match self {
            FlashError::Busy => FLASH_ERR_BASE + 0x01,
            FlashError::ReadFailed => FLASH_ERR_BASE + 0x02,
            FlashError::WriteFailed => FLASH_ERR_BASE + 0x03,
            FlashError::EraseFailed => FLASH_ERR_BASE + 0x04,
            FlashError::InvalidAddress => FLASH_ERR_BASE + 0x05,
            FlashError::VerifyFailed => FLASH_ERR_BASE + 0x06,
        }
    }

    /// Symbolic name of the status code
    pub fn name(&self) -> &'static str {
        match self {
            FlashError::Busy => "ESP_ERR_FLASH_BUSY",
            FlashError::ReadFailed => "ESP_ERR_FLASH_READ_FAILED",
            FlashError::WriteFailed => "ESP_ERR_FLASH_WRITE_FAILED",
            FlashError::EraseFailed => "ESP_ERR_FLASH_ERASE_FAILED",
            FlashError::InvalidAddress => "ESP_ERR_FLASH_INVALID_ADDRESS",
            FlashError::VerifyFailed => "ESP_ERR_FLASH_VERIFY_FAILED",
        }
    }
}

impl fmt::Display for NvsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.name())
    }
}

impl fmt::Display for FlashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flash error: {:?}", self)
    }
}

impl From<FlashError> for NvsError {
    fn from(error: FlashError) -> Self {
        NvsError::Flash(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(NvsError::NotFound.code(), 0x1102);
        assert_eq!(NvsError::TypeMismatch.code(), 0x1103);
        assert_eq!(NvsError::NoFreePages.code(), 0x110d);
        assert_eq!(NvsError::NewVersionFound.code(), 0x1110);
        assert_eq!(NvsError::from(FlashError::ReadFailed).code(), 0x6002);
    }

    #[test]
    fn test_display() {
        let text = std::format!("{}", NvsError::NotFound);
        assert_eq!(text, "4354 (ESP_ERR_NVS_NOT_FOUND)");
    }
}
