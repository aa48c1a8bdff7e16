//! Mock Flash implementation for testing
//!
//! In-memory flash that behaves like NOR: erase sets 0xFF, writes only clear
//! bits, and the firmware region below the NVS partition is protected.

use crate::platform::{error::FlashError, traits::FlashInterface, Result};
use alloc::vec;
use alloc::vec::Vec;

/// Flash block size (4 KB)
const BLOCK_SIZE: u32 = 4096;

/// Default flash capacity (4 MB)
const DEFAULT_CAPACITY: u32 = 4 * 1024 * 1024;

/// Protected firmware region (first 256 KB)
const FIRMWARE_SIZE: u32 = 0x40000;

/// Mock Flash implementation
///
/// Supports corruption injection, erase counting, write failures and
/// power-loss simulation so slot rotation and recovery can be tested.
#[derive(Debug, Clone)]
pub struct MockFlash {
    /// Flash contents (0xFF when erased)
    storage: Vec<u8>,
    /// Erase count per block
    erase_counts: Vec<u32>,
    /// Next write only lands half of its bytes
    power_loss: bool,
    /// Writes fail with `WriteFailed` while set
    write_fault: bool,
}

impl MockFlash {
    /// Create a 4 MB mock flash
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a mock flash of `capacity` bytes (rounded down to whole blocks)
    pub fn with_capacity(capacity: u32) -> Self {
        let capacity = capacity - capacity % BLOCK_SIZE;
        Self {
            storage: vec![0xFF; capacity as usize],
            erase_counts: vec![0; (capacity / BLOCK_SIZE) as usize],
            power_loss: false,
            write_fault: false,
        }
    }

    /// Copy of the flash contents (for test verification)
    pub fn get_contents(&self, address: u32, len: usize) -> Vec<u8> {
        self.storage[address as usize..address as usize + len].to_vec()
    }

    /// Overwrite bytes with a corrupt pattern
    pub fn inject_corruption(&mut self, address: u32, len: usize) {
        let start = address as usize;
        self.storage[start..start + len].fill(0xAA);
    }

    /// Number of times the block containing `address` was erased
    pub fn get_erase_count(&self, address: u32) -> u32 {
        self.erase_counts[(address / BLOCK_SIZE) as usize]
    }

    /// Total erase count across all blocks
    pub fn get_total_erase_count(&self) -> u32 {
        self.erase_counts.iter().sum()
    }

    /// Make the next write stop halfway
    pub fn simulate_power_loss(&mut self) {
        self.power_loss = true;
    }

    /// Make writes fail until cleared
    pub fn set_write_fault(&mut self, enabled: bool) {
        self.write_fault = enabled;
    }

    fn capacity_bytes(&self) -> u32 {
        self.storage.len() as u32
    }

    fn is_writable(&self, address: u32, len: usize) -> bool {
        address >= FIRMWARE_SIZE && address as usize + len <= self.storage.len()
    }
}

impl Default for MockFlash {
    fn default() -> Self {
        Self::new()
    }
}

impl FlashInterface for MockFlash {
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()> {
        let start = address as usize;
        if start + buf.len() > self.storage.len() {
            return Err(FlashError::InvalidAddress.into());
        }

        buf.copy_from_slice(&self.storage[start..start + buf.len()]);
        Ok(())
    }

    fn write(&mut self, address: u32, data: &[u8]) -> Result<()> {
        if !self.is_writable(address, data.len()) {
            return Err(FlashError::InvalidAddress.into());
        }
        if self.write_fault {
            return Err(FlashError::WriteFailed.into());
        }

        let write_len = if self.power_loss {
            self.power_loss = false;
            data.len() / 2
        } else {
            data.len()
        };

        // NOR flash can only clear bits
        let start = address as usize;
        for (cell, byte) in self.storage[start..start + write_len]
            .iter_mut()
            .zip(data)
        {
            *cell &= *byte;
        }

        Ok(())
    }

    fn erase(&mut self, address: u32, size: u32) -> Result<()> {
        if !self.is_writable(address, size as usize)
            || address % BLOCK_SIZE != 0
            || size % BLOCK_SIZE != 0
        {
            return Err(FlashError::InvalidAddress.into());
        }

        let start = address as usize;
        self.storage[start..start + size as usize].fill(0xFF);

        let first_block = (address / BLOCK_SIZE) as usize;
        for count in &mut self.erase_counts[first_block..first_block + (size / BLOCK_SIZE) as usize]
        {
            *count += 1;
        }

        Ok(())
    }

    fn block_size(&self) -> u32 {
        BLOCK_SIZE
    }

    fn capacity(&self) -> u32 {
        self.capacity_bytes()
    }
}
