//! NVS backend on raw flash
//!
//! Keeps the whole store as one image in a ring of erase-aligned slots. Each
//! commit writes the merged image to the next slot with a higher sequence
//! number, so a torn write leaves the previous slot authoritative.

pub mod crc;
pub mod image;

use crate::platform::error::NvsError;
use crate::platform::item::{
    check_length, copy_out, fixed_item_accessors, key_name, namespace_name, Name, NvsItem,
};
use crate::platform::traits::{FlashInterface, NvsBackend, NvsHandle, OpenMode};
use crate::platform::Result;
use crate::{log_debug, log_error, log_warn};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec;
use self::image::{ImageHeader, Namespaces, CRC_SIZE, IMAGE_VERSION};

/// Partition base address when `NVS_PARTITION_BASE` is unset or invalid
pub const DEFAULT_PARTITION_BASE: u32 = 0x040000;

/// Slot count when `NVS_PARTITION_SLOTS` is unset or invalid
pub const DEFAULT_SLOT_COUNT: u8 = 4;

/// Fewest slots that keep the previous image while the next one is written
pub const MIN_SLOT_COUNT: u8 = 2;

/// Slot size (one 4 KB flash block)
pub const DEFAULT_SLOT_SIZE: u32 = 4096;

/// Partition geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlashNvsConfig {
    /// Address of slot 0 (block-aligned)
    pub base_address: u32,
    /// Number of slots in the ring
    pub slot_count: u8,
    /// Bytes per slot (multiple of the flash block size)
    pub slot_size: u32,
}

impl FlashNvsConfig {
    /// Address of `slot`
    pub fn slot_address(&self, slot: u8) -> u32 {
        self.base_address + slot as u32 * self.slot_size
    }

    /// Total partition size in bytes
    pub fn partition_size(&self) -> u32 {
        self.slot_count as u32 * self.slot_size
    }

    /// Check the geometry can hold a ring
    pub fn validate(&self) -> Result<()> {
        if self.slot_count < MIN_SLOT_COUNT {
            return Err(NvsError::InvalidLength);
        }
        Ok(())
    }
}

impl Default for FlashNvsConfig {
    /// Geometry from the build environment (`NVS_PARTITION_BASE`,
    /// `NVS_PARTITION_SLOTS`)
    fn default() -> Self {
        let base_address = parse_setting(env!("NVS_PARTITION_BASE"))
            .and_then(|value| u32::try_from(value).ok())
            .unwrap_or(DEFAULT_PARTITION_BASE);
        let slot_count = parse_setting(env!("NVS_PARTITION_SLOTS"))
            .and_then(|value| u8::try_from(value).ok())
            .filter(|&count| count >= MIN_SLOT_COUNT)
            .unwrap_or(DEFAULT_SLOT_COUNT);

        Self {
            base_address,
            slot_count,
            slot_size: DEFAULT_SLOT_SIZE,
        }
    }
}

/// Parse a hex (`0x` prefix) or decimal build setting
fn parse_setting(text: &str) -> Option<u64> {
    let text = text.trim();
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

/// Storage statistics for wear monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlashNvsStats {
    /// Slot images written since construction
    pub total_commits: u32,
    /// Slot holding the current image
    pub active_slot: Option<u8>,
    /// Sequence number of the current image
    pub sequence: u16,
}

/// What a slot holds
#[derive(Debug)]
enum SlotState {
    Erased,
    Corrupt,
    NewerVersion(u16),
    Valid { sequence: u16, namespaces: Namespaces },
}

#[derive(Debug)]
struct FlashHandle {
    namespace: Name,
    mode: OpenMode,
    staged: BTreeMap<Name, NvsItem>,
}

/// Flash-backed NVS
///
/// Reads through a handle see that handle's staged items first, then the
/// committed image. `close` drops whatever was not committed.
pub struct FlashNvs<F: FlashInterface> {
    flash: F,
    config: FlashNvsConfig,
    initialized: bool,
    committed: Namespaces,
    active_slot: Option<u8>,
    sequence: u16,
    total_commits: u32,
    handles: BTreeMap<u32, FlashHandle>,
    next_handle: u32,
}

impl<F: FlashInterface> FlashNvs<F> {
    /// Create a backend with the build-time partition geometry
    pub fn new(flash: F) -> Self {
        Self::with_config(flash, FlashNvsConfig::default())
    }

    /// Create a backend with explicit geometry
    ///
    /// The geometry is checked by `flash_init`; a ring of fewer than
    /// [`MIN_SLOT_COUNT`] slots never mounts.
    pub fn with_config(flash: F, config: FlashNvsConfig) -> Self {
        Self {
            flash,
            config,
            initialized: false,
            committed: Namespaces::new(),
            active_slot: None,
            sequence: 0,
            total_commits: 0,
            handles: BTreeMap::new(),
            next_handle: 0,
        }
    }

    pub fn config(&self) -> &FlashNvsConfig {
        &self.config
    }

    pub fn stats(&self) -> FlashNvsStats {
        FlashNvsStats {
            total_commits: self.total_commits,
            active_slot: self.active_slot,
            sequence: self.sequence,
        }
    }

    /// Get Flash interface reference (for testing)
    pub fn flash_mut(&mut self) -> &mut F {
        &mut self.flash
    }

    /// Release the flash
    pub fn into_inner(self) -> F {
        self.flash
    }

    fn read_slot(&mut self, slot: u8) -> Result<SlotState> {
        let address = self.config.slot_address(slot);
        let mut header_bytes = [0u8; ImageHeader::SIZE];
        self.flash.read(address, &mut header_bytes)?;

        if header_bytes.iter().all(|&b| b == 0xFF) {
            return Ok(SlotState::Erased);
        }
        let Some(header) = ImageHeader::from_bytes(&header_bytes) else {
            return Ok(SlotState::Corrupt);
        };
        if header.version > IMAGE_VERSION {
            return Ok(SlotState::NewerVersion(header.version));
        }

        let max_payload = (self.config.slot_size as usize).saturating_sub(ImageHeader::SIZE + CRC_SIZE);
        if header.payload_len as usize > max_payload {
            return Ok(SlotState::Corrupt);
        }

        let mut body = vec![0u8; header.payload_len as usize + CRC_SIZE];
        self.flash
            .read(address + ImageHeader::SIZE as u32, &mut body)?;

        Ok(match image::decode(&header, &header_bytes, &body) {
            Some(namespaces) => SlotState::Valid {
                sequence: header.sequence,
                namespaces,
            },
            None => SlotState::Corrupt,
        })
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(NvsError::NotInitialized)
        }
    }

    fn handle(&self, handle: NvsHandle) -> Result<&FlashHandle> {
        self.ensure_initialized()?;
        self.handles
            .get(&handle.raw())
            .ok_or(NvsError::InvalidHandle)
    }

    fn lookup(&mut self, handle: NvsHandle, key: &str) -> Result<&NvsItem> {
        let open = self.handle(handle)?;
        let key = key_name(key)?;
        open.staged
            .get(&key)
            .or_else(|| {
                self.committed
                    .get(&open.namespace)
                    .and_then(|items| items.get(&key))
            })
            .ok_or(NvsError::NotFound)
    }

    fn stage(&mut self, handle: NvsHandle, key: &str, item: NvsItem) -> Result<()> {
        self.ensure_initialized()?;
        let open = self
            .handles
            .get_mut(&handle.raw())
            .ok_or(NvsError::InvalidHandle)?;
        if open.mode == OpenMode::ReadOnly {
            return Err(NvsError::ReadOnly);
        }
        check_length(&item)?;
        open.staged.insert(key_name(key)?, item);
        Ok(())
    }
}

/// Wrapping sequence comparison: `a` is newer than `b`
fn is_newer(a: u16, b: u16) -> bool {
    (a.wrapping_sub(b) as i16) > 0
}

impl<F: FlashInterface> NvsBackend for FlashNvs<F> {
    fn flash_init(&mut self) -> Result<()> {
        self.handles.clear();
        if let Err(err) = self.config.validate() {
            log_error!(
                "NVS partition needs at least {} slots, got {}",
                MIN_SLOT_COUNT,
                self.config.slot_count
            );
            return Err(err);
        }

        let mut newest: Option<(u8, u16, Namespaces)> = None;
        let mut dirty = false;
        for slot in 0..self.config.slot_count {
            match self.read_slot(slot)? {
                SlotState::Erased => {}
                SlotState::Corrupt => {
                    log_warn!("NVS slot {} is corrupted, skipping", slot);
                    dirty = true;
                }
                SlotState::NewerVersion(version) => {
                    log_warn!(
                        "NVS slot {} has format version {} (supported: {})",
                        slot,
                        version,
                        IMAGE_VERSION
                    );
                    return Err(NvsError::NewVersionFound);
                }
                SlotState::Valid {
                    sequence,
                    namespaces,
                } => {
                    let newer = newest
                        .as_ref()
                        .map_or(true, |(_, current, _)| is_newer(sequence, *current));
                    if newer {
                        newest = Some((slot, sequence, namespaces));
                    }
                }
            }
        }

        match newest {
            Some((slot, sequence, namespaces)) => {
                log_debug!("NVS image loaded from slot {} (sequence {})", slot, sequence);
                self.active_slot = Some(slot);
                self.sequence = sequence;
                self.committed = namespaces;
            }
            None if dirty => return Err(NvsError::NoFreePages),
            None => {
                self.active_slot = None;
                self.sequence = 0;
                self.committed = Namespaces::new();
            }
        }

        self.initialized = true;
        Ok(())
    }

    fn flash_erase(&mut self) -> Result<()> {
        self.initialized = false;
        self.handles.clear();
        self.committed = Namespaces::new();
        self.active_slot = None;
        self.sequence = 0;

        self.flash
            .erase(self.config.base_address, self.config.partition_size())
    }

    fn open(&mut self, namespace: &str, mode: OpenMode) -> Result<NvsHandle> {
        self.ensure_initialized()?;
        let namespace = namespace_name(namespace)?;
        if mode == OpenMode::ReadOnly && !self.committed.contains_key(&namespace) {
            return Err(NvsError::NotFound);
        }

        self.next_handle = self.next_handle.wrapping_add(1);
        self.handles.insert(
            self.next_handle,
            FlashHandle {
                namespace,
                mode,
                staged: BTreeMap::new(),
            },
        );
        Ok(NvsHandle::new(self.next_handle))
    }

    fn close(&mut self, handle: NvsHandle) {
        self.handles.remove(&handle.raw());
    }

    fn commit(&mut self, handle: NvsHandle) -> Result<()> {
        let open = self.handle(handle)?;
        if open.mode == OpenMode::ReadOnly {
            return Ok(());
        }

        let mut merged = self.committed.clone();
        let items = merged.entry(open.namespace.clone()).or_default();
        for (key, item) in &open.staged {
            items.insert(key.clone(), item.clone());
        }

        if merged != self.committed {
            let sequence = self.sequence.wrapping_add(1);
            let image = image::encode(sequence, &merged)?;
            if image.len() > self.config.slot_size as usize {
                return Err(NvsError::NotEnoughSpace);
            }

            let slot = self
                .active_slot
                .map_or(0, |active| (active + 1) % self.config.slot_count);
            let address = self.config.slot_address(slot);
            self.flash.erase(address, self.config.slot_size)?;
            self.flash.write(address, &image)?;

            log_debug!(
                "NVS image committed to slot {} (sequence {}, {} bytes)",
                slot,
                sequence,
                image.len()
            );
            self.committed = merged;
            self.sequence = sequence;
            self.active_slot = Some(slot);
            self.total_commits += 1;
        }

        if let Some(open) = self.handles.get_mut(&handle.raw()) {
            open.staged.clear();
        }
        Ok(())
    }

    fixed_item_accessors! {
        get_i8, set_i8, i8, I8;
        get_u8, set_u8, u8, U8;
        get_i16, set_i16, i16, I16;
        get_u16, set_u16, u16, U16;
        get_i32, set_i32, i32, I32;
        get_u32, set_u32, u32, U32;
        get_i64, set_i64, i64, I64;
        get_u64, set_u64, u64, U64;
    }

    fn get_str_len(&mut self, handle: NvsHandle, key: &str) -> Result<usize> {
        match self.lookup(handle, key)? {
            NvsItem::Str(value) => Ok(value.len()),
            _ => Err(NvsError::NotFound),
        }
    }

    fn get_str(&mut self, handle: NvsHandle, key: &str, buf: &mut [u8]) -> Result<usize> {
        match self.lookup(handle, key)? {
            NvsItem::Str(value) => copy_out(value.as_bytes(), buf),
            _ => Err(NvsError::NotFound),
        }
    }

    fn set_str(&mut self, handle: NvsHandle, key: &str, value: &str) -> Result<()> {
        self.stage(handle, key, NvsItem::Str(String::from(value)))
    }

    fn get_blob_len(&mut self, handle: NvsHandle, key: &str) -> Result<usize> {
        match self.lookup(handle, key)? {
            NvsItem::Blob(value) => Ok(value.len()),
            _ => Err(NvsError::NotFound),
        }
    }

    fn get_blob(&mut self, handle: NvsHandle, key: &str, buf: &mut [u8]) -> Result<usize> {
        match self.lookup(handle, key)? {
            NvsItem::Blob(value) => copy_out(value, buf),
            _ => Err(NvsError::NotFound),
        }
    }

    fn set_blob(&mut self, handle: NvsHandle, key: &str, value: &[u8]) -> Result<()> {
        self.stage(handle, key, NvsItem::Blob(value.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockFlash;

    const CONFIG: FlashNvsConfig = FlashNvsConfig {
        base_address: DEFAULT_PARTITION_BASE,
        slot_count: 4,
        slot_size: DEFAULT_SLOT_SIZE,
    };

    fn mounted(flash: MockFlash) -> FlashNvs<MockFlash> {
        let mut nvs = FlashNvs::with_config(flash, CONFIG);
        nvs.flash_init().unwrap();
        nvs
    }

    fn reload(nvs: FlashNvs<MockFlash>) -> FlashNvs<MockFlash> {
        mounted(nvs.into_inner())
    }

    fn commit_u32(nvs: &mut FlashNvs<MockFlash>, key: &str, value: u32) {
        let handle = nvs.open("cfg", OpenMode::ReadWrite).unwrap();
        nvs.set_u32(handle, key, value).unwrap();
        nvs.commit(handle).unwrap();
        nvs.close(handle);
    }

    fn read_u32(nvs: &mut FlashNvs<MockFlash>, key: &str) -> Result<u32> {
        let handle = nvs.open("cfg", OpenMode::ReadOnly)?;
        let value = nvs.get_u32(handle, key);
        nvs.close(handle);
        value
    }

    #[test]
    fn test_blank_flash_mounts_empty() {
        let mut nvs = mounted(MockFlash::new());
        assert_eq!(nvs.stats().active_slot, None);
        assert_eq!(nvs.open("cfg", OpenMode::ReadOnly), Err(NvsError::NotFound));
    }

    #[test]
    fn test_calls_before_init() {
        let mut nvs = FlashNvs::with_config(MockFlash::new(), CONFIG);
        assert_eq!(
            nvs.open("cfg", OpenMode::ReadWrite),
            Err(NvsError::NotInitialized)
        );
    }

    #[test]
    fn test_values_survive_reload() {
        let mut nvs = mounted(MockFlash::new());
        let handle = nvs.open("cfg", OpenMode::ReadWrite).unwrap();
        nvs.set_u32(handle, "interval", 300).unwrap();
        nvs.set_str(handle, "name", "greenhouse").unwrap();
        nvs.set_blob(handle, "raw", &[1, 2, 3]).unwrap();
        nvs.commit(handle).unwrap();
        nvs.close(handle);

        let mut nvs = reload(nvs);
        let handle = nvs.open("cfg", OpenMode::ReadOnly).unwrap();
        assert_eq!(nvs.get_u32(handle, "interval"), Ok(300));
        assert_eq!(nvs.get_str_len(handle, "name"), Ok(10));
        let mut buf = [0u8; 16];
        assert_eq!(nvs.get_str(handle, "name", &mut buf), Ok(10));
        assert_eq!(&buf[..10], b"greenhouse");
        assert_eq!(nvs.get_blob(handle, "raw", &mut buf), Ok(3));
        assert_eq!(nvs.get_i32(handle, "interval"), Err(NvsError::NotFound));
    }

    #[test]
    fn test_empty_namespace_survives_reload() {
        let mut nvs = mounted(MockFlash::new());
        let handle = nvs.open("empty", OpenMode::ReadWrite).unwrap();
        nvs.commit(handle).unwrap();
        nvs.close(handle);

        let mut nvs = reload(nvs);
        assert!(nvs.open("empty", OpenMode::ReadOnly).is_ok());
    }

    #[test]
    fn test_staged_items_visible_until_close() {
        let mut nvs = mounted(MockFlash::new());
        commit_u32(&mut nvs, "level", 1);

        let handle = nvs.open("cfg", OpenMode::ReadWrite).unwrap();
        nvs.set_u32(handle, "level", 2).unwrap();
        assert_eq!(nvs.get_u32(handle, "level"), Ok(2));
        nvs.close(handle);

        assert_eq!(read_u32(&mut nvs, "level"), Ok(1));
        assert_eq!(read_u32(&mut reload(nvs), "level"), Ok(1));
    }

    #[test]
    fn test_read_only_handle() {
        let mut nvs = mounted(MockFlash::new());
        commit_u32(&mut nvs, "level", 1);

        let handle = nvs.open("cfg", OpenMode::ReadOnly).unwrap();
        assert_eq!(nvs.set_u32(handle, "level", 2), Err(NvsError::ReadOnly));
        assert_eq!(nvs.commit(handle), Ok(()));
        nvs.close(handle);
        assert_eq!(nvs.commit(handle), Err(NvsError::InvalidHandle));
    }

    #[test]
    fn test_commit_rotates_slots() {
        let mut nvs = mounted(MockFlash::new());
        for (value, slot) in [(1, 0), (2, 1), (3, 2), (4, 3), (5, 0)] {
            commit_u32(&mut nvs, "level", value);
            assert_eq!(nvs.stats().active_slot, Some(slot));
        }

        assert_eq!(nvs.stats().total_commits, 5);
        assert_eq!(nvs.stats().sequence, 5);
        assert_eq!(nvs.flash_mut().get_erase_count(CONFIG.slot_address(0)), 2);
        assert_eq!(nvs.flash_mut().get_erase_count(CONFIG.slot_address(1)), 1);

        let mut nvs = reload(nvs);
        assert_eq!(nvs.stats().active_slot, Some(0));
        assert_eq!(read_u32(&mut nvs, "level"), Ok(5));
    }

    #[test]
    fn test_unchanged_commit_skips_write() {
        let mut nvs = mounted(MockFlash::new());
        commit_u32(&mut nvs, "level", 7);
        commit_u32(&mut nvs, "level", 7);

        assert_eq!(nvs.stats().total_commits, 1);
        assert_eq!(nvs.flash_mut().get_total_erase_count(), 1);
    }

    #[test]
    fn test_corrupted_newest_slot_falls_back() {
        let mut nvs = mounted(MockFlash::new());
        commit_u32(&mut nvs, "level", 1);
        commit_u32(&mut nvs, "level", 2);

        nvs.flash_mut()
            .inject_corruption(CONFIG.slot_address(1) + ImageHeader::SIZE as u32 + 2, 4);

        let mut nvs = reload(nvs);
        assert_eq!(nvs.stats().active_slot, Some(0));
        assert_eq!(read_u32(&mut nvs, "level"), Ok(1));

        // The next commit goes to the slot after the surviving one
        commit_u32(&mut nvs, "level", 3);
        assert_eq!(nvs.stats().active_slot, Some(1));
        assert_eq!(read_u32(&mut reload(nvs), "level"), Ok(3));
    }

    #[test]
    fn test_power_loss_keeps_previous_image() {
        let mut nvs = mounted(MockFlash::new());
        commit_u32(&mut nvs, "level", 1);

        nvs.flash_mut().simulate_power_loss();
        commit_u32(&mut nvs, "level", 2);

        assert_eq!(read_u32(&mut reload(nvs), "level"), Ok(1));
    }

    #[test]
    fn test_failed_write_keeps_state() {
        let mut nvs = mounted(MockFlash::new());
        commit_u32(&mut nvs, "level", 1);

        nvs.flash_mut().set_write_fault(true);
        let handle = nvs.open("cfg", OpenMode::ReadWrite).unwrap();
        nvs.set_u32(handle, "level", 2).unwrap();
        assert!(nvs.commit(handle).is_err());
        nvs.close(handle);
        nvs.flash_mut().set_write_fault(false);

        assert_eq!(nvs.stats().total_commits, 1);
        assert_eq!(read_u32(&mut nvs, "level"), Ok(1));
    }

    #[test]
    fn test_garbage_partition_needs_erase() {
        let mut flash = MockFlash::new();
        flash.write(CONFIG.slot_address(2), &[0x00; 32]).unwrap();

        let mut nvs = FlashNvs::with_config(flash, CONFIG);
        assert_eq!(nvs.flash_init(), Err(NvsError::NoFreePages));

        nvs.flash_erase().unwrap();
        assert_eq!(nvs.flash_init(), Ok(()));
    }

    #[test]
    fn test_newer_version_found() {
        let mut header = ImageHeader::new(1, 0, 0);
        header.version = IMAGE_VERSION + 1;
        let mut flash = MockFlash::new();
        flash
            .write(CONFIG.slot_address(0), &header.to_bytes())
            .unwrap();

        let mut nvs = FlashNvs::with_config(flash, CONFIG);
        assert_eq!(nvs.flash_init(), Err(NvsError::NewVersionFound));
    }

    #[test]
    fn test_image_larger_than_slot() {
        let mut nvs = mounted(MockFlash::new());
        commit_u32(&mut nvs, "level", 1);

        let handle = nvs.open("cfg", OpenMode::ReadWrite).unwrap();
        nvs.set_blob(handle, "a", &[0x11; 3000]).unwrap();
        nvs.set_blob(handle, "b", &[0x22; 3000]).unwrap();
        assert_eq!(nvs.commit(handle), Err(NvsError::NotEnoughSpace));
        nvs.close(handle);

        assert_eq!(nvs.stats().total_commits, 1);
        assert_eq!(read_u32(&mut reload(nvs), "level"), Ok(1));
    }

    #[test]
    fn test_sequence_wraps() {
        assert!(is_newer(5, 3));
        assert!(!is_newer(3, 5));
        assert!(is_newer(0, u16::MAX));
        assert!(!is_newer(4, 4));
    }

    #[test]
    fn test_parse_setting() {
        assert_eq!(parse_setting("0x040000"), Some(0x40000));
        assert_eq!(parse_setting(" 4 "), Some(4));
        assert_eq!(parse_setting("0Xff"), Some(255));
        assert_eq!(parse_setting("four"), None);
        assert_eq!(parse_setting(""), None);
    }

    #[test]
    fn test_ring_too_small_never_mounts() {
        for slot_count in [0, 1] {
            let config = FlashNvsConfig {
                slot_count,
                ..CONFIG
            };
            assert_eq!(config.validate(), Err(NvsError::InvalidLength));

            let mut nvs = FlashNvs::with_config(MockFlash::new(), config);
            assert_eq!(nvs.flash_init(), Err(NvsError::InvalidLength));
            assert_eq!(
                nvs.open("cfg", OpenMode::ReadWrite),
                Err(NvsError::NotInitialized)
            );
            assert_eq!(nvs.stats().total_commits, 0);
        }
        assert_eq!(
            FlashNvsConfig {
                slot_count: MIN_SLOT_COUNT,
                ..CONFIG
            }
            .validate(),
            Ok(())
        );
    }

    #[test]
    fn test_two_slot_ring_survives_power_loss() {
        let config = FlashNvsConfig {
            slot_count: MIN_SLOT_COUNT,
            ..CONFIG
        };
        let mut nvs = FlashNvs::with_config(MockFlash::new(), config);
        nvs.flash_init().unwrap();
        commit_u32(&mut nvs, "level", 1);

        nvs.flash_mut().simulate_power_loss();
        commit_u32(&mut nvs, "level", 2);

        let mut nvs = FlashNvs::with_config(nvs.into_inner(), config);
        nvs.flash_init().unwrap();
        assert_eq!(read_u32(&mut nvs, "level"), Ok(1));
    }

    #[test]
    fn test_default_config() {
        let config = FlashNvsConfig::default();
        assert_eq!(config.slot_size, DEFAULT_SLOT_SIZE);
        assert!(config.slot_count >= MIN_SLOT_COUNT);
        assert_eq!(
            config.partition_size(),
            config.slot_count as u32 * DEFAULT_SLOT_SIZE
        );
    }
}
