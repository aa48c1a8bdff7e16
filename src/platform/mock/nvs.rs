//! Mock NVS backend for testing
//!
//! In-memory namespaces with one-shot fault injection and handle tracking.
//! Sets land immediately, as with the vendor driver; `commit` only counts.

use crate::platform::error::NvsError;
use crate::platform::item::{
    check_length, copy_out, fixed_item_accessors, key_name, namespace_name, Name, NvsItem,
};
use crate::platform::traits::{NvsBackend, NvsHandle, OpenMode};
use crate::platform::Result;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// Backend operation selector for fault injection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NvsOp {
    FlashInit,
    FlashErase,
    Open,
    Commit,
    /// Any fixed-width `get_*`
    Get,
    /// Any `set_*`
    Set,
    GetStrLen,
    GetStr,
    GetBlobLen,
    GetBlob,
}

#[derive(Debug)]
struct OpenNamespace {
    namespace: Name,
    mode: OpenMode,
}

/// In-memory NVS backend
///
/// Faults queued with [`inject_fault`](Self::inject_fault) fire once, on the
/// next call of the matching operation, in the order they were queued.
#[derive(Debug, Default)]
pub struct MockNvs {
    initialized: bool,
    namespaces: BTreeMap<Name, BTreeMap<Name, NvsItem>>,
    handles: BTreeMap<u32, OpenNamespace>,
    next_handle: u32,
    faults: Vec<(NvsOp, NvsError)>,
    init_calls: u32,
    erase_calls: u32,
    commits: u32,
}

impl MockNvs {
    /// Create an empty, uninitialized backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `op` with `error`
    pub fn inject_fault(&mut self, op: NvsOp, error: NvsError) {
        self.faults.push((op, error));
    }

    /// Store an item directly, bypassing handles (e.g. data left by older firmware)
    pub fn insert(&mut self, namespace: &str, key: &str, item: NvsItem) {
        if let (Ok(ns), Ok(key)) = (namespace_name(namespace), key_name(key)) {
            self.namespaces.entry(ns).or_default().insert(key, item);
        }
    }

    /// Peek at a stored item
    pub fn item(&self, namespace: &str, key: &str) -> Option<&NvsItem> {
        let namespace = namespace_name(namespace).ok()?;
        let key = key_name(key).ok()?;
        self.namespaces.get(&namespace)?.get(&key)
    }

    /// Whether a namespace exists
    pub fn has_namespace(&self, namespace: &str) -> bool {
        namespace_name(namespace).is_ok_and(|ns| self.namespaces.contains_key(&ns))
    }

    /// Number of handles currently open
    pub fn open_handles(&self) -> usize {
        self.handles.len()
    }

    pub fn commit_count(&self) -> u32 {
        self.commits
    }

    pub fn init_calls(&self) -> u32 {
        self.init_calls
    }

    pub fn erase_calls(&self) -> u32 {
        self.erase_calls
    }

    fn take_fault(&mut self, op: NvsOp) -> Result<()> {
        match self.faults.iter().position(|(queued, _)| *queued == op) {
            Some(index) => Err(self.faults.remove(index).1),
            None => Ok(()),
        }
    }

    fn handle(&self, handle: NvsHandle) -> Result<&OpenNamespace> {
        if !self.initialized {
            return Err(NvsError::NotInitialized);
        }
        self.handles
            .get(&handle.raw())
            .ok_or(NvsError::InvalidHandle)
    }

    fn find(&self, handle: NvsHandle, key: &str) -> Result<&NvsItem> {
        let open = self.handle(handle)?;
        let key = key_name(key)?;
        self.namespaces
            .get(&open.namespace)
            .and_then(|items| items.get(&key))
            .ok_or(NvsError::NotFound)
    }

    fn lookup(&mut self, handle: NvsHandle, key: &str) -> Result<&NvsItem> {
        self.take_fault(NvsOp::Get)?;
        self.find(handle, key)
    }

    fn stage(&mut self, handle: NvsHandle, key: &str, item: NvsItem) -> Result<()> {
        self.take_fault(NvsOp::Set)?;
        let open = self.handle(handle)?;
        if open.mode == OpenMode::ReadOnly {
            return Err(NvsError::ReadOnly);
        }
        let namespace = open.namespace.clone();
        let key = key_name(key)?;
        check_length(&item)?;

        self.namespaces
            .entry(namespace)
            .or_default()
            .insert(key, item);
        Ok(())
    }
}

impl NvsBackend for MockNvs {
    fn flash_init(&mut self) -> Result<()> {
        self.init_calls += 1;
        self.take_fault(NvsOp::FlashInit)?;
        self.initialized = true;
        Ok(())
    }

    fn flash_erase(&mut self) -> Result<()> {
        self.erase_calls += 1;
        self.take_fault(NvsOp::FlashErase)?;
        self.namespaces.clear();
        self.handles.clear();
        self.initialized = false;
        Ok(())
    }

    fn open(&mut self, namespace: &str, mode: OpenMode) -> Result<NvsHandle> {
        self.take_fault(NvsOp::Open)?;
        if !self.initialized {
            return Err(NvsError::NotInitialized);
        }

        let namespace = namespace_name(namespace)?;
        if !self.namespaces.contains_key(&namespace) {
            if mode == OpenMode::ReadOnly {
                return Err(NvsError::NotFound);
            }
            self.namespaces.insert(namespace.clone(), BTreeMap::new());
        }

        self.next_handle += 1;
        self.handles
            .insert(self.next_handle, OpenNamespace { namespace, mode });
        Ok(NvsHandle::new(self.next_handle))
    }

    fn close(&mut self, handle: NvsHandle) {
        self.handles.remove(&handle.raw());
    }

    fn commit(&mut self, handle: NvsHandle) -> Result<()> {
        self.take_fault(NvsOp::Commit)?;
        self.handle(handle)?;
        self.commits += 1;
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
        self.take_fault(NvsOp::GetStrLen)?;
        match self.find(handle, key)? {
            NvsItem::Str(value) => Ok(value.len()),
            _ => Err(NvsError::NotFound),
        }
    }

    fn get_str(&mut self, handle: NvsHandle, key: &str, buf: &mut [u8]) -> Result<usize> {
        self.take_fault(NvsOp::GetStr)?;
        match self.find(handle, key)? {
            NvsItem::Str(value) => copy_out(value.as_bytes(), buf),
            _ => Err(NvsError::NotFound),
        }
    }

    fn set_str(&mut self, handle: NvsHandle, key: &str, value: &str) -> Result<()> {
        self.stage(handle, key, NvsItem::Str(String::from(value)))
    }

    fn get_blob_len(&mut self, handle: NvsHandle, key: &str) -> Result<usize> {
        self.take_fault(NvsOp::GetBlobLen)?;
        match self.find(handle, key)? {
            NvsItem::Blob(value) => Ok(value.len()),
            _ => Err(NvsError::NotFound),
        }
    }

    fn get_blob(&mut self, handle: NvsHandle, key: &str, buf: &mut [u8]) -> Result<usize> {
        self.take_fault(NvsOp::GetBlob)?;
        match self.find(handle, key)? {
            NvsItem::Blob(value) => copy_out(value, buf),
            _ => Err(NvsError::NotFound),
        }
    }

    fn set_blob(&mut self, handle: NvsHandle, key: &str, value: &[u8]) -> Result<()> {
        self.stage(handle, key, NvsItem::Blob(value.to_vec()))
    }
}
