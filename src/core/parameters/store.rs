//! Parameter store
//!
//! Persists [`Value`]s under `(namespace, key)` on an [`NvsBackend`].
//!
//! Every read or write opens the namespace, performs one kind-specific
//! backend call and closes the handle again through the [`Namespace`] guard.
//! Backend errors never escape: each operation reports `bool` and logs the
//! status code.
//!
//! # Read Semantics
//!
//! - A missing namespace or key is not an error: the caller's value is the
//!   default and stays unchanged
//! - A failed read leaves the caller's value unchanged
//! - Strings are read into a fresh buffer and swapped in only once complete
//!
//! # Example
//!
//! ```ignore
//! let mut store = ParamStore::new(backend);
//!
//! let mut interval = Value::U32(60);
//! store.read_value("pump", "interval", &mut interval);
//!
//! store.write_value("pump", "interval", &Value::U32(300));
//! ```

use super::compat;
use crate::platform::error::NvsError;
use crate::platform::traits::{NvsBackend, NvsHandle, OpenMode};
use crate::platform::Result;
use crate::{log_debug, log_error, log_info, log_warn};
use alloc::string::String;
use alloc::vec;
use nvparam_core::time::{TimeOfDay, TimeWindow};
use nvparam_core::value::{Value, ValueKind};

/// Open namespace
///
/// Closes its handle when dropped.
pub struct Namespace<'a, B: NvsBackend> {
    backend: &'a mut B,
    handle: NvsHandle,
}

impl<'a, B: NvsBackend> Namespace<'a, B> {
    pub fn handle(&self) -> NvsHandle {
        self.handle
    }

    /// Backend the handle belongs to
    pub fn backend(&mut self) -> &mut B {
        self.backend
    }

    /// Persist items set through this handle
    pub fn commit(&mut self) -> Result<()> {
        self.backend.commit(self.handle)
    }
}

impl<'a, B: NvsBackend> Drop for Namespace<'a, B> {
    fn drop(&mut self) {
        self.backend.close(self.handle);
    }
}

/// Typed parameter store over an NVS backend
pub struct ParamStore<B: NvsBackend> {
    backend: B,
    initialized: bool,
}

impl<B: NvsBackend> ParamStore<B> {
    /// Create a store; the partition is mounted lazily by [`init`](Self::init)
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            initialized: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Release the backend
    pub fn into_inner(self) -> B {
        self.backend
    }

    /// Mount the partition
    ///
    /// A partition without free pages or written by a newer format is erased
    /// and mounted again. Success sticks: later calls return `true` without
    /// touching the backend. A failure is retried on the next call.
    pub fn init(&mut self) -> bool {
        if self.initialized {
            return true;
        }

        let mut status = self.backend.flash_init();
        if matches!(
            status,
            Err(NvsError::NoFreePages) | Err(NvsError::NewVersionFound)
        ) {
            log_info!("Erasing NVS partition...");
            if let Err(err) = self.backend.flash_erase() {
                log_warn!(
                    "NVS partition erase error: {} ({})",
                    err.code(),
                    err.name()
                );
            }
            status = self.backend.flash_init();
        }

        match status {
            Ok(()) => {
                log_info!("NVS partition initialized");
                self.initialized = true;
                true
            }
            Err(err) => {
                log_error!(
                    "NVS partition initialization error: {} ({})",
                    err.code(),
                    err.name()
                );
                false
            }
        }
    }

    /// Open a namespace
    ///
    /// A read-only open of a namespace that does not exist yet returns
    /// `Err(NotFound)` without logging; callers fall back to defaults.
    pub fn open(&mut self, namespace: &str, mode: OpenMode) -> Result<Namespace<'_, B>> {
        match self.backend.open(namespace, mode) {
            Ok(handle) => Ok(Namespace {
                backend: &mut self.backend,
                handle,
            }),
            Err(NvsError::NotFound) if mode == OpenMode::ReadOnly => Err(NvsError::NotFound),
            Err(err) => {
                log_error!(
                    "Error opening NVS namespace \"{}\": {} ({})!",
                    namespace,
                    err.code(),
                    err.name()
                );
                Err(err)
            }
        }
    }

    /// Read `namespace.key` into `value`
    ///
    /// The kind of `value` selects the stored type. Returns `true` if the
    /// value was read or does not exist yet (`value` keeps its default),
    /// `false` on any other failure (`value` unchanged).
    pub fn read_value(&mut self, namespace: &str, key: &str, value: &mut Value) -> bool {
        if key.is_empty() {
            log_error!("Failed to read value from \"{}\": key is empty!", namespace);
            return false;
        }
        if !self.init() {
            return false;
        }
        let Ok(mut ns) = self.open(namespace, OpenMode::ReadOnly) else {
            return false;
        };

        if value.kind() == ValueKind::Str {
            return read_string(&mut ns, namespace, key, value);
        }

        match read_fixed(&mut ns, key, value) {
            Ok(()) => {
                log_debug!("Read value \"{}.{}\": [{}]", namespace, key, value);
                true
            }
            Err(NvsError::NotFound) => {
                log_debug!(
                    "Value \"{}.{}\" is not initialized yet, used default: [{}]",
                    namespace,
                    key,
                    value
                );
                true
            }
            Err(err) => {
                log_error!(
                    "Error reading \"{}.{}\": {} ({})!",
                    namespace,
                    key,
                    err.code(),
                    err.name()
                );
                false
            }
        }
    }

    /// Write `value` to `namespace.key` and commit
    ///
    /// Returns `true` only if both the set and the commit succeed.
    pub fn write_value(&mut self, namespace: &str, key: &str, value: &Value) -> bool {
        if key.is_empty() {
            log_error!("Failed to write value to \"{}\": key is empty!", namespace);
            return false;
        }
        if !self.init() {
            return false;
        }
        let Ok(mut ns) = self.open(namespace, OpenMode::ReadWrite) else {
            return false;
        };

        let status = write_native(&mut ns, key, value).and_then(|()| ns.commit());
        report_write(namespace, key, status)
    }

    /// Read a unix timestamp stored by [`write_timestamp`](Self::write_timestamp)
    ///
    /// Same contract as [`read_value`](Self::read_value).
    pub fn read_timestamp(&mut self, namespace: &str, key: &str, unix_secs: &mut i64) -> bool {
        if key.is_empty() {
            log_error!("Failed to read value from \"{}\": key is empty!", namespace);
            return false;
        }
        if !self.init() {
            return false;
        }
        let Ok(mut ns) = self.open(namespace, OpenMode::ReadOnly) else {
            return false;
        };

        match compat::get_timestamp(&mut ns, key) {
            Ok(stored) => {
                *unix_secs = stored;
                log_debug!("Read value \"{}.{}\": [{}]", namespace, key, stored);
                true
            }
            Err(NvsError::NotFound) => {
                log_debug!(
                    "Value \"{}.{}\" is not initialized yet, used default: [{}]",
                    namespace,
                    key,
                    *unix_secs
                );
                true
            }
            Err(err) => {
                log_error!(
                    "Error reading \"{}.{}\": {} ({})!",
                    namespace,
                    key,
                    err.code(),
                    err.name()
                );
                false
            }
        }
    }

    /// Write a unix timestamp and commit
    pub fn write_timestamp(&mut self, namespace: &str, key: &str, unix_secs: i64) -> bool {
        if key.is_empty() {
            log_error!("Failed to write value to \"{}\": key is empty!", namespace);
            return false;
        }
        if !self.init() {
            return false;
        }
        let Ok(mut ns) = self.open(namespace, OpenMode::ReadWrite) else {
            return false;
        };

        let status = compat::set_timestamp(&mut ns, key, unix_secs).and_then(|()| ns.commit());
        report_write(namespace, key, status)
    }
}

/// Read a fixed-size kind; `value` is replaced only on success
fn read_fixed<B: NvsBackend>(ns: &mut Namespace<'_, B>, key: &str, value: &mut Value) -> Result<()> {
    let handle = ns.handle();
    let fresh = match value {
        Value::I8(_) => Value::I8(ns.backend().get_i8(handle, key)?),
        Value::U8(_) => Value::U8(ns.backend().get_u8(handle, key)?),
        Value::I16(_) => Value::I16(ns.backend().get_i16(handle, key)?),
        Value::U16(_) => Value::U16(ns.backend().get_u16(handle, key)?),
        Value::I32(_) => Value::I32(ns.backend().get_i32(handle, key)?),
        Value::U32(_) => Value::U32(ns.backend().get_u32(handle, key)?),
        Value::I64(_) => Value::I64(ns.backend().get_i64(handle, key)?),
        Value::U64(_) => Value::U64(ns.backend().get_u64(handle, key)?),
        Value::F32(_) => Value::F32(compat::get_f32(ns, key)?),
        Value::F64(_) => Value::F64(compat::get_f64(ns, key)?),
        Value::Time(_) => Value::Time(TimeOfDay::from_raw(ns.backend().get_u16(handle, key)?)),
        Value::Window(_) => {
            Value::Window(TimeWindow::from_raw(ns.backend().get_u32(handle, key)?))
        }
        // Strings have their own two-step read
        Value::Str(_) => return Err(NvsError::TypeMismatch),
    };

    *value = fresh;
    Ok(())
}

/// Read a string into a scratch buffer and swap it in once complete
fn read_string<B: NvsBackend>(
    ns: &mut Namespace<'_, B>,
    namespace: &str,
    key: &str,
    value: &mut Value,
) -> bool {
    let handle = ns.handle();
    let len = match ns.backend().get_str_len(handle, key) {
        Ok(len) => len,
        Err(NvsError::NotFound) => {
            log_debug!(
                "Value \"{}.{}\" is not initialized yet, used default: [{}]",
                namespace,
                key,
                value
            );
            return true;
        }
        Err(err) => {
            log_warn!(
                "Error reading string \"{}.{}\": {} ({})!",
                namespace,
                key,
                err.code(),
                err.name()
            );
            return false;
        }
    };

    let mut buf = vec![0u8; len];
    let status = ns
        .backend()
        .get_str(handle, key, &mut buf)
        .and_then(|read| {
            buf.truncate(read);
            String::from_utf8(buf).map_err(|_| NvsError::InvalidValue)
        });

    match status {
        Ok(text) => {
            *value = Value::Str(text);
            log_debug!("Read string value \"{}.{}\": [{}]", namespace, key, value);
            true
        }
        Err(err) => {
            log_error!(
                "Error reading string \"{}.{}\": {} ({})!",
                namespace,
                key,
                err.code(),
                err.name()
            );
            false
        }
    }
}

/// Store `value` under its kind's native item type
fn write_native<B: NvsBackend>(ns: &mut Namespace<'_, B>, key: &str, value: &Value) -> Result<()> {
    let handle = ns.handle();
    match value {
        Value::I8(v) => ns.backend().set_i8(handle, key, *v),
        Value::U8(v) => ns.backend().set_u8(handle, key, *v),
        Value::I16(v) => ns.backend().set_i16(handle, key, *v),
        Value::U16(v) => ns.backend().set_u16(handle, key, *v),
        Value::I32(v) => ns.backend().set_i32(handle, key, *v),
        Value::U32(v) => ns.backend().set_u32(handle, key, *v),
        Value::I64(v) => ns.backend().set_i64(handle, key, *v),
        Value::U64(v) => ns.backend().set_u64(handle, key, *v),
        Value::F32(v) => compat::set_f32(ns, key, *v),
        Value::F64(v) => compat::set_f64(ns, key, *v),
        Value::Str(text) => ns.backend().set_str(handle, key, text),
        Value::Time(t) => ns.backend().set_u16(handle, key, t.raw()),
        Value::Window(w) => ns.backend().set_u32(handle, key, w.raw()),
    }
}

fn report_write(namespace: &str, key: &str, status: Result<()>) -> bool {
    match status {
        Ok(()) => {
            log_info!(
                "Value \"{}.{}\" was successfully written to storage",
                namespace,
                key
            );
            true
        }
        Err(err) => {
            log_error!(
                "Error writing \"{}.{}\": {} ({})!",
                namespace,
                key,
                err.code(),
                err.name()
            );
            false
        }
    }
}
