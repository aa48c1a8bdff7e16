//! End-to-end parameter store scenarios

use super::store::ParamStore;
use crate::platform::error::{FlashError, NvsError};
use crate::platform::flash_nvs::{FlashNvs, FlashNvsConfig};
use crate::platform::item::NvsItem;
use crate::platform::mock::{MockFlash, MockNvs, NvsOp};
use crate::platform::traits::FlashInterface;
use nvparam_core::time::{parse_time_window, TimeOfDay, TimeWindow};
use nvparam_core::value::{values_equal, Value, ValueKind};

fn mock_store() -> ParamStore<MockNvs> {
    ParamStore::new(MockNvs::new())
}

fn samples() -> [Value; 13] {
    [
        Value::I8(-5),
        Value::U8(200),
        Value::I16(-1234),
        Value::U16(60000),
        Value::I32(-70000),
        Value::U32(4_000_000_000),
        Value::I64(-9_000_000_000),
        Value::U64(u64::MAX),
        Value::F32(0.1),
        Value::F64(-273.15),
        Value::Str("greenhouse".into()),
        Value::Time(TimeOfDay::new(7, 30)),
        Value::Window(parse_time_window("22:00-24:00")),
    ]
}

#[test]
fn test_write_then_read_every_kind() {
    let mut store = mock_store();
    for (index, sample) in samples().iter().enumerate() {
        let key = format!("k{}", index);
        assert!(store.write_value("cfg", &key, sample));

        let mut read = Value::zero(sample.kind());
        assert!(store.read_value("cfg", &key, &mut read));
        assert!(values_equal(Some(&read), Some(sample)), "{:?}", sample);
    }
    assert_eq!(store.backend().open_handles(), 0);
}

#[test]
fn test_native_item_types() {
    let mut store = mock_store();
    assert!(store.write_value("cfg", "start", &Value::Time(TimeOfDay::new(6, 15))));
    assert!(store.write_value("cfg", "ratio", &Value::F32(0.5)));
    assert!(store.write_value(
        "cfg",
        "span",
        &Value::Window(TimeWindow::new(TimeOfDay::new(23, 0), TimeOfDay::new(6, 0)))
    ));

    let nvs = store.backend();
    assert_eq!(nvs.item("cfg", "start"), Some(&NvsItem::U16(615)));
    assert_eq!(nvs.item("cfg", "ratio"), Some(&NvsItem::U32(0.5f32.to_bits())));
    assert_eq!(nvs.item("cfg", "span"), Some(&NvsItem::U32(23000600)));
}

#[test]
fn test_missing_namespace_keeps_default() {
    let mut store = mock_store();
    let mut value = Value::U32(42);

    assert!(!store.read_value("cfg", "interval", &mut value));
    assert_eq!(value, Value::U32(42));
    assert_eq!(store.backend().open_handles(), 0);
}

#[test]
fn test_missing_key_keeps_default() {
    let mut store = mock_store();
    assert!(store.write_value("cfg", "other", &Value::U8(1)));

    let mut value = Value::U32(42);
    assert!(store.read_value("cfg", "interval", &mut value));
    assert_eq!(value, Value::U32(42));

    let mut text = Value::from("default");
    assert!(store.read_value("cfg", "name", &mut text));
    assert_eq!(text.as_str(), Some("default"));
}

#[test]
fn test_other_item_type_reads_as_missing() {
    let mut store = mock_store();
    assert!(store.write_value("cfg", "level", &Value::U16(7)));

    let mut value = Value::U32(1);
    assert!(store.read_value("cfg", "level", &mut value));
    assert_eq!(value, Value::U32(1));
}

#[test]
fn test_empty_key_never_touches_storage() {
    let mut store = mock_store();
    let mut value = Value::U8(3);

    assert!(!store.read_value("cfg", "", &mut value));
    assert!(!store.write_value("cfg", "", &value));
    assert!(!store.read_timestamp("cfg", "", &mut 0));
    assert!(!store.write_timestamp("cfg", "", 0));
    assert_eq!(store.backend().init_calls(), 0);
    assert_eq!(value, Value::U8(3));
}

#[test]
fn test_string_read_failure_keeps_previous() {
    let mut store = mock_store();
    assert!(store.write_value("cfg", "name", &Value::from("a much longer name")));

    let mut value = Value::from("old");
    store
        .backend_mut()
        .inject_fault(NvsOp::GetStr, NvsError::Flash(FlashError::ReadFailed));
    assert!(!store.read_value("cfg", "name", &mut value));
    assert_eq!(value.as_str(), Some("old"));

    store
        .backend_mut()
        .inject_fault(NvsOp::GetStrLen, NvsError::InvalidHandle);
    assert!(!store.read_value("cfg", "name", &mut value));
    assert_eq!(value.as_str(), Some("old"));
    assert_eq!(store.backend().open_handles(), 0);

    assert!(store.read_value("cfg", "name", &mut value));
    assert_eq!(value.as_str(), Some("a much longer name"));
}

#[test]
fn test_fixed_read_failure_keeps_value() {
    let mut store = mock_store();
    assert!(store.write_value("cfg", "count", &Value::I64(99)));

    let mut value = Value::I64(-1);
    store
        .backend_mut()
        .inject_fault(NvsOp::Get, NvsError::TypeMismatch);
    assert!(!store.read_value("cfg", "count", &mut value));
    assert_eq!(value, Value::I64(-1));
    assert_eq!(store.backend().open_handles(), 0);
}

#[test]
fn test_write_reports_set_and_commit_failures() {
    let mut store = mock_store();

    store
        .backend_mut()
        .inject_fault(NvsOp::Set, NvsError::NotEnoughSpace);
    assert!(!store.write_value("cfg", "count", &Value::U8(1)));
    assert_eq!(store.backend().commit_count(), 0);

    store
        .backend_mut()
        .inject_fault(NvsOp::Commit, NvsError::Flash(FlashError::WriteFailed));
    assert!(!store.write_value("cfg", "count", &Value::U8(1)));

    store
        .backend_mut()
        .inject_fault(NvsOp::Open, NvsError::InvalidName);
    assert!(!store.write_value("cfg", "count", &Value::U8(1)));

    assert_eq!(store.backend().open_handles(), 0);
}

#[test]
fn test_write_is_idempotent() {
    let mut store = mock_store();
    let value = Value::from("same");

    assert!(store.write_value("cfg", "name", &value));
    assert!(store.write_value("cfg", "name", &value));

    assert_eq!(store.backend().commit_count(), 2);
    assert_eq!(
        store.backend().item("cfg", "name"),
        Some(&NvsItem::Str("same".into()))
    );
}

#[test]
fn test_key_too_long_fails() {
    let mut store = mock_store();
    assert!(!store.write_value("cfg", "sixteen_chars___", &Value::U8(1)));
}

#[test]
fn test_init_erases_and_retries() {
    for error in [NvsError::NoFreePages, NvsError::NewVersionFound] {
        let mut store = mock_store();
        store.backend_mut().inject_fault(NvsOp::FlashInit, error);

        assert!(store.init());
        assert!(store.is_initialized());
        assert_eq!(store.backend().erase_calls(), 1);
        assert_eq!(store.backend().init_calls(), 2);

        assert!(store.init());
        assert_eq!(store.backend().init_calls(), 2);
    }
}

#[test]
fn test_init_retries_after_failed_erase() {
    let mut store = mock_store();
    store
        .backend_mut()
        .inject_fault(NvsOp::FlashInit, NvsError::NoFreePages);
    store
        .backend_mut()
        .inject_fault(NvsOp::FlashErase, NvsError::Flash(FlashError::EraseFailed));

    assert!(store.init());
    assert!(store.is_initialized());
    assert_eq!(store.backend().erase_calls(), 1);
    assert_eq!(store.backend().init_calls(), 2);
}

#[test]
fn test_failed_init_is_retried() {
    let mut store = mock_store();
    store
        .backend_mut()
        .inject_fault(NvsOp::FlashInit, NvsError::Flash(FlashError::Busy));

    let mut value = Value::U8(1);
    assert!(!store.read_value("cfg", "k", &mut value));
    assert!(!store.is_initialized());
    assert_eq!(store.backend().erase_calls(), 0);

    assert!(store.write_value("cfg", "k", &Value::U8(2)));
    assert!(store.read_value("cfg", "k", &mut value));
    assert_eq!(value, Value::U8(2));
}

#[test]
fn test_legacy_float_blob() {
    let mut store = mock_store();
    assert!(store.init());
    store
        .backend_mut()
        .insert("cfg", "gain", NvsItem::Blob(0.75f64.to_le_bytes().to_vec()));

    let mut value = Value::F64(0.0);
    assert!(store.read_value("cfg", "gain", &mut value));
    assert_eq!(value, Value::F64(0.75));
}

#[test]
fn test_timestamps() {
    let mut store = mock_store();
    let mut boot = 0i64;
    assert!(store.write_timestamp("clock", "other", 1));
    assert!(store.read_timestamp("clock", "boot", &mut boot));
    assert_eq!(boot, 0);

    assert!(store.write_timestamp("clock", "boot", 1_700_000_000));
    assert!(store.read_timestamp("clock", "boot", &mut boot));
    assert_eq!(boot, 1_700_000_000);
}

#[test]
fn test_zero_values_of_every_kind_persist() {
    let mut store = mock_store();
    for kind in ValueKind::ALL {
        let zero = Value::zero(kind);
        assert!(store.write_value("zero", "v", &zero));
        let mut read = Value::zero(kind);
        assert!(store.read_value("zero", "v", &mut read));
        assert!(values_equal(Some(&read), Some(&zero)));
    }
}

const FLASH_CONFIG: FlashNvsConfig = FlashNvsConfig {
    base_address: 0x040000,
    slot_count: 4,
    slot_size: 4096,
};

#[test]
fn test_flash_backend_survives_power_cycle() {
    let mut store = ParamStore::new(FlashNvs::with_config(MockFlash::new(), FLASH_CONFIG));
    for (index, sample) in samples().iter().enumerate() {
        assert!(store.write_value("cfg", &format!("k{}", index), sample));
    }
    assert!(store.write_timestamp("cfg", "boot", -42));

    let flash = store.into_inner().into_inner();
    let mut store = ParamStore::new(FlashNvs::with_config(flash, FLASH_CONFIG));
    for (index, sample) in samples().iter().enumerate() {
        let mut read = Value::zero(sample.kind());
        assert!(store.read_value("cfg", &format!("k{}", index), &mut read));
        assert!(values_equal(Some(&read), Some(sample)), "{:?}", sample);
    }
    let mut boot = 0;
    assert!(store.read_timestamp("cfg", "boot", &mut boot));
    assert_eq!(boot, -42);
}

#[test]
fn test_flash_backend_erases_garbage_partition() {
    let mut flash = MockFlash::new();
    flash.write(FLASH_CONFIG.base_address, &[0x00; 64]).unwrap();

    let mut store = ParamStore::new(FlashNvs::with_config(flash, FLASH_CONFIG));
    assert!(store.init());
    assert!(store.write_value("cfg", "k", &Value::U8(9)));

    let mut value = Value::U8(0);
    assert!(store.read_value("cfg", "k", &mut value));
    assert_eq!(value, Value::U8(9));
}

#[test]
fn test_flash_backend_keeps_value_after_failed_commit() {
    let mut store = ParamStore::new(FlashNvs::with_config(MockFlash::new(), FLASH_CONFIG));
    assert!(store.write_value("cfg", "name", &Value::from("first")));

    store.backend_mut().flash_mut().set_write_fault(true);
    assert!(!store.write_value("cfg", "name", &Value::from("second")));
    store.backend_mut().flash_mut().set_write_fault(false);

    let mut value = Value::from("default");
    assert!(store.read_value("cfg", "name", &mut value));
    assert_eq!(value.as_str(), Some("first"));
}

#[test]
fn test_flash_ring_too_small_is_rejected() {
    for slot_count in [0, 1] {
        let config = FlashNvsConfig {
            slot_count,
            ..FLASH_CONFIG
        };
        let mut store = ParamStore::new(FlashNvs::with_config(MockFlash::new(), config));

        assert!(!store.write_value("cfg", "k", &Value::U32(1)));
        assert!(!store.write_value("cfg", "k", &Value::U32(2)));
        assert!(!store.is_initialized());
        assert_eq!(store.backend().stats().total_commits, 0);
    }
}
