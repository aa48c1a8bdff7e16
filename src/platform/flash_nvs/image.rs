//! Slot image format
//!
//! A slot holds the complete store:
//!
//! ```text
//! [header 16 B][record]...[record][CRC32 4 B]
//!
//! header: magic "NVSP" | version u16 | sequence u16 | record count u16
//!         | reserved u16 | payload length u32
//! record: ns_len u8 | ns | key_len u8 | key | type u8 | len u16 | bytes
//! ```
//!
//! Integers are little-endian. Type 0 is a namespace marker with an empty
//! key, so namespaces without items survive a reload. The CRC covers the
//! header and the records.

use super::crc::{image_crc32, validate_image_crc32};
use crate::platform::error::NvsError;
use crate::platform::item::{key_name, namespace_name, ItemType, Name, NvsItem};
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

/// Slot magic
pub const IMAGE_MAGIC: [u8; 4] = *b"NVSP";

/// Image format version
pub const IMAGE_VERSION: u16 = 1;

/// Size of the trailing CRC32
pub const CRC_SIZE: usize = 4;

/// Record type of a namespace marker
const NAMESPACE_MARKER: u8 = 0;

/// Every namespace with its items
pub type Namespaces = BTreeMap<Name, BTreeMap<Name, NvsItem>>;

/// Slot header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    /// Magic number ("NVSP")
    pub magic: [u8; 4],
    /// Image format version
    pub version: u16,
    /// Sequence number (increments on each commit)
    pub sequence: u16,
    /// Number of records in the payload
    pub record_count: u16,
    /// Reserved for future use
    pub reserved: u16,
    /// Payload length in bytes
    pub payload_len: u32,
}

impl ImageHeader {
    /// Size of header in bytes
    pub const SIZE: usize = 16;

    pub fn new(sequence: u16, record_count: u16, payload_len: u32) -> Self {
        Self {
            magic: IMAGE_MAGIC,
            version: IMAGE_VERSION,
            sequence,
            record_count,
            reserved: 0,
            payload_len,
        }
    }

    /// Serialize header to bytes (little-endian)
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[0..4].copy_from_slice(&self.magic);
        buf[4..6].copy_from_slice(&self.version.to_le_bytes());
        buf[6..8].copy_from_slice(&self.sequence.to_le_bytes());
        buf[8..10].copy_from_slice(&self.record_count.to_le_bytes());
        buf[10..12].copy_from_slice(&self.reserved.to_le_bytes());
        buf[12..16].copy_from_slice(&self.payload_len.to_le_bytes());
        buf
    }

    /// Deserialize header from bytes, `None` if the magic does not match
    pub fn from_bytes(buf: &[u8]) -> Option<Self> {
        if buf.len() < Self::SIZE || buf[0..4] != IMAGE_MAGIC {
            return None;
        }

        Some(Self {
            magic: IMAGE_MAGIC,
            version: u16::from_le_bytes([buf[4], buf[5]]),
            sequence: u16::from_le_bytes([buf[6], buf[7]]),
            record_count: u16::from_le_bytes([buf[8], buf[9]]),
            reserved: u16::from_le_bytes([buf[10], buf[11]]),
            payload_len: u32::from_le_bytes([buf[12], buf[13], buf[14], buf[15]]),
        })
    }
}

/// Serialize a complete slot image
///
/// Fails with `NotEnoughSpace` if the record count does not fit the header.
pub fn encode(sequence: u16, namespaces: &Namespaces) -> Result<Vec<u8>, NvsError> {
    let mut payload = Vec::new();
    let mut records: usize = 0;

    for (namespace, items) in namespaces {
        push_record(&mut payload, namespace, "", NAMESPACE_MARKER, &[]);
        records += 1;

        for (key, item) in items {
            push_record(
                &mut payload,
                namespace,
                key,
                item.item_type() as u8,
                &item.payload(),
            );
            records += 1;
        }
    }

    let record_count = u16::try_from(records).map_err(|_| NvsError::NotEnoughSpace)?;
    let header = ImageHeader::new(sequence, record_count, payload.len() as u32).to_bytes();
    let crc = image_crc32(&header, &payload);

    let mut image = Vec::with_capacity(ImageHeader::SIZE + payload.len() + CRC_SIZE);
    image.extend_from_slice(&header);
    image.extend_from_slice(&payload);
    image.extend_from_slice(&crc.to_le_bytes());
    Ok(image)
}

fn push_record(out: &mut Vec<u8>, namespace: &str, key: &str, item_type: u8, bytes: &[u8]) {
    out.push(namespace.len() as u8);
    out.extend_from_slice(namespace.as_bytes());
    out.push(key.len() as u8);
    out.extend_from_slice(key.as_bytes());
    out.push(item_type);
    out.extend_from_slice(&(bytes.len() as u16).to_le_bytes());
    out.extend_from_slice(bytes);
}

/// Check the CRC and parse the records of a slot
///
/// `body` is the payload followed by the stored CRC.
pub fn decode(header: &ImageHeader, header_bytes: &[u8], body: &[u8]) -> Option<Namespaces> {
    let payload_len = header.payload_len as usize;
    if body.len() != payload_len + CRC_SIZE {
        return None;
    }

    let (payload, crc_bytes) = body.split_at(payload_len);
    let stored_crc = u32::from_le_bytes(crc_bytes.try_into().ok()?);
    if !validate_image_crc32(header_bytes, payload, stored_crc) {
        return None;
    }

    let mut reader = Reader::new(payload);
    let mut namespaces = Namespaces::new();
    for _ in 0..header.record_count {
        let ns_len = reader.u8()? as usize;
        let namespace = namespace_name(reader.text(ns_len)?).ok()?;
        let key_len = reader.u8()? as usize;
        let key = reader.text(key_len)?;
        let item_type = reader.u8()?;
        let len = reader.u16()? as usize;
        let bytes = reader.bytes(len)?;

        let items = namespaces.entry(namespace).or_default();
        if item_type == NAMESPACE_MARKER {
            continue;
        }
        let item = NvsItem::from_payload(ItemType::from_code(item_type)?, bytes)?;
        items.insert(key_name(key).ok()?, item);
    }

    reader.is_empty().then_some(namespaces)
}

/// Bounds-checked cursor over a payload
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn bytes(&mut self, len: usize) -> Option<&'a [u8]> {
        let bytes = self.buf.get(self.pos..self.pos.checked_add(len)?)?;
        self.pos += len;
        Some(bytes)
    }

    fn u8(&mut self) -> Option<u8> {
        Some(self.bytes(1)?[0])
    }

    fn u16(&mut self) -> Option<u16> {
        let bytes = self.bytes(2)?;
        Some(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn text(&mut self, len: usize) -> Option<&'a str> {
        core::str::from_utf8(self.bytes(len)?).ok()
    }

    fn is_empty(&self) -> bool {
        self.pos == self.buf.len()
    }
}
