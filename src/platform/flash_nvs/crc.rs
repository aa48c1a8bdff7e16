//! CRC32 over flash slot images

use crc::{Crc, CRC_32_ISO_HDLC};

/// CRC32 algorithm (ISO HDLC / Ethernet / ZIP)
const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Checksum of a slot header followed by its payload
///
/// # Example
///
/// ```
/// use nvparam::platform::flash_nvs::crc::image_crc32;
///
/// assert_eq!(image_crc32(b"1234", b"56789"), 0xCBF43926);
/// ```
pub fn image_crc32(header: &[u8], payload: &[u8]) -> u32 {
    let mut digest = CRC32.digest();
    digest.update(header);
    digest.update(payload);
    digest.finalize()
}

/// Check a slot image against its stored checksum
pub fn validate_image_crc32(header: &[u8], payload: &[u8], expected_crc: u32) -> bool {
    image_crc32(header, payload) == expected_crc
}
