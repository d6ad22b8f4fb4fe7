//! File assembly: header, checksums, and the finished activity file.
//!
//! ## File Structure
//!
//! 1. **Header** (14 bytes): size, protocol version, profile version,
//!    payload length, ".FIT" tag, header CRC
//! 2. **Record payload**: the definition/data stream from the frame encoder
//! 3. **File CRC** (2 bytes): over the entire file so far
//!
//! Both checksums use the same CRC-16 ([`super::crc`]). The spans matter as
//! much as the algorithm: the header CRC covers the 12 bytes before it, and
//! the trailing CRC covers header (its CRC included) plus payload. A file
//! that omits the header from the trailing span fails validation on the
//! consuming platform even when every record is correct.

use tracing::debug;

use super::crc;
use crate::{EncodeError, Result};

/// Header length in bytes, including the header CRC.
pub const HEADER_SIZE: u8 = 14;

/// Protocol version 2.0: major in the high nibble.
pub const PROTOCOL_VERSION: u8 = 0x20;

/// Profile version 21.94, scaled by 100.
pub const PROFILE_VERSION: u16 = 2194;

/// Four-character format tag.
pub const DATA_TYPE_TAG: [u8; 4] = *b".FIT";

/// Assemble the complete file: header + payload + trailing CRC.
///
/// `payload` is the record stream only; its length lands in the header's
/// u32 length field and overflow is a hard error.
pub fn assemble(payload: &[u8]) -> Result<Vec<u8>> {
    let data_size = u32::try_from(payload.len())
        .map_err(|_| EncodeError::PayloadOverflow { len: payload.len() as u64 })?;

    let mut file = Vec::with_capacity(usize::from(HEADER_SIZE) + payload.len() + 2);
    file.push(HEADER_SIZE);
    file.push(PROTOCOL_VERSION);
    file.extend_from_slice(&PROFILE_VERSION.to_le_bytes());
    file.extend_from_slice(&data_size.to_le_bytes());
    file.extend_from_slice(&DATA_TYPE_TAG);

    let header_crc = crc::checksum(&file);
    file.extend_from_slice(&header_crc.to_le_bytes());

    file.extend_from_slice(payload);

    let file_crc = crc::checksum(&file);
    file.extend_from_slice(&file_crc.to_le_bytes());

    debug!(
        "Assembled activity file: {} payload bytes, header crc {:#06x}, file crc {:#06x}",
        data_size, header_crc, file_crc
    );
    Ok(file)
}

/// The final artifact: complete file bytes plus the suggested filename.
///
/// Written once, never mutated. Collision policy for the filename belongs
/// to the external storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityFile {
    bytes: Vec<u8>,
    file_name: String,
}

impl ActivityFile {
    pub(crate) fn new(bytes: Vec<u8>, file_name: String) -> Self {
        Self { bytes, file_name }
    }

    /// Complete file bytes (header + records + CRC).
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Suggested filename: `<sanitized-title>_<ISO-date>.fit`.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Consume the artifact, returning the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Derive the suggested filename from the session title and start date.
///
/// Non-alphanumeric runs collapse to a single underscore and the title is
/// lowercased; an empty or fully-symbolic title falls back to "workout".
pub fn suggested_file_name(title: &str, date: chrono::NaiveDate) -> String {
    let mut sanitized = String::with_capacity(title.len());
    let mut last_was_separator = true;
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.extend(ch.to_lowercase());
            last_was_separator = false;
        } else if !last_was_separator {
            sanitized.push('_');
            last_was_separator = true;
        }
    }
    let sanitized = sanitized.trim_end_matches('_');
    let stem = if sanitized.is_empty() { "workout" } else { sanitized };
    format!("{stem}_{}.fit", date.format("%Y-%m-%d"))
}
