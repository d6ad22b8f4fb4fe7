//! FIT 16-bit cyclic redundancy check.
//!
//! The format guards both the file header and the complete file with the
//! same nibble-table CRC-16. A conformant reader computes the CRC over the
//! received span and compares it with the stored value, so a single wrong
//! byte anywhere in the span makes the whole file unreadable.
//!
//! A useful property for verification: appending a span's CRC to the span
//! (little-endian) drives the CRC of the extended span to zero.

const CRC_TABLE: [u16; 16] = [
    0x0000, 0xCC01, 0xD801, 0x1400, 0xF001, 0x3C00, 0x2800, 0xE401, 0xA001, 0x6C00, 0x7800,
    0xB401, 0x5000, 0x9C01, 0x8801, 0x4400,
];

/// Fold one byte into a running CRC.
pub fn update(mut crc: u16, byte: u8) -> u16 {
    // Lower nibble
    let mut tmp = CRC_TABLE[(crc & 0xF) as usize];
    crc = (crc >> 4) & 0x0FFF;
    crc ^= tmp ^ CRC_TABLE[(byte & 0xF) as usize];

    // Upper nibble
    tmp = CRC_TABLE[(crc & 0xF) as usize];
    crc = (crc >> 4) & 0x0FFF;
    crc ^= tmp ^ CRC_TABLE[((byte >> 4) & 0xF) as usize];

    crc
}

/// CRC of a byte span, starting from zero.
pub fn checksum(data: &[u8]) -> u16 {
    data.iter().fold(0, |crc, &byte| update(crc, byte))
}
