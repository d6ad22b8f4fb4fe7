//! FIT base type definitions.

use serde::{Deserialize, Serialize};

/// Wire base types used by the encoder.
///
/// Each variant carries the protocol identifier emitted in definition
/// records and the fixed byte width of its data-record encoding. Only the
/// unsigned/enum subset the activity messages need is represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseType {
    /// Enumerated value (protocol id 0x00)
    Enum,
    /// 8-bit unsigned integer (protocol id 0x02)
    UInt8,
    /// 16-bit unsigned integer (protocol id 0x84)
    UInt16,
    /// 32-bit unsigned integer (protocol id 0x86)
    UInt32,
    /// 32-bit unsigned integer with 0 as the invalid sentinel (protocol id 0x8C)
    UInt32Z,
}

impl BaseType {
    /// Returns the size in bytes of this base type on the wire.
    pub const fn size(self) -> usize {
        match self {
            BaseType::Enum | BaseType::UInt8 => 1,
            BaseType::UInt16 => 2,
            BaseType::UInt32 | BaseType::UInt32Z => 4,
        }
    }

    /// Protocol identifier written into definition records.
    pub const fn protocol_id(self) -> u8 {
        match self {
            BaseType::Enum => 0x00,
            BaseType::UInt8 => 0x02,
            BaseType::UInt16 => 0x84,
            BaseType::UInt32 => 0x86,
            BaseType::UInt32Z => 0x8C,
        }
    }

    /// Largest value representable in this base type's width.
    pub const fn max_value(self) -> u64 {
        match self {
            BaseType::Enum | BaseType::UInt8 => u8::MAX as u64,
            BaseType::UInt16 => u16::MAX as u64,
            BaseType::UInt32 | BaseType::UInt32Z => u32::MAX as u64,
        }
    }
}
