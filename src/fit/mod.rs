//! Binary activity-file format: message model, framing, and assembly.
//!
//! The write path runs bottom-up through this module:
//!
//! 1. [`message`] builds typed, unit-converted records for the six kinds
//! 2. [`frame`] serializes them with the definition-then-data discipline
//! 3. [`file`] wraps the record stream in the header and both CRCs
//!
//! Everything here is pure computation over owned buffers; file writing is
//! the caller's boundary effect.

mod base_type;
pub mod crc;
mod file;
mod frame;
mod message;

pub use base_type::BaseType;
pub use file::{
    ActivityFile, DATA_TYPE_TAG, HEADER_SIZE, PROFILE_VERSION, PROTOCOL_VERSION, assemble,
    suggested_file_name,
};
pub use frame::FrameEncoder;
pub use message::{EncodedField, FieldDef, Message, MessageKind};
