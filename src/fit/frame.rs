//! Record framing: definition-then-data serialization of typed messages.
//!
//! The record stream interleaves two record shapes:
//!
//! 1. **Definition records** (header byte `0x40 | local_type`) declare a
//!    kind's field layout: reserved byte, architecture byte (0 =
//!    little-endian), global message number (u16 LE), field count, then
//!    one (field number, size, base-type id) triple per field.
//! 2. **Data records** (header byte `local_type`) are the fixed-width
//!    little-endian concatenation of field values in the order declared by
//!    the live definition for that local type.
//!
//! The encoder assigns local message types 0..=15 in first-use order and
//! emits a definition only when a kind first appears or when its field
//! layout changes (a set without weight following one with weight). Width
//! violations and data-before-definition are hard errors, never silent
//! truncation.

use tracing::{debug, trace};

use super::message::{FieldDef, Message, MessageKind};
use crate::{EncodeError, Result};

const DEFINITION_HEADER_BIT: u8 = 0x40;
const ARCH_LITTLE_ENDIAN: u8 = 0;
const MAX_LOCAL_TYPES: usize = 16;

/// A definition currently live on a local message type slot.
#[derive(Debug, Clone)]
struct LiveDefinition {
    kind: MessageKind,
    layout: Vec<FieldDef>,
}

/// Serializes an ordered list of typed messages into the binary record
/// stream, tracking the running byte offset for the file header.
#[derive(Debug, Default)]
pub struct FrameEncoder {
    buf: Vec<u8>,
    slots: Vec<LiveDefinition>,
}

impl FrameEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode one message: emit its definition if needed, then its data.
    pub fn encode(&mut self, message: &Message) -> Result<()> {
        let layout: Vec<FieldDef> = message.fields().iter().map(|f| f.def).collect();

        let local = match self.slots.iter().position(|slot| slot.kind == message.kind()) {
            Some(local) => {
                if self.slots[local].layout != layout {
                    trace!(
                        "Field layout changed for {}, re-emitting definition on slot {}",
                        message.kind().name(),
                        local
                    );
                    self.slots[local].layout = layout.clone();
                    self.write_definition(local as u8, message.kind(), &layout)?;
                }
                local as u8
            }
            None => {
                if self.slots.len() == MAX_LOCAL_TYPES {
                    return Err(EncodeError::sequencing(format!(
                        "local message type slots exhausted ({MAX_LOCAL_TYPES}) defining {}",
                        message.kind().name()
                    )));
                }
                let local = self.slots.len() as u8;
                self.slots.push(LiveDefinition { kind: message.kind(), layout: layout.clone() });
                self.write_definition(local, message.kind(), &layout)?;
                local
            }
        };

        self.write_data_record(local, message)
    }

    /// Emit a data record against an already-live definition.
    ///
    /// Fails with a defect-class error when no definition for the message's
    /// kind and layout is live; the framing discipline requires the
    /// definition to precede its data.
    pub fn write_data_record(&mut self, local: u8, message: &Message) -> Result<()> {
        let slot = self.slots.get(local as usize).ok_or_else(|| {
            EncodeError::sequencing(format!(
                "data record for {} emitted before any definition",
                message.kind().name()
            ))
        })?;
        if slot.kind != message.kind() {
            return Err(EncodeError::sequencing(format!(
                "local type {} is defined as {}, not {}",
                local,
                slot.kind.name(),
                message.kind().name()
            )));
        }
        let matches_layout = slot.layout.len() == message.fields().len()
            && slot.layout.iter().zip(message.fields()).all(|(def, field)| *def == field.def);
        if !matches_layout {
            return Err(EncodeError::sequencing(format!(
                "data record for {} does not match its live definition",
                message.kind().name()
            )));
        }

        self.buf.push(local);
        for field in message.fields() {
            let max = field.def.base_type.max_value();
            if field.value < 0 || field.value > i128::from(max) {
                return Err(EncodeError::ValueRange {
                    message: message.kind().name(),
                    field: field.def.name,
                    value: field.value,
                    max,
                });
            }
            let bytes = (field.value as u64).to_le_bytes();
            self.buf.extend_from_slice(&bytes[..field.def.base_type.size()]);
        }

        trace!(
            "Data record {} on slot {} ({} bytes total)",
            message.kind().name(),
            local,
            self.buf.len()
        );
        Ok(())
    }

    fn write_definition(&mut self, local: u8, kind: MessageKind, layout: &[FieldDef]) -> Result<()> {
        let field_count = u8::try_from(layout.len()).map_err(|_| {
            EncodeError::sequencing(format!(
                "definition for {} declares {} fields, above the u8 field count",
                kind.name(),
                layout.len()
            ))
        })?;

        self.buf.push(DEFINITION_HEADER_BIT | local);
        self.buf.push(0); // reserved
        self.buf.push(ARCH_LITTLE_ENDIAN);
        self.buf.extend_from_slice(&kind.global_number().to_le_bytes());
        self.buf.push(field_count);
        for def in layout {
            self.buf.push(def.number);
            self.buf.push(def.base_type.size() as u8);
            self.buf.push(def.base_type.protocol_id());
        }

        debug!(
            "Definition record {} on slot {} ({} fields)",
            kind.name(),
            local,
            field_count
        );
        Ok(())
    }

    /// Total payload length in bytes, for the file header.
    pub fn payload_len(&self) -> usize {
        self.buf.len()
    }

    /// Consume the encoder and return the record stream.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SetType;
    use chrono::{TimeZone, Utc};

    fn instant() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 24, 10, 0, 0).unwrap()
    }

    #[test]
    fn definition_precedes_first_data_record() {
        let mut encoder = FrameEncoder::new();
        encoder.encode(&Message::file_id(instant())).unwrap();

        let bytes = encoder.into_bytes();
        // Definition header on slot 0
        assert_eq!(bytes[0], 0x40);
        assert_eq!(bytes[1], 0); // reserved
        assert_eq!(bytes[2], 0); // little-endian
        assert_eq!(u16::from_le_bytes([bytes[3], bytes[4]]), 0); // file_id global number
        assert_eq!(bytes[5], 5); // field count
    }

    #[test]
    fn data_record_layout_is_fixed_width() {
        let mut encoder = FrameEncoder::new();
        let msg = Message::timer_start(instant());
        encoder.encode(&msg).unwrap();

        let bytes = encoder.into_bytes();
        // definition: 6 fixed + 3 fields * 3 = 15 bytes; data: 1 header + 1 + 1 + 4
        assert_eq!(bytes.len(), 15 + 7);
        let data = &bytes[15..];
        assert_eq!(data[0], 0); // data header, slot 0
        assert_eq!(data[1], 0); // event = timer
        assert_eq!(data[2], 0); // event_type = start
    }

    #[test]
    fn same_layout_defines_only_once() {
        let mut encoder = FrameEncoder::new();
        let a = Message::set_record(instant(), 30.0, Some(60.0), Some(10), SetType::Normal, 0);
        let b = Message::set_record(instant(), 30.0, Some(60.0), Some(8), SetType::Failure, 1);
        encoder.encode(&a).unwrap();
        let after_first = encoder.payload_len();
        encoder.encode(&b).unwrap();
        let after_second = encoder.payload_len();

        // Second record adds only the data bytes: 1 header + 4+2+2+1+4+2+4
        assert_eq!(after_second - after_first, 1 + 19);
    }

    #[test]
    fn layout_change_reemits_definition() {
        let mut encoder = FrameEncoder::new();
        let with_weight =
            Message::set_record(instant(), 30.0, Some(60.0), Some(10), SetType::Normal, 0);
        let without_weight = Message::set_record(instant(), 30.0, None, None, SetType::Normal, 1);

        encoder.encode(&with_weight).unwrap();
        let after_first = encoder.payload_len();
        encoder.encode(&without_weight).unwrap();
        let added = encoder.payload_len() - after_first;

        // New definition (6 + 5*3 = 21) plus data (1 + 4+1+4+2+4 = 16)
        assert_eq!(added, 21 + 16);
    }

    #[test]
    fn data_before_definition_is_a_sequencing_error() {
        let mut encoder = FrameEncoder::new();
        let msg = Message::timer_start(instant());
        let err = encoder.write_data_record(0, &msg).unwrap_err();
        assert!(matches!(err, EncodeError::Sequencing { .. }));
        assert!(err.is_defect());
    }

    #[test]
    fn mismatched_slot_kind_is_a_sequencing_error() {
        let mut encoder = FrameEncoder::new();
        encoder.encode(&Message::file_id(instant())).unwrap();
        let err = encoder.write_data_record(0, &Message::timer_start(instant())).unwrap_err();
        assert!(matches!(err, EncodeError::Sequencing { .. }));
    }

    #[test]
    fn oversized_value_is_rejected_not_truncated() {
        let mut encoder = FrameEncoder::new();
        // 10 tonnes scales to 160_000, past the u16 weight field
        let msg =
            Message::set_record(instant(), 30.0, Some(10_000.0), Some(1), SetType::Normal, 0);
        let err = encoder.encode(&msg).unwrap_err();
        match err {
            EncodeError::ValueRange { message, field, value, max } => {
                assert_eq!(message, "set");
                assert_eq!(field, "weight");
                assert_eq!(value, 160_000);
                assert_eq!(max, u64::from(u16::MAX));
            }
            other => panic!("expected ValueRange, got {other:?}"),
        }
    }

    #[test]
    fn negative_timestamp_is_rejected() {
        let mut encoder = FrameEncoder::new();
        let ancient = Utc.with_ymd_and_hms(1985, 1, 1, 0, 0, 0).unwrap();
        let err = encoder.encode(&Message::timer_start(ancient)).unwrap_err();
        assert!(matches!(err, EncodeError::ValueRange { field: "timestamp", .. }));
    }

    #[test]
    fn distinct_kinds_get_distinct_slots() {
        let mut encoder = FrameEncoder::new();
        encoder.encode(&Message::file_id(instant())).unwrap();
        encoder.encode(&Message::timer_start(instant())).unwrap();
        let bytes = encoder.into_bytes();

        // file_id definition (6 + 5*3 = 21) + data (1 + 1+2+2+4+4 = 14) = 35,
        // then the event definition lands on slot 1
        assert_eq!(bytes[35], 0x41);
    }

    #[test]
    fn payload_len_tracks_buffer() {
        let mut encoder = FrameEncoder::new();
        assert_eq!(encoder.payload_len(), 0);
        encoder.encode(&Message::timer_start(instant())).unwrap();
        assert_eq!(encoder.payload_len(), 22);
    }
}
