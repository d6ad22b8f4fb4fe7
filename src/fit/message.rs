//! Typed message model for the activity-file record kinds.
//!
//! Each of the six record kinds has a dedicated constructor that performs
//! the unit conversions and produces a [`Message`]: the kind tag plus an
//! ordered list of (field number, value, base type) tuples ready for
//! framing. Field sets are fixed at compile time per kind; there is no
//! dynamic field assignment, so a typo'd field cannot reach the wire.
//!
//! Field numbers follow the platform profile. One quirk worth naming: the
//! set message is the only kind here whose timestamp field number is 254
//! rather than the usual 253, and whose message_index is 10 rather than 254.

use chrono::{DateTime, Utc};

use super::BaseType;
use crate::units;
use crate::types::SetType;

// Global message numbers from the platform profile
const GLOBAL_FILE_ID: u16 = 0;
const GLOBAL_SESSION: u16 = 18;
const GLOBAL_LAP: u16 = 19;
const GLOBAL_EVENT: u16 = 21;
const GLOBAL_ACTIVITY: u16 = 34;
const GLOBAL_SET: u16 = 225;

// file_id fields
const FILE_ID_TYPE: u8 = 0;
const FILE_ID_MANUFACTURER: u8 = 1;
const FILE_ID_PRODUCT: u8 = 2;
const FILE_ID_SERIAL_NUMBER: u8 = 3;
const FILE_ID_TIME_CREATED: u8 = 4;

// event fields
const EVENT_EVENT: u8 = 0;
const EVENT_EVENT_TYPE: u8 = 1;

// set fields
const SET_DURATION: u8 = 0;
const SET_REPETITIONS: u8 = 3;
const SET_WEIGHT: u8 = 4;
const SET_SET_TYPE: u8 = 5;
const SET_START_TIME: u8 = 6;
const SET_MESSAGE_INDEX: u8 = 10;
const SET_TIMESTAMP: u8 = 254;

// lap / session fields
const LAP_START_TIME: u8 = 2;
const SESSION_SPORT: u8 = 5;
const SESSION_SUB_SPORT: u8 = 6;
const LAP_TOTAL_ELAPSED_TIME: u8 = 7;
const LAP_TOTAL_TIMER_TIME: u8 = 8;
const SESSION_FIRST_LAP_INDEX: u8 = 25;
const SESSION_NUM_LAPS: u8 = 26;

// activity fields
const ACTIVITY_TOTAL_TIMER_TIME: u8 = 0;
const ACTIVITY_NUM_SESSIONS: u8 = 1;
const ACTIVITY_TYPE: u8 = 2;
const ACTIVITY_EVENT: u8 = 3;
const ACTIVITY_EVENT_TYPE: u8 = 4;

// Shared timestamp field number (every kind except set)
const FIELD_TIMESTAMP: u8 = 253;

// Profile enum values
const FILE_TYPE_ACTIVITY: u64 = 4;
const MANUFACTURER_GARMIN: u64 = 1;
const EVENT_TIMER: u64 = 0;
const EVENT_TYPE_START: u64 = 0;
const EVENT_TYPE_STOP: u64 = 1;
const EVENT_TYPE_STOP_ALL: u64 = 4;
const SPORT_STRENGTH_TRAINING: u64 = 15;
const SUB_SPORT_GENERIC_STRENGTH: u64 = 20;
const ACTIVITY_TYPE_MANUAL: u64 = 0;
const EVENT_ACTIVITY: u64 = 26;

/// The six structurally distinct record kinds of an activity file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    FileId,
    Event,
    Set,
    Lap,
    Session,
    Activity,
}

impl MessageKind {
    /// Global message number from the platform profile.
    pub const fn global_number(self) -> u16 {
        match self {
            MessageKind::FileId => GLOBAL_FILE_ID,
            MessageKind::Event => GLOBAL_EVENT,
            MessageKind::Set => GLOBAL_SET,
            MessageKind::Lap => GLOBAL_LAP,
            MessageKind::Session => GLOBAL_SESSION,
            MessageKind::Activity => GLOBAL_ACTIVITY,
        }
    }

    /// Lower-case kind name for diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            MessageKind::FileId => "file_id",
            MessageKind::Event => "event",
            MessageKind::Set => "set",
            MessageKind::Lap => "lap",
            MessageKind::Session => "session",
            MessageKind::Activity => "activity",
        }
    }
}

/// Wire description of one field: profile number, base type, display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub number: u8,
    pub base_type: BaseType,
    pub name: &'static str,
}

/// One field ready for framing: its definition plus the already-scaled value.
///
/// Values stay in a wide signed integer until the frame encoder enforces the
/// declared width; a negative value (e.g. a pre-epoch timestamp) is a
/// range violation, never a wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedField {
    pub def: FieldDef,
    pub value: i128,
}

impl EncodedField {
    fn new(number: u8, base_type: BaseType, name: &'static str, value: impl Into<i128>) -> Self {
        Self { def: FieldDef { number, base_type, name }, value: value.into() }
    }
}

/// An opaque typed record ready for framing. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    kind: MessageKind,
    fields: Vec<EncodedField>,
}

/// Seconds since the device epoch, as stored in date_time fields.
fn date_time_field(instant: DateTime<Utc>) -> i128 {
    i128::from(units::timestamp_to_device_millis(instant)) / 1000
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn fields(&self) -> &[EncodedField] {
        &self.fields
    }

    /// File-identity record. Required, always first in the file.
    pub fn file_id(time_created: DateTime<Utc>) -> Self {
        Self {
            kind: MessageKind::FileId,
            fields: vec![
                EncodedField::new(FILE_ID_TYPE, BaseType::Enum, "type", FILE_TYPE_ACTIVITY),
                EncodedField::new(
                    FILE_ID_MANUFACTURER,
                    BaseType::UInt16,
                    "manufacturer",
                    MANUFACTURER_GARMIN,
                ),
                EncodedField::new(FILE_ID_PRODUCT, BaseType::UInt16, "product", 0u64),
                EncodedField::new(FILE_ID_SERIAL_NUMBER, BaseType::UInt32Z, "serial_number", 0u64),
                EncodedField::new(
                    FILE_ID_TIME_CREATED,
                    BaseType::UInt32,
                    "time_created",
                    date_time_field(time_created),
                ),
            ],
        }
    }

    /// Timer-start event. Required, second in the file.
    pub fn timer_start(timestamp: DateTime<Utc>) -> Self {
        Self::timer_event(timestamp, EVENT_TYPE_START)
    }

    /// Timer-stop event closing the file.
    pub fn timer_stop(timestamp: DateTime<Utc>) -> Self {
        Self::timer_event(timestamp, EVENT_TYPE_STOP_ALL)
    }

    fn timer_event(timestamp: DateTime<Utc>, event_type: u64) -> Self {
        Self {
            kind: MessageKind::Event,
            fields: vec![
                EncodedField::new(EVENT_EVENT, BaseType::Enum, "event", EVENT_TIMER),
                EncodedField::new(EVENT_EVENT_TYPE, BaseType::Enum, "event_type", event_type),
                EncodedField::new(
                    FIELD_TIMESTAMP,
                    BaseType::UInt32,
                    "timestamp",
                    date_time_field(timestamp),
                ),
            ],
        }
    }

    /// One performed set.
    ///
    /// Weight and repetitions are omitted from the field list when the log
    /// did not record them; the frame encoder re-emits the definition when
    /// the layout changes between consecutive sets.
    pub fn set_record(
        timestamp: DateTime<Utc>,
        duration_secs: f64,
        weight_kg: Option<f64>,
        repetitions: Option<u32>,
        set_type: SetType,
        message_index: u16,
    ) -> Self {
        let mut fields = vec![EncodedField::new(
            SET_DURATION,
            BaseType::UInt32,
            "duration",
            units::seconds_to_duration_field(duration_secs),
        )];
        if let Some(reps) = repetitions {
            fields.push(EncodedField::new(SET_REPETITIONS, BaseType::UInt16, "repetitions", reps));
        }
        if let Some(kg) = weight_kg {
            fields.push(EncodedField::new(
                SET_WEIGHT,
                BaseType::UInt16,
                "weight",
                units::kilograms_to_weight_field(kg),
            ));
        }
        fields.push(EncodedField::new(
            SET_SET_TYPE,
            BaseType::UInt8,
            "set_type",
            u64::from(set_type.protocol_code()),
        ));
        fields.push(EncodedField::new(
            SET_START_TIME,
            BaseType::UInt32,
            "start_time",
            date_time_field(timestamp),
        ));
        fields.push(EncodedField::new(
            SET_MESSAGE_INDEX,
            BaseType::UInt16,
            "message_index",
            message_index,
        ));
        fields.push(EncodedField::new(
            SET_TIMESTAMP,
            BaseType::UInt32,
            "timestamp",
            date_time_field(timestamp),
        ));
        Self { kind: MessageKind::Set, fields }
    }

    /// Lap summary spanning the whole session.
    pub fn lap(start: DateTime<Utc>, end: DateTime<Utc>, wall_clock_secs: f64) -> Self {
        let elapsed = units::seconds_to_duration_field(wall_clock_secs);
        Self {
            kind: MessageKind::Lap,
            fields: vec![
                EncodedField::new(
                    LAP_START_TIME,
                    BaseType::UInt32,
                    "start_time",
                    date_time_field(start),
                ),
                EncodedField::new(
                    LAP_TOTAL_ELAPSED_TIME,
                    BaseType::UInt32,
                    "total_elapsed_time",
                    elapsed,
                ),
                EncodedField::new(
                    LAP_TOTAL_TIMER_TIME,
                    BaseType::UInt32,
                    "total_timer_time",
                    elapsed,
                ),
                EncodedField::new(
                    FIELD_TIMESTAMP,
                    BaseType::UInt32,
                    "timestamp",
                    date_time_field(end),
                ),
            ],
        }
    }

    /// Session summary: same timing fields as the lap plus the sport codes.
    pub fn session(start: DateTime<Utc>, end: DateTime<Utc>, wall_clock_secs: f64) -> Self {
        let elapsed = units::seconds_to_duration_field(wall_clock_secs);
        Self {
            kind: MessageKind::Session,
            fields: vec![
                EncodedField::new(
                    LAP_START_TIME,
                    BaseType::UInt32,
                    "start_time",
                    date_time_field(start),
                ),
                EncodedField::new(
                    SESSION_SPORT,
                    BaseType::Enum,
                    "sport",
                    SPORT_STRENGTH_TRAINING,
                ),
                EncodedField::new(
                    SESSION_SUB_SPORT,
                    BaseType::Enum,
                    "sub_sport",
                    SUB_SPORT_GENERIC_STRENGTH,
                ),
                EncodedField::new(
                    LAP_TOTAL_ELAPSED_TIME,
                    BaseType::UInt32,
                    "total_elapsed_time",
                    elapsed,
                ),
                EncodedField::new(
                    LAP_TOTAL_TIMER_TIME,
                    BaseType::UInt32,
                    "total_timer_time",
                    elapsed,
                ),
                EncodedField::new(
                    SESSION_FIRST_LAP_INDEX,
                    BaseType::UInt16,
                    "first_lap_index",
                    0u64,
                ),
                EncodedField::new(SESSION_NUM_LAPS, BaseType::UInt16, "num_laps", 1u64),
                EncodedField::new(
                    FIELD_TIMESTAMP,
                    BaseType::UInt32,
                    "timestamp",
                    date_time_field(end),
                ),
            ],
        }
    }

    /// Activity summary closing the single-session activity.
    pub fn activity(end: DateTime<Utc>, wall_clock_secs: f64) -> Self {
        Self {
            kind: MessageKind::Activity,
            fields: vec![
                EncodedField::new(
                    ACTIVITY_TOTAL_TIMER_TIME,
                    BaseType::UInt32,
                    "total_timer_time",
                    units::seconds_to_duration_field(wall_clock_secs),
                ),
                EncodedField::new(ACTIVITY_NUM_SESSIONS, BaseType::UInt16, "num_sessions", 1u64),
                EncodedField::new(ACTIVITY_TYPE, BaseType::Enum, "type", ACTIVITY_TYPE_MANUAL),
                EncodedField::new(ACTIVITY_EVENT, BaseType::Enum, "event", EVENT_ACTIVITY),
                EncodedField::new(
                    ACTIVITY_EVENT_TYPE,
                    BaseType::Enum,
                    "event_type",
                    EVENT_TYPE_STOP,
                ),
                EncodedField::new(
                    FIELD_TIMESTAMP,
                    BaseType::UInt32,
                    "timestamp",
                    date_time_field(end),
                ),
            ],
        }
    }

    /// Value of a field by display name, for assertions and diagnostics.
    pub fn field_value(&self, name: &str) -> Option<i128> {
        self.fields.iter().find(|f| f.def.name == name).map(|f| f.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 24, 10, 0, 0).unwrap()
    }

    #[test]
    fn global_numbers_match_profile() {
        assert_eq!(MessageKind::FileId.global_number(), 0);
        assert_eq!(MessageKind::Session.global_number(), 18);
        assert_eq!(MessageKind::Lap.global_number(), 19);
        assert_eq!(MessageKind::Event.global_number(), 21);
        assert_eq!(MessageKind::Activity.global_number(), 34);
        assert_eq!(MessageKind::Set.global_number(), 225);
    }

    #[test]
    fn file_id_is_an_activity_file() {
        let msg = Message::file_id(instant());
        assert_eq!(msg.kind(), MessageKind::FileId);
        assert_eq!(msg.field_value("type"), Some(4));
        assert_eq!(msg.field_value("manufacturer"), Some(1));
        assert!(msg.field_value("time_created").unwrap() > 0);
    }

    #[test]
    fn timer_events_use_start_and_stop_all() {
        let start = Message::timer_start(instant());
        let stop = Message::timer_stop(instant());
        assert_eq!(start.field_value("event"), Some(0));
        assert_eq!(start.field_value("event_type"), Some(0));
        assert_eq!(stop.field_value("event_type"), Some(4));
    }

    #[test]
    fn set_record_scales_weight_and_duration() {
        let msg =
            Message::set_record(instant(), 30.0, Some(60.0), Some(10), SetType::Normal, 0);
        assert_eq!(msg.field_value("duration"), Some(30_000));
        assert_eq!(msg.field_value("weight"), Some(960));
        assert_eq!(msg.field_value("repetitions"), Some(10));
        assert_eq!(msg.field_value("set_type"), Some(1));
        assert_eq!(msg.field_value("message_index"), Some(0));
    }

    #[test]
    fn set_record_omits_absent_weight_and_reps() {
        let msg = Message::set_record(instant(), 45.0, None, None, SetType::Warmup, 3);
        assert_eq!(msg.field_value("weight"), None);
        assert_eq!(msg.field_value("repetitions"), None);
        assert_eq!(msg.field_value("set_type"), Some(2));
    }

    #[test]
    fn set_timestamp_field_number_is_the_profile_quirk() {
        let msg = Message::set_record(instant(), 30.0, None, None, SetType::Normal, 0);
        let ts = msg.fields().iter().find(|f| f.def.name == "timestamp").unwrap();
        let index = msg.fields().iter().find(|f| f.def.name == "message_index").unwrap();
        assert_eq!(ts.def.number, 254);
        assert_eq!(index.def.number, 10);
    }

    #[test]
    fn summaries_share_wall_clock_timing() {
        let start = instant();
        let end = Utc.with_ymd_and_hms(2025, 1, 24, 10, 43, 0).unwrap();
        let lap = Message::lap(start, end, 2580.0);
        let session = Message::session(start, end, 2580.0);
        let activity = Message::activity(end, 2580.0);

        assert_eq!(lap.field_value("total_elapsed_time"), Some(2_580_000));
        assert_eq!(lap.field_value("total_timer_time"), Some(2_580_000));
        assert_eq!(session.field_value("total_elapsed_time"), Some(2_580_000));
        assert_eq!(session.field_value("sport"), Some(15));
        assert_eq!(session.field_value("sub_sport"), Some(20));
        assert_eq!(session.field_value("num_laps"), Some(1));
        assert_eq!(activity.field_value("total_timer_time"), Some(2_580_000));
        assert_eq!(activity.field_value("num_sessions"), Some(1));
        assert_eq!(activity.field_value("event"), Some(26));
    }

    #[test]
    fn pre_epoch_timestamp_goes_negative_not_wrapped() {
        let ancient = Utc.with_ymd_and_hms(1985, 1, 1, 0, 0, 0).unwrap();
        let msg = Message::timer_start(ancient);
        assert!(msg.field_value("timestamp").unwrap() < 0);
    }
}
