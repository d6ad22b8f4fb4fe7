//! Type-safe Rust library for encoding strength-training sessions as FIT
//! activity files.
//!
//! Liftfile takes a normalized workout session (exercises, sets,
//! timestamps, weights, repetitions, set classifications) and produces a
//! byte-exact activity file that a fitness platform will accept: framed
//! message records, correct fixed-point scaling, the mandated record order,
//! and both integrity checksums.
//!
//! # Features
//!
//! - **Typed Messages**: one constructor per record kind, no dynamic fields
//! - **Strict Encoding**: width violations reject, never truncate or wrap
//! - **Pure Core**: synchronous, allocation-owned, trivially parallel
//! - **Batch Driver**: concurrent multi-session encoding with outcome tallies
//!
//! # Quick Start
//!
//! ```rust
//! use liftfile::{ActivityEncoder, EncodeOutcome, WorkoutSession};
//!
//! fn publish(session: &WorkoutSession) -> liftfile::Result<()> {
//!     match ActivityEncoder::new().encode(session)? {
//!         EncodeOutcome::Encoded(file) => {
//!             // hand file.bytes() and file.file_name() to the uploader
//!             println!("assembled {} ({} bytes)", file.file_name(), file.bytes().len());
//!         }
//!         EncodeOutcome::Skipped(reason) => println!("skipped: {reason}"),
//!     }
//!     Ok(())
//! }
//! ```

// Core encoding pipeline
pub mod builder;
mod error;
pub mod fit;
pub mod types;
pub mod units;

// Batch orchestration
pub mod batch;

// Core exports
pub use builder::{BuildResult, SessionBuilder, SkipReason};
pub use error::{EncodeError, Result};
pub use fit::{ActivityFile, FrameEncoder, Message, MessageKind};
pub use types::{Exercise, MuscleGroup, Set, SetType, WorkoutSession};
pub use units::DurationPolicy;

// Batch exports
pub use batch::{BatchReport, SessionOutcome, SessionStatus, encode_batch};

/// Result of one encode call: the assembled file, or a defined skip.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodeOutcome {
    Encoded(ActivityFile),
    Skipped(SkipReason),
}

/// Unified entry point for encoding sessions into activity files.
///
/// The encoder is cheap to copy and safe to share across worker threads;
/// every encode call owns its own buffers.
///
/// # Examples
///
/// ```rust
/// use liftfile::{ActivityEncoder, DurationPolicy};
///
/// // Default policy: 3 s per rep, 30 s floor
/// let encoder = ActivityEncoder::new();
///
/// // Custom estimate for logs with slower tempo work
/// let tempo = ActivityEncoder::with_policy(DurationPolicy { secs_per_rep: 5, min_secs: 45 });
/// # let _ = (encoder, tempo);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityEncoder {
    builder: SessionBuilder,
}

impl ActivityEncoder {
    /// Encoder with the default duration policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoder with a custom set-duration estimation policy.
    pub fn with_policy(policy: DurationPolicy) -> Self {
        Self { builder: SessionBuilder::new(policy) }
    }

    /// Encode one session into a complete activity file.
    ///
    /// Ineligible sessions return [`EncodeOutcome::Skipped`]; hard failures
    /// return a typed [`EncodeError`] and no partial file is ever produced.
    pub fn encode(&self, session: &WorkoutSession) -> Result<EncodeOutcome> {
        let messages = match self.builder.build(session)? {
            BuildResult::Skipped(reason) => return Ok(EncodeOutcome::Skipped(reason)),
            BuildResult::Messages(messages) => messages,
        };

        let mut frames = FrameEncoder::new();
        for message in &messages {
            frames.encode(message)?;
        }

        let bytes = fit::assemble(&frames.into_bytes())?;
        let file_name =
            fit::suggested_file_name(&session.title, session.start_time.date_naive());
        Ok(EncodeOutcome::Encoded(ActivityFile::new(bytes, file_name)))
    }
}

/// Encode one session with the default policy.
///
/// Convenience wrapper over [`ActivityEncoder::encode`].
pub fn encode_session(session: &WorkoutSession) -> Result<EncodeOutcome> {
    ActivityEncoder::new().encode(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_session() -> WorkoutSession {
        WorkoutSession {
            title: "Push Day".to_string(),
            start_time: Utc.with_ymd_and_hms(2025, 1, 24, 10, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2025, 1, 24, 10, 43, 0).unwrap(),
            exercises: vec![Exercise {
                title: "Bench Press (Barbell)".to_string(),
                muscle_group: MuscleGroup::Chest,
                sets: vec![
                    Set {
                        weight_kg: Some(60.0),
                        reps: Some(10),
                        duration_secs: None,
                        set_type: SetType::Normal,
                    },
                    Set {
                        weight_kg: Some(60.0),
                        reps: Some(8),
                        duration_secs: None,
                        set_type: SetType::Failure,
                    },
                ],
            }],
        }
    }

    #[test]
    fn encode_produces_a_named_file() {
        let outcome = encode_session(&sample_session()).unwrap();
        match outcome {
            EncodeOutcome::Encoded(file) => {
                assert_eq!(file.file_name(), "push_day_2025-01-24.fit");
                assert!(file.bytes().len() > fit::HEADER_SIZE as usize + 2);
            }
            EncodeOutcome::Skipped(reason) => panic!("unexpected skip: {reason}"),
        }
    }

    #[test]
    fn encoding_is_deterministic() {
        let session = sample_session();
        let first = encode_session(&session).unwrap();
        let second = encode_session(&session).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn file_passes_both_checksums() {
        let EncodeOutcome::Encoded(file) = encode_session(&sample_session()).unwrap() else {
            panic!("expected a file");
        };
        let bytes = file.bytes();
        let header_crc = u16::from_le_bytes([bytes[12], bytes[13]]);
        assert_eq!(header_crc, fit::crc::checksum(&bytes[..12]));
        // Appending the trailing CRC drives the whole-file residue to zero
        assert_eq!(fit::crc::checksum(bytes), 0);
    }

    #[test]
    fn custom_policy_changes_estimated_durations() {
        let default_file = match encode_session(&sample_session()).unwrap() {
            EncodeOutcome::Encoded(file) => file,
            EncodeOutcome::Skipped(reason) => panic!("unexpected skip: {reason}"),
        };
        let slow = ActivityEncoder::with_policy(DurationPolicy { secs_per_rep: 10, min_secs: 60 });
        let slow_file = match slow.encode(&sample_session()).unwrap() {
            EncodeOutcome::Encoded(file) => file,
            EncodeOutcome::Skipped(reason) => panic!("unexpected skip: {reason}"),
        };
        assert_ne!(default_file.bytes(), slow_file.bytes());
    }

    #[test]
    fn declared_payload_length_matches_record_bytes() {
        let EncodeOutcome::Encoded(file) = encode_session(&sample_session()).unwrap() else {
            panic!("expected a file");
        };
        let bytes = file.bytes();
        let declared =
            u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize;
        // Total = 14-byte header + payload + 2-byte trailing CRC
        assert_eq!(bytes.len(), 14 + declared + 2);
    }
}
