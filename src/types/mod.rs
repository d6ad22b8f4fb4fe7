//! Core types for strength-training session data.
//!
//! This module provides the domain model consumed by the session builder:
//! - [`WorkoutSession`] is one completed training session with its exercises
//! - [`Exercise`] is one movement with its ordered sets
//! - [`Set`] is one performed set (weight, reps, duration, classification)
//! - [`SetType`] classifies a working set and owns its protocol code mapping
//! - [`MuscleGroup`] is the upstream primary-muscle-group tag; only the
//!   cardio tag is meaningful to the encoder (eligibility filter)
//!
//! Sessions arrive already normalized from the external sync collaborator
//! (timestamps parsed, set fields typed) and are borrowed read-only for the
//! duration of one encoding run.

mod muscle_group;
mod set_type;
mod workout;

pub use muscle_group::MuscleGroup;
pub use set_type::SetType;
pub use workout::{Exercise, Set, WorkoutSession};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn minimal_session(exercises: Vec<Exercise>) -> WorkoutSession {
        WorkoutSession {
            title: "Morning Workout".to_string(),
            start_time: Utc.with_ymd_and_hms(2025, 1, 24, 10, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2025, 1, 24, 10, 43, 0).unwrap(),
            exercises,
        }
    }

    #[test]
    fn wall_clock_duration_is_end_minus_start() {
        let session = minimal_session(vec![]);
        assert_eq!(session.wall_clock_secs(), 2580.0);
    }

    #[test]
    fn set_with_any_field_has_usable_data() {
        let weight_only = Set { weight_kg: Some(60.0), ..Set::default() };
        let reps_only = Set { reps: Some(8), ..Set::default() };
        let duration_only = Set { duration_secs: Some(45.0), ..Set::default() };
        let empty = Set::default();

        assert!(weight_only.has_usable_data());
        assert!(reps_only.has_usable_data());
        assert!(duration_only.has_usable_data());
        assert!(!empty.has_usable_data());
    }

    #[test]
    fn session_set_count_spans_exercises() {
        let exercise = |n: usize| Exercise {
            title: "Bench Press (Barbell)".to_string(),
            muscle_group: MuscleGroup::Chest,
            sets: vec![Set::default(); n],
        };
        let session = minimal_session(vec![exercise(3), exercise(2)]);
        assert_eq!(session.set_count(), 5);
    }

    #[test]
    fn set_type_deserializes_upstream_names() {
        assert_eq!(serde_json::from_str::<SetType>("\"warmup\"").unwrap(), SetType::Warmup);
        assert_eq!(serde_json::from_str::<SetType>("\"drop\"").unwrap(), SetType::Drop);
    }

    #[test]
    fn unknown_muscle_group_falls_back_to_other() {
        let group: MuscleGroup = serde_json::from_str("\"neck\"").unwrap();
        assert_eq!(group, MuscleGroup::Other);
        assert!(!group.is_cardio());
    }
}
