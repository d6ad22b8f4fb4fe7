//! Workout session, exercise, and set records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MuscleGroup, SetType};

/// One completed training session as delivered by the sync collaborator.
///
/// Immutable once constructed; the builder borrows it read-only. The
/// `end_time >= start_time` invariant is enforced at encode time, not here,
/// so a bad upstream record surfaces as a typed error instead of a panic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    /// Session title from the log; feeds the suggested filename.
    pub title: String,
    /// Session start instant, UTC.
    pub start_time: DateTime<Utc>,
    /// Session end instant, UTC.
    pub end_time: DateTime<Utc>,
    /// Movements in the order they were performed.
    pub exercises: Vec<Exercise>,
}

impl WorkoutSession {
    /// Wall-clock duration of the session in seconds.
    ///
    /// Summary records derive from this span, never from the sum of set
    /// durations (rest periods are not separately modeled).
    pub fn wall_clock_secs(&self) -> f64 {
        (self.end_time - self.start_time).num_milliseconds() as f64 / 1000.0
    }

    /// Total number of sets across all exercises.
    pub fn set_count(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }
}

/// One movement within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Display title from the exercise catalog.
    pub title: String,
    /// Primary muscle group tag.
    pub muscle_group: MuscleGroup,
    /// Sets in performed order.
    pub sets: Vec<Set>,
}

/// One performed set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Set {
    /// Weight moved, kilograms.
    pub weight_kg: Option<f64>,
    /// Repetition count.
    pub reps: Option<u32>,
    /// Explicit duration in seconds, when the log recorded one.
    pub duration_secs: Option<f64>,
    /// Set classification.
    #[serde(default)]
    pub set_type: SetType,
}

impl Set {
    /// Whether this set carries any encodable data.
    ///
    /// A session where no set passes this check produces no file.
    pub fn has_usable_data(&self) -> bool {
        self.weight_kg.is_some() || self.reps.is_some() || self.duration_secs.is_some()
    }
}
