//! Unit and scale conversion between domain values and FIT wire encodings.
//!
//! The FIT format stores every quantity as a fixed-point integer. The scale
//! constants live here as named values so call sites never bake magic numbers
//! into field construction:
//!
//! - durations: seconds × [`DURATION_SCALE`] (milliseconds on the wire)
//! - weights: kilograms × [`WEIGHT_SCALE`]
//! - timestamps: seconds since the device epoch 1989-12-31T00:00:00Z, which
//!   trails the Unix epoch by [`FIT_EPOCH_OFFSET_SECS`]
//!
//! All conversion functions are pure and total over their documented input
//! domain (finite, non-negative magnitudes); wire-width enforcement is the
//! frame encoder's job, not the converter's.
//!
//! The set-duration estimate used when a set carries no explicit duration is
//! a policy, not a protocol rule; see [`DurationPolicy`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Offset in seconds between the Unix epoch and the FIT device epoch
/// (1989-12-31T00:00:00Z).
pub const FIT_EPOCH_OFFSET_SECS: i64 = 631_065_600;

/// Scale factor for duration fields: seconds are stored as milliseconds.
pub const DURATION_SCALE: u32 = 1000;

/// Scale factor for weight fields: kilograms are stored in 1/16 kg units.
pub const WEIGHT_SCALE: u32 = 16;

/// Convert a UTC instant to integer milliseconds since the device epoch.
///
/// The offset is subtracted here; passing raw Unix time downstream would
/// shift every timestamp in the file by almost twenty years.
pub fn timestamp_to_device_millis(instant: DateTime<Utc>) -> i64 {
    instant.timestamp_millis() - FIT_EPOCH_OFFSET_SECS * 1000
}

/// Convert a duration in seconds to its scaled wire value.
///
/// Callers pass seconds; passing milliseconds here produces a field that is
/// wrong by a factor of 1000.
pub fn seconds_to_duration_field(seconds: f64) -> u64 {
    (seconds.max(0.0) * DURATION_SCALE as f64).round() as u64
}

/// Decode a scaled duration field back to seconds.
pub fn duration_field_to_seconds(field: u64) -> f64 {
    field as f64 / DURATION_SCALE as f64
}

/// Convert a weight in kilograms to its scaled wire value.
pub fn kilograms_to_weight_field(kg: f64) -> u64 {
    (kg.max(0.0) * WEIGHT_SCALE as f64).round() as u64
}

/// Decode a scaled weight field back to kilograms.
pub fn weight_field_to_kilograms(field: u64) -> f64 {
    field as f64 / WEIGHT_SCALE as f64
}

/// Policy for estimating a set's duration when the log carries none.
///
/// The default (3 s per rep, 30 s floor) reproduces upstream behavior, but
/// the numbers are reverse-engineered rather than platform-documented, so
/// they stay configurable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationPolicy {
    /// Seconds attributed to each repetition.
    pub secs_per_rep: u32,
    /// Floor preventing degenerate near-zero-duration records.
    pub min_secs: u32,
}

impl Default for DurationPolicy {
    fn default() -> Self {
        Self { secs_per_rep: 3, min_secs: 30 }
    }
}

impl DurationPolicy {
    /// Number of reps assumed when a set has neither duration nor rep count.
    const FALLBACK_REPS: u32 = 10;

    /// Estimate a set duration in seconds from its rep count.
    pub fn estimate(&self, reps: Option<u32>) -> f64 {
        let reps = reps.unwrap_or(Self::FALLBACK_REPS);
        f64::from(reps.saturating_mul(self.secs_per_rep).max(self.min_secs))
    }
}
