//! Primary muscle-group tags from the upstream exercise catalog.

use serde::{Deserialize, Serialize};

/// Primary muscle group of an exercise as tagged by the training log.
///
/// The encoder only branches on [`MuscleGroup::Cardio`] (session eligibility);
/// the remaining tags are carried for callers that group or display
/// exercises. Tags this crate does not know deserialize as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Cardio,
    Chest,
    Back,
    Shoulders,
    Biceps,
    Triceps,
    Forearms,
    Quadriceps,
    Hamstrings,
    Glutes,
    Calves,
    Abdominals,
    FullBody,
    #[serde(other)]
    Other,
}

impl MuscleGroup {
    /// Whether this is the cardio tag used by the eligibility filter.
    pub const fn is_cardio(self) -> bool {
        matches!(self, MuscleGroup::Cardio)
    }
}
