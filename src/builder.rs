//! Session builder: turns one workout session into the ordered message list.
//!
//! The platform enforces a fixed record sequence (file identity, timer
//! start, the per-set records, lap, session, and activity summaries, timer
//! stop) and cross-checks the summaries against each other. The builder
//! owns that ordering plus the policy decisions that precede it:
//!
//! - the cardio-only eligibility filter (a classification rule, not a
//!   heuristic threshold)
//! - duration resolution for sets the log recorded without one
//! - monotonic distribution of per-set timestamps across the wall-clock span
//! - summary timing from `end - start`, never from the sum of set durations
//!   (rest periods are not separately modeled, so the two diverge)
//!
//! The message-index counter is threaded through this single pass and scoped
//! to one build; nothing is shared across runs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fit::Message;
use crate::types::WorkoutSession;
use crate::units::DurationPolicy;
use crate::{EncodeError, Result};

/// Why a session was skipped rather than encoded.
///
/// Skips are defined outcomes, not failures; batch callers tally them
/// separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Exactly one exercise and it carries the cardio tag.
    CardioOnly,
    /// No set in the session has weight, reps, or duration.
    NoEncodableData,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::CardioOnly => write!(f, "cardio-only session"),
            SkipReason::NoEncodableData => write!(f, "no encodable set data"),
        }
    }
}

/// Outcome of building a session: the ordered messages, or a skip.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildResult {
    Messages(Vec<Message>),
    Skipped(SkipReason),
}

/// Builds the ordered message sequence for one session.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionBuilder {
    policy: DurationPolicy,
}

impl SessionBuilder {
    pub fn new(policy: DurationPolicy) -> Self {
        Self { policy }
    }

    /// Transform a session into its ordered message list.
    ///
    /// Returns `Skipped` for ineligible sessions, an error for contract
    /// violations (end before start), and otherwise the full sequence ready
    /// for the frame encoder.
    pub fn build(&self, session: &WorkoutSession) -> Result<BuildResult> {
        if session.end_time < session.start_time {
            return Err(EncodeError::invalid_session(
                session.title.clone(),
                "end before start",
            ));
        }

        // Eligibility filter, applied before any other processing
        if session.exercises.len() == 1 && session.exercises[0].muscle_group.is_cardio() {
            debug!("Skipping cardio-only session '{}'", session.title);
            return Ok(BuildResult::Skipped(SkipReason::CardioOnly));
        }

        let usable = session
            .exercises
            .iter()
            .flat_map(|exercise| &exercise.sets)
            .any(|set| set.has_usable_data());
        if !usable {
            debug!("Skipping session '{}': no encodable set data", session.title);
            return Ok(BuildResult::Skipped(SkipReason::NoEncodableData));
        }

        let wall_clock_secs = session.wall_clock_secs();
        let total_ms = (session.end_time - session.start_time).num_milliseconds();
        let set_count = session.set_count() as i64;

        let mut messages = Vec::with_capacity(session.set_count() + 6);
        messages.push(Message::file_id(session.start_time));
        messages.push(Message::timer_start(session.start_time));

        let mut message_index: u16 = 0;
        for exercise in &session.exercises {
            for set in &exercise.sets {
                let offset_ms = i64::from(message_index) * total_ms / set_count;
                let timestamp = session.start_time + chrono::Duration::milliseconds(offset_ms);
                let duration_secs = set
                    .duration_secs
                    .unwrap_or_else(|| self.policy.estimate(set.reps));

                messages.push(Message::set_record(
                    timestamp,
                    duration_secs,
                    set.weight_kg,
                    set.reps,
                    set.set_type,
                    message_index,
                ));
                message_index = message_index.checked_add(1).ok_or_else(|| {
                    EncodeError::value_range("set", "message_index", set_count, u64::from(u16::MAX))
                })?;
            }
        }

        messages.push(Message::lap(session.start_time, session.end_time, wall_clock_secs));
        messages.push(Message::session(session.start_time, session.end_time, wall_clock_secs));
        messages.push(Message::activity(session.end_time, wall_clock_secs));
        messages.push(Message::timer_stop(session.end_time));

        verify_index_contiguity(&messages)?;

        debug!(
            "Built {} messages for session '{}' ({} sets, {:.0} s wall clock)",
            messages.len(),
            session.title,
            message_index,
            wall_clock_secs
        );
        Ok(BuildResult::Messages(messages))
    }
}

/// Assert that set-record message indices are exactly 0..N-1 in order.
///
/// A gap or repeat can only come from a bug in the pass above, so it fails
/// loud as a defect-class error instead of being silently patched.
fn verify_index_contiguity(messages: &[Message]) -> Result<()> {
    let mut expected: i128 = 0;
    for message in messages {
        if message.kind() == crate::fit::MessageKind::Set {
            let index = message.field_value("message_index").ok_or_else(|| {
                EncodeError::sequencing("set record without a message_index field")
            })?;
            if index != expected {
                return Err(EncodeError::sequencing(format!(
                    "set message_index {index} where {expected} was expected"
                )));
            }
            expected += 1;
        }
    }
    Ok(())
}
