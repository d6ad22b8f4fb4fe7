//! Concurrent batch encoding with per-session status reporting.
//!
//! Each session is encoded on its own tokio task. Encoding is pure and owns
//! its buffers, so tasks need no coordination and one session's failure
//! never aborts the batch. The report preserves input order and tallies
//! encoded / skipped / failed so sync callers can log a one-line summary.

use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::builder::SkipReason;
use crate::fit::ActivityFile;
use crate::{ActivityEncoder, EncodeOutcome};
use crate::types::WorkoutSession;

/// Final status of one session within a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Encoded(ActivityFile),
    Skipped(SkipReason),
    /// Error rendered to text with the failing field context preserved;
    /// `defect` marks encoder invariant breaches worth a bug report.
    Failed {
        error: String,
        defect: bool,
    },
}

/// One session's title and outcome, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStatus {
    pub title: String,
    pub outcome: SessionOutcome,
}

/// Batch result: per-session statuses plus the tallies.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchReport {
    pub statuses: Vec<SessionStatus>,
    pub encoded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchReport {
    /// Iterate the assembled files, in input order.
    pub fn files(&self) -> impl Iterator<Item = &ActivityFile> {
        self.statuses.iter().filter_map(|status| match &status.outcome {
            SessionOutcome::Encoded(file) => Some(file),
            _ => None,
        })
    }
}

/// Encode every session concurrently and collect a [`BatchReport`].
pub async fn encode_batch(
    sessions: Vec<WorkoutSession>,
    encoder: ActivityEncoder,
) -> BatchReport {
    let total = sessions.len();
    let mut tasks = JoinSet::new();
    for (index, session) in sessions.into_iter().enumerate() {
        tasks.spawn(async move {
            let title = session.title.clone();
            let outcome = match encoder.encode(&session) {
                Ok(EncodeOutcome::Encoded(file)) => SessionOutcome::Encoded(file),
                Ok(EncodeOutcome::Skipped(reason)) => SessionOutcome::Skipped(reason),
                Err(error) => {
                    SessionOutcome::Failed { error: error.to_string(), defect: error.is_defect() }
                }
            };
            (index, SessionStatus { title, outcome })
        });
    }

    let mut slots: Vec<Option<SessionStatus>> = (0..total).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, status)) => slots[index] = Some(status),
            Err(join_error) => warn!("Batch encode task failed to join: {join_error}"),
        }
    }

    let mut report = BatchReport::default();
    for status in slots.into_iter().flatten() {
        match &status.outcome {
            SessionOutcome::Encoded(file) => {
                info!(
                    "Encoded '{}' -> {} ({} bytes)",
                    status.title,
                    file.file_name(),
                    file.bytes().len()
                );
                report.encoded += 1;
            }
            SessionOutcome::Skipped(reason) => {
                info!("Skipped '{}': {reason}", status.title);
                report.skipped += 1;
            }
            SessionOutcome::Failed { error, .. } => {
                warn!("Failed to encode '{}': {error}", status.title);
                report.failed += 1;
            }
        }
        report.statuses.push(status);
    }

    info!(
        "Batch complete: {} encoded, {} skipped, {} failed of {total}",
        report.encoded, report.skipped, report.failed
    );
    report
}
