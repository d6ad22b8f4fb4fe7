//! Working-set classification and its protocol code mapping.

use serde::{Deserialize, Serialize};

/// Classification of one performed set.
///
/// Mirrors the upstream training log's set types. The wire mapping is fixed:
/// code 0 means "rest" in the activity format and is reserved; a working
/// set must never encode as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetType {
    /// Normal working set (wire code 1, "active").
    #[default]
    Normal,
    /// Warmup set (wire code 2).
    Warmup,
    /// Set taken to failure (wire code 3).
    Failure,
    /// Drop set (wire code 4).
    #[serde(alias = "drop_set")]
    Drop,
}

impl SetType {
    /// Protocol code for this classification.
    ///
    /// Total over all variants and never 0.
    pub const fn protocol_code(self) -> u8 {
        match self {
            SetType::Normal => 1,
            SetType::Warmup => 2,
            SetType::Failure => 3,
            SetType::Drop => 4,
        }
    }
}
