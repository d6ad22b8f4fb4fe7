//! Error types for activity-file encoding.
//!
//! All errors implement the `std::error::Error` trait and carry enough
//! structured context (message kind, field name, offending value) to diagnose
//! a failed encode without re-deriving the whole pipeline.
//!
//! ## Error Categories
//!
//! - **Value-Range Errors**: a field value does not fit its declared wire width
//! - **Sequencing Errors**: framing invariant breaches (data before definition,
//!   non-contiguous message index) that indicate a library defect
//! - **Payload Errors**: the record stream exceeds the header's length field
//! - **Session Errors**: input contract violations (end before start)
//!
//! Encoding is deterministic, so no error here is worth retrying; a failed
//! session must be fixed upstream or reported. Use [`EncodeError::is_defect`]
//! to separate invariant breaches (file a bug) from bad input data:
//!
//! ```rust
//! use liftfile::EncodeError;
//!
//! let error = EncodeError::value_range("set", "weight", 1_500_000, 65_535);
//! assert!(!error.is_defect());
//! ```

use thiserror::Error;

/// Result type alias for encoding operations.
pub type Result<T, E = EncodeError> = std::result::Result<T, E>;

/// Main error type for activity-file encoding.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EncodeError {
    #[error("Value {value} for {message}.{field} exceeds wire maximum {max}")]
    ValueRange { message: &'static str, field: &'static str, value: i128, max: u64 },

    #[error("Framing invariant breach: {details}")]
    Sequencing { details: String },

    #[error("Record payload of {len} bytes exceeds the header length field")]
    PayloadOverflow { len: u64 },

    #[error("Invalid session '{session}': {reason}")]
    InvalidSession { session: String, reason: String },
}

impl EncodeError {
    /// Returns whether this error is a defect in the encoder itself rather
    /// than a problem with the input session.
    ///
    /// Sequencing breaches can only arise from a bug in the builder/encoder
    /// pairing; value-range and session errors come from upstream data.
    pub fn is_defect(&self) -> bool {
        match self {
            EncodeError::Sequencing { .. } => true,
            EncodeError::ValueRange { .. } => false,
            EncodeError::PayloadOverflow { .. } => false,
            EncodeError::InvalidSession { .. } => false,
        }
    }

    /// Helper constructor for value-range violations.
    pub fn value_range(
        message: &'static str,
        field: &'static str,
        value: impl Into<i128>,
        max: u64,
    ) -> Self {
        EncodeError::ValueRange { message, field, value: value.into(), max }
    }

    /// Helper constructor for framing invariant breaches.
    pub fn sequencing(details: impl Into<String>) -> Self {
        EncodeError::Sequencing { details: details.into() }
    }

    /// Helper constructor for input contract violations.
    pub fn invalid_session(session: impl Into<String>, reason: impl Into<String>) -> Self {
        EncodeError::InvalidSession { session: session.into(), reason: reason.into() }
    }
}
