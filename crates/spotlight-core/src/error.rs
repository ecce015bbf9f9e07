//! Error types for the draw/review/save cycle.
//!
//! The CLI matches on these variants to decide whether a failure is a
//! warning, an informational notice, or a hard error.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while running a spotlight session.
#[derive(Debug, Error)]
pub enum SpotlightError {
    /// Every roll number in the roster has already been drawn.
    #[error("all {roster_size} students have participated")]
    ExhaustedPool { roster_size: u32 },

    /// The attendance log could not be written because another process holds it.
    #[error("attendance log is locked or read-only: {}", path.display())]
    FileLocked { path: PathBuf },

    /// There are no persisted records yet.
    #[error("no records yet")]
    NoData,

    /// An action that needs a candidate was issued while idle.
    #[error("no student is currently selected")]
    NoSelection,

    /// A star rating outside 1..=5 or in an unknown notation.
    #[error("invalid star rating: {0}")]
    InvalidRating(String),

    /// A log line that could not be decoded.
    #[error("corrupt record on line {line}: {message}")]
    Corrupt { line: usize, message: String },

    /// Record (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Any other I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpotlightError {
    /// Returns `true` if the user can simply repeat the action.
    ///
    /// Nothing was mutated for these errors.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SpotlightError::ExhaustedPool { .. }
                | SpotlightError::FileLocked { .. }
                | SpotlightError::NoData
                | SpotlightError::NoSelection
                | SpotlightError::InvalidRating(_)
        )
    }

    /// Returns `true` for notices that are not really failures.
    pub fn is_informational(&self) -> bool {
        matches!(self, SpotlightError::NoData)
    }
}
