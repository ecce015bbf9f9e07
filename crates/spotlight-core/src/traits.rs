//! Storage trait for the attendance log.
//!
//! Implemented by `spotlight-store` for the on-disk log and by
//! [`crate::memory::MemoryStore`] for tests.

use async_trait::async_trait;

use crate::error::SpotlightError;
use crate::model::AttendanceRecord;

/// An append-only, ordered log of attendance records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Human-readable location of the log (e.g. a file path).
    fn location(&self) -> String;

    /// Append one record after every existing record.
    ///
    /// Returns [`SpotlightError::FileLocked`] when another process holds the
    /// log; nothing is written in that case.
    async fn append(&self, record: &AttendanceRecord) -> Result<(), SpotlightError>;

    /// Every record in insertion order, or `None` if the log was never created.
    async fn load(&self) -> Result<Option<Vec<AttendanceRecord>>, SpotlightError>;
}
