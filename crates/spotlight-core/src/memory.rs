//! In-memory record store for testing.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::SpotlightError;
use crate::model::AttendanceRecord;
use crate::traits::RecordStore;

/// A record store that keeps rows in a `Vec`.
///
/// Can be switched into a "locked" mode to simulate another program holding
/// the log open.
#[derive(Default)]
pub struct MemoryStore {
    /// `None` until the first append, mirroring a log file that does not exist.
    records: Mutex<Option<Vec<AttendanceRecord>>>,
    locked: AtomicBool,
    append_calls: AtomicU32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with existing rows, as if the log file were already present.
    pub fn with_records(records: Vec<AttendanceRecord>) -> Self {
        Self {
            records: Mutex::new(Some(records)),
            ..Self::default()
        }
    }

    /// Make subsequent appends fail with [`SpotlightError::FileLocked`].
    pub fn set_locked(&self, locked: bool) {
        self.locked.store(locked, Ordering::Relaxed);
    }

    /// Number of append attempts, successful or not.
    pub fn append_calls(&self) -> u32 {
        self.append_calls.load(Ordering::Relaxed)
    }

    /// Snapshot of the stored rows.
    pub fn records(&self) -> Vec<AttendanceRecord> {
        self.records
            .lock()
            .map(|guard| guard.clone().unwrap_or_default())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn location(&self) -> String {
        "memory".to_string()
    }

    async fn append(&self, record: &AttendanceRecord) -> Result<(), SpotlightError> {
        self.append_calls.fetch_add(1, Ordering::Relaxed);
        if self.locked.load(Ordering::Relaxed) {
            return Err(SpotlightError::FileLocked {
                path: PathBuf::from(self.location()),
            });
        }
        let mut guard = self
            .records
            .lock()
            .map_err(|_| std::io::Error::other("memory store poisoned"))?;
        guard.get_or_insert_with(Vec::new).push(record.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<Vec<AttendanceRecord>>, SpotlightError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| std::io::Error::other("memory store poisoned"))?;
        Ok(guard.clone())
    }
}
