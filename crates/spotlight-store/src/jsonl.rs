//! JSONL attendance log.
//!
//! One record per line, appended in place. Complete lines are never
//! rewritten; an interrupted save can at worst leave a torn final line,
//! which [`JsonlStore::load`] skips and the next append truncates. A final
//! line that is a whole record but lacks its newline is kept and terminated.

use std::io::{ErrorKind, SeekFrom};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};

use spotlight_core::model::AttendanceRecord;
use spotlight_core::traits::RecordStore;
use spotlight_core::SpotlightError;

/// Windows `ERROR_SHARING_VIOLATION` / `ERROR_LOCK_VIOLATION`.
#[cfg(windows)]
const SHARING_VIOLATION: i32 = 32;
#[cfg(windows)]
const LOCK_VIOLATION: i32 = 33;

/// JSONL file-based attendance log.
pub struct JsonlStore {
    path: PathBuf,
}

impl JsonlStore {
    /// Create a store backed by the file at `path`. The file is created on
    /// first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent_dir(&self) -> Result<(), SpotlightError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Whether the log's last byte is something other than a newline.
    async fn unterminated(&self, file: &mut File) -> Result<bool, SpotlightError> {
        let len = file.metadata().await.map_err(|e| self.classify(e))?.len();
        if len == 0 {
            return Ok(false);
        }
        file.seek(SeekFrom::End(-1))
            .await
            .map_err(|e| self.classify(e))?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last)
            .await
            .map_err(|e| self.classify(e))?;
        Ok(last[0] != b'\n')
    }

    /// Deal with an unterminated final line before appending.
    ///
    /// A complete record stays and only needs its newline (`Ok(true)`); a torn
    /// fragment is truncated away (`Ok(false)`).
    async fn repair_tail(&self, file: &mut File) -> Result<bool, SpotlightError> {
        file.seek(SeekFrom::Start(0))
            .await
            .map_err(|e| self.classify(e))?;
        let mut existing = Vec::new();
        file.read_to_end(&mut existing)
            .await
            .map_err(|e| self.classify(e))?;

        let keep = existing
            .iter()
            .rposition(|b| *b == b'\n')
            .map_or(0, |i| i + 1);
        let tail = &existing[keep..];
        if serde_json::from_slice::<AttendanceRecord>(tail).is_ok() {
            return Ok(true);
        }

        tracing::warn!(
            path = %self.path.display(),
            dropped = tail.len(),
            "truncating torn final log line"
        );
        file.set_len(keep as u64)
            .await
            .map_err(|e| self.classify(e))?;
        Ok(false)
    }

    /// Map an open/write failure, singling out a log held by another program.
    fn classify(&self, err: std::io::Error) -> SpotlightError {
        classify_io_error(&self.path, err)
    }
}

fn is_lock_violation(err: &std::io::Error) -> bool {
    if err.kind() == ErrorKind::PermissionDenied {
        return true;
    }
    #[cfg(windows)]
    {
        matches!(err.raw_os_error(), Some(SHARING_VIOLATION | LOCK_VIOLATION))
    }
    #[cfg(not(windows))]
    {
        false
    }
}

fn classify_io_error(path: &Path, err: std::io::Error) -> SpotlightError {
    if is_lock_violation(&err) {
        SpotlightError::FileLocked {
            path: path.to_path_buf(),
        }
    } else {
        SpotlightError::Io(err)
    }
}

/// Decode a log file's contents.
fn parse_log(content: &str) -> Result<Vec<AttendanceRecord>, SpotlightError> {
    let complete = content.ends_with('\n');
    let lines: Vec<&str> = content.lines().collect();
    let mut records = Vec::with_capacity(lines.len());

    for (idx, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<AttendanceRecord>(line) {
            Ok(record) => records.push(record),
            Err(e) if idx + 1 == lines.len() && !complete => {
                tracing::warn!(line = idx + 1, "skipping torn final log line: {e}");
            }
            Err(e) => {
                return Err(SpotlightError::Corrupt {
                    line: idx + 1,
                    message: e.to_string(),
                })
            }
        }
    }

    Ok(records)
}

#[async_trait]
impl RecordStore for JsonlStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn append(&self, record: &AttendanceRecord) -> Result<(), SpotlightError> {
        self.ensure_parent_dir().await?;

        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.classify(e))?;

        if self.unterminated(&mut file).await? && self.repair_tail(&mut file).await? {
            line.insert(0, '\n');
        }

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| self.classify(e))?;
        file.flush().await.map_err(|e| self.classify(e))?;

        tracing::debug!(path = %self.path.display(), roll = record.roll, "appended record");
        Ok(())
    }

    async fn load(&self) -> Result<Option<Vec<AttendanceRecord>>, SpotlightError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.classify(e)),
        };
        parse_log(&content).map(Some)
    }
}
