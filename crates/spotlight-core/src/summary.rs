//! Session summary: attendance counts and completion against the roster.

use serde::{Deserialize, Serialize};

use crate::model::{AttendanceRecord, Status};

/// Aggregate view of the attendance log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub present: usize,
    pub absent: usize,
    pub roster_size: u32,
    /// `present / roster_size`, clamped to `[0, 1]`.
    pub completion: f64,
    /// Mean total score over present rows.
    pub average_score: Option<f64>,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.present + self.absent
    }

    /// A fixed-width text progress bar, e.g. `[#####.....]`.
    pub fn progress_bar(&self, width: usize) -> String {
        let filled = ((self.completion * width as f64).round() as usize).min(width);
        format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
    }
}

/// Count rows by status and derive completion against `roster_size`.
pub fn summarize(records: &[AttendanceRecord], roster_size: u32) -> Summary {
    let present: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|r| r.status == Status::Present)
        .collect();
    let absent = records.len() - present.len();

    let completion = if roster_size == 0 {
        0.0
    } else {
        (present.len() as f64 / f64::from(roster_size)).clamp(0.0, 1.0)
    };

    let average_score = if present.is_empty() {
        None
    } else {
        let sum: u32 = present.iter().map(|r| u32::from(r.total_score)).sum();
        Some(f64::from(sum) / present.len() as f64)
    };

    Summary {
        present: present.len(),
        absent,
        roster_size,
        completion,
        average_score,
    }
}
