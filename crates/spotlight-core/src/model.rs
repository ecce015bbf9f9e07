//! Core data model types for spotlight.
//!
//! An [`AttendanceRecord`] is created only at save time and never modified
//! afterwards. Its serialized keys double as the column names of the export.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::SpotlightError;

/// Column names, in log and export order.
pub const COLUMNS: [&str; 10] = [
    "Day",
    "Date",
    "Time",
    "Roll Number",
    "Status",
    "Topic",
    "Duration",
    "Content Star",
    "Delivery Star",
    "Total Score",
];

/// Duration recorded when no time was captured.
pub const ZERO_DURATION: &str = "0m 0s";

/// Topic recorded for absent students.
pub const ABSENT_TOPIC: &str = "N/A";

/// Whether the drawn student presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Present,
    Absent,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Present => write!(f, "Present"),
            Status::Absent => write!(f, "Absent"),
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "present" | "p" => Ok(Status::Present),
            "absent" | "a" => Ok(Status::Absent),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// A faculty star rating in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StarRating(u8);

impl StarRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Build a rating, rejecting values outside `1..=5`.
    pub fn new(stars: u8) -> Result<Self, SpotlightError> {
        if (Self::MIN..=Self::MAX).contains(&stars) {
            Ok(Self(stars))
        } else {
            Err(SpotlightError::InvalidRating(format!(
                "{stars} (expected {}-{})",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    /// Number of stars.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Render as a run of star glyphs.
    pub fn glyphs(self) -> String {
        "⭐".repeat(usize::from(self.0))
    }
}

impl Default for StarRating {
    fn default() -> Self {
        Self(3)
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

impl FromStr for StarRating {
    type Err = SpotlightError;

    /// Accepts `"4"`, `"⭐⭐⭐⭐"` or `"****"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SpotlightError::InvalidRating("empty".into()));
        }
        if let Ok(n) = s.parse::<u8>() {
            return Self::new(n);
        }
        // U+2B50 may arrive with a trailing variation selector.
        let glyphs: Vec<char> = s.chars().filter(|c| *c != '\u{FE0F}').collect();
        if glyphs.iter().all(|c| *c == '⭐') || glyphs.iter().all(|c| *c == '*') {
            let count = u8::try_from(glyphs.len())
                .map_err(|_| SpotlightError::InvalidRating(s.to_string()))?;
            return Self::new(count);
        }
        Err(SpotlightError::InvalidRating(s.to_string()))
    }
}

/// One row of the attendance log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Full weekday name, e.g. "Monday".
    #[serde(rename = "Day")]
    pub day: String,
    /// ISO date, e.g. "2026-10-17".
    #[serde(rename = "Date")]
    pub date: String,
    /// 12-hour clock time, e.g. "09:05 AM".
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Roll Number")]
    pub roll: u32,
    #[serde(rename = "Status")]
    pub status: Status,
    #[serde(rename = "Topic")]
    pub topic: String,
    /// Formatted as "{minutes}m {seconds}s".
    #[serde(rename = "Duration")]
    pub duration: String,
    #[serde(rename = "Content Star")]
    pub content_star: u8,
    #[serde(rename = "Delivery Star")]
    pub delivery_star: u8,
    #[serde(rename = "Total Score")]
    pub total_score: u8,
}

impl AttendanceRecord {
    /// A record for a student who presented.
    pub fn present(
        roll: u32,
        topic: &str,
        duration: &str,
        content: StarRating,
        delivery: StarRating,
        at: NaiveDateTime,
    ) -> Self {
        let (day, date, time) = stamp(at);
        Self {
            day,
            date,
            time,
            roll,
            status: Status::Present,
            topic: topic.trim().to_string(),
            duration: duration.to_string(),
            content_star: content.value(),
            delivery_star: delivery.value(),
            total_score: content.value() + delivery.value(),
        }
    }

    /// A record for a student who was drawn but not in the room.
    pub fn absent(roll: u32, at: NaiveDateTime) -> Self {
        let (day, date, time) = stamp(at);
        Self {
            day,
            date,
            time,
            roll,
            status: Status::Absent,
            topic: ABSENT_TOPIC.to_string(),
            duration: ZERO_DURATION.to_string(),
            content_star: 0,
            delivery_star: 0,
            total_score: 0,
        }
    }

    /// Field values as text, in [`COLUMNS`] order.
    pub fn fields(&self) -> [String; 10] {
        [
            self.day.clone(),
            self.date.clone(),
            self.time.clone(),
            self.roll.to_string(),
            self.status.to_string(),
            self.topic.clone(),
            self.duration.clone(),
            self.content_star.to_string(),
            self.delivery_star.to_string(),
            self.total_score.to_string(),
        ]
    }
}

fn stamp(at: NaiveDateTime) -> (String, String, String) {
    (
        at.format("%A").to_string(),
        at.format("%Y-%m-%d").to_string(),
        at.format("%I:%M %p").to_string(),
    )
}
