//! The draw → review → save state machine.
//!
//! A session is either idle or holding exactly one candidate. Everything the
//! faculty enters about a presentation lives on the [`Candidate`], so a save
//! or a reset discards it in one step.

use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use rand::Rng;
use uuid::Uuid;

use crate::error::SpotlightError;
use crate::model::{AttendanceRecord, StarRating, Status};
use crate::pool::{Draw, RollPool};
use crate::stopwatch::{format_duration, Stopwatch};

/// The student currently in the spotlight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub roll: u32,
    pub topic: String,
    pub content: StarRating,
    pub delivery: StarRating,
    pub stopwatch: Stopwatch,
}

impl Candidate {
    fn new(roll: u32) -> Self {
        Self {
            roll,
            topic: String::new(),
            content: StarRating::default(),
            delivery: StarRating::default(),
            stopwatch: Stopwatch::default(),
        }
    }

    /// Presentation time as stored in the log.
    pub fn duration(&self, now: Instant) -> String {
        format_duration(self.stopwatch.elapsed(now))
    }
}

/// Session state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Selected(Candidate),
}

/// One classroom sitting: the roll pool plus the current candidate.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    pool: RollPool,
    state: SessionState,
}

impl Session {
    pub fn new(roster_size: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            pool: RollPool::new(roster_size),
            state: SessionState::Idle,
        }
    }

    /// Identifier used to correlate log lines of one sitting.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn pool(&self) -> &RollPool {
        &self.pool
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn candidate(&self) -> Option<&Candidate> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Selected(candidate) => Some(candidate),
        }
    }

    fn candidate_mut(&mut self) -> Result<&mut Candidate, SpotlightError> {
        match &mut self.state {
            SessionState::Idle => Err(SpotlightError::NoSelection),
            SessionState::Selected(candidate) => Ok(candidate),
        }
    }

    /// Spin the wheel and put the drawn roll in the spotlight.
    ///
    /// An exhausted pool leaves the session untouched. Drawing over an
    /// unsaved candidate replaces it; the replaced roll stays used.
    pub fn draw<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        preview_frames: usize,
    ) -> Result<Draw, SpotlightError> {
        let draw = self.pool.draw(rng, preview_frames)?;
        if let Some(previous) = self.candidate() {
            tracing::warn!(
                session = %self.id,
                roll = previous.roll,
                "replacing unsaved candidate"
            );
        }
        tracing::info!(session = %self.id, roll = draw.roll, remaining = draw.remaining, "drew roll");
        self.state = SessionState::Selected(Candidate::new(draw.roll));
        Ok(draw)
    }

    pub fn set_topic(&mut self, topic: &str) -> Result<(), SpotlightError> {
        self.candidate_mut()?.topic = topic.trim().to_string();
        Ok(())
    }

    pub fn rate_content(&mut self, rating: StarRating) -> Result<(), SpotlightError> {
        self.candidate_mut()?.content = rating;
        Ok(())
    }

    pub fn rate_delivery(&mut self, rating: StarRating) -> Result<(), SpotlightError> {
        self.candidate_mut()?.delivery = rating;
        Ok(())
    }

    pub fn start_timer(&mut self, now: Instant) -> Result<(), SpotlightError> {
        let id = self.id;
        let candidate = self.candidate_mut()?;
        candidate.stopwatch.start(now);
        tracing::debug!(session = %id, roll = candidate.roll, "timer started");
        Ok(())
    }

    /// Freeze the stopwatch and report the captured time.
    pub fn stop_timer(&mut self, now: Instant) -> Result<Duration, SpotlightError> {
        let id = self.id;
        let candidate = self.candidate_mut()?;
        let elapsed = candidate.stopwatch.stop(now);
        tracing::debug!(session = %id, roll = candidate.roll, ?elapsed, "timer stopped");
        Ok(elapsed)
    }

    /// Time on the candidate's stopwatch, or zero when idle.
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.candidate()
            .map(|c| c.stopwatch.elapsed(now))
            .unwrap_or(Duration::ZERO)
    }

    /// Build the log row for the current candidate without changing state.
    ///
    /// A running stopwatch is read at `now`.
    pub fn record(
        &self,
        status: Status,
        now: Instant,
        at: NaiveDateTime,
    ) -> Result<AttendanceRecord, SpotlightError> {
        let candidate = self.candidate().ok_or(SpotlightError::NoSelection)?;
        Ok(match status {
            Status::Present => AttendanceRecord::present(
                candidate.roll,
                &candidate.topic,
                &candidate.duration(now),
                candidate.content,
                candidate.delivery,
                at,
            ),
            Status::Absent => AttendanceRecord::absent(candidate.roll, at),
        })
    }

    /// Return to idle once the candidate's record is persisted.
    pub fn complete(&mut self) -> Option<Candidate> {
        match std::mem::take(&mut self.state) {
            SessionState::Idle => None,
            SessionState::Selected(candidate) => Some(candidate),
        }
    }

    /// Clear the used set, the candidate and its stopwatch.
    pub fn reset(&mut self) {
        self.pool.reset();
        self.state = SessionState::Idle;
        tracing::info!(session = %self.id, "session reset");
    }
}
