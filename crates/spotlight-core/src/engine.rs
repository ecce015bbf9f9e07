//! Central orchestrator for one classroom sitting.
//!
//! Couples the [`Session`] state machine with a [`RecordStore`] so that a
//! candidate is only released once its record is safely appended.

use std::sync::Arc;
use std::time::Instant;

use chrono::{Local, NaiveDateTime};
use rand::Rng;

use crate::error::SpotlightError;
use crate::model::{AttendanceRecord, Status};
use crate::pool::Draw;
use crate::session::Session;
use crate::summary::{summarize, Summary};
use crate::traits::RecordStore;

/// Drives draws, saves and reports for one sitting.
pub struct Arena {
    session: Session,
    store: Arc<dyn RecordStore>,
    spin_frames: usize,
}

impl Arena {
    pub fn new(roster_size: u32, store: Arc<dyn RecordStore>, spin_frames: usize) -> Self {
        Self {
            session: Session::new(roster_size),
            store,
            spin_frames,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    /// Draw with the thread-local RNG.
    pub fn draw(&mut self) -> Result<Draw, SpotlightError> {
        self.draw_with(&mut rand::thread_rng())
    }

    pub fn draw_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Draw, SpotlightError> {
        match self.session.draw(rng, self.spin_frames) {
            Err(e @ SpotlightError::ExhaustedPool { .. }) => {
                tracing::warn!(session = %self.session.id(), "{e}");
                Err(e)
            }
            other => other,
        }
    }

    /// Persist the current candidate with the wall clock, then go idle.
    pub async fn save(&mut self, status: Status) -> Result<AttendanceRecord, SpotlightError> {
        self.save_at(status, Instant::now(), Local::now().naive_local())
            .await
    }

    /// Persist the current candidate, then go idle.
    ///
    /// On any store failure the candidate, its ratings and its stopwatch are
    /// kept so the same action can be repeated.
    pub async fn save_at(
        &mut self,
        status: Status,
        now: Instant,
        at: NaiveDateTime,
    ) -> Result<AttendanceRecord, SpotlightError> {
        let record = self.session.record(status, now, at)?;
        if let Err(e) = self.store.append(&record).await {
            tracing::error!(
                session = %self.session.id(),
                roll = record.roll,
                store = %self.store.location(),
                "save failed: {e}"
            );
            return Err(e);
        }
        self.session.complete();
        tracing::info!(
            session = %self.session.id(),
            roll = record.roll,
            status = %record.status,
            total = record.total_score,
            "record saved"
        );
        Ok(record)
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Every persisted record; `NoData` when the log is missing or empty.
    pub async fn records(&self) -> Result<Vec<AttendanceRecord>, SpotlightError> {
        load_records(self.store.as_ref()).await
    }

    pub async fn summary(&self) -> Result<Summary, SpotlightError> {
        let records = self.records().await?;
        Ok(summarize(&records, self.session.pool().roster_size()))
    }
}

/// Load the whole log, treating a missing or empty log as [`SpotlightError::NoData`].
pub async fn load_records(
    store: &dyn RecordStore,
) -> Result<Vec<AttendanceRecord>, SpotlightError> {
    match store.load().await? {
        Some(records) if !records.is_empty() => Ok(records),
        _ => Err(SpotlightError::NoData),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::model::StarRating;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 17)
            .unwrap()
            .and_hms_opt(10, 15, 0)
            .unwrap()
    }

    fn arena(roster: u32) -> (Arc<MemoryStore>, Arena) {
        let store = Arc::new(MemoryStore::new());
        let arena = Arena::new(roster, store.clone(), 12);
        (store, arena)
    }

    #[tokio::test]
    async fn full_cycle_present_then_absent() {
        let (store, mut arena) = arena(3);
        let mut rng = StdRng::seed_from_u64(11);

        let first = arena.draw_with(&mut rng).unwrap();
        assert_eq!(first.preview.len(), 12);
        let session = arena.session_mut();
        session.set_topic("ChatGPT").unwrap();
        session.rate_content("⭐⭐⭐⭐".parse().unwrap()).unwrap();
        session.rate_delivery("⭐⭐".parse().unwrap()).unwrap();
        let t0 = Instant::now();
        session.start_timer(t0).unwrap();
        session.stop_timer(t0 + Duration::from_secs(300)).unwrap();

        let saved = arena
            .save_at(Status::Present, t0 + Duration::from_secs(310), at())
            .await
            .unwrap();
        assert_eq!(saved.roll, first.roll);
        assert_eq!(saved.duration, "5m 0s");
        assert_eq!(saved.total_score, 6);
        assert!(arena.session().candidate().is_none());

        let second = arena.draw_with(&mut rng).unwrap();
        assert_ne!(second.roll, first.roll);
        let absent = arena
            .save_at(Status::Absent, Instant::now(), at())
            .await
            .unwrap();
        assert_eq!(absent.total_score, 0);
        assert!(arena.session().candidate().is_none());

        let rows = store.records();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].roll, first.roll);
        assert_eq!(rows[1].roll, second.roll);
    }

    #[tokio::test]
    async fn locked_store_keeps_candidate_for_retry() {
        let (store, mut arena) = arena(5);
        let mut rng = StdRng::seed_from_u64(2);
        let draw = arena.draw_with(&mut rng).unwrap();
        arena
            .session_mut()
            .rate_content(StarRating::new(5).unwrap())
            .unwrap();

        store.set_locked(true);
        let err = arena.save(Status::Present).await.unwrap_err();
        assert!(matches!(err, SpotlightError::FileLocked { .. }));
        let candidate = arena.session().candidate().unwrap();
        assert_eq!(candidate.roll, draw.roll);
        assert_eq!(candidate.content.value(), 5);

        store.set_locked(false);
        let record = arena.save(Status::Present).await.unwrap();
        assert_eq!(record.content_star, 5);
        assert_eq!(store.append_calls(), 2);
        assert_eq!(store.records().len(), 1);
    }

    #[tokio::test]
    async fn save_without_candidate_touches_nothing() {
        let (store, mut arena) = arena(5);
        let err = arena.save(Status::Absent).await.unwrap_err();
        assert!(matches!(err, SpotlightError::NoSelection));
        assert_eq!(store.append_calls(), 0);
    }

    #[tokio::test]
    async fn exhausted_pool_after_roster_draws() {
        let (_store, mut arena) = arena(2);
        let mut rng = StdRng::seed_from_u64(8);
        arena.draw_with(&mut rng).unwrap();
        arena.save(Status::Absent).await.unwrap();
        arena.draw_with(&mut rng).unwrap();
        arena.save(Status::Absent).await.unwrap();
        assert!(matches!(
            arena.draw_with(&mut rng),
            Err(SpotlightError::ExhaustedPool { roster_size: 2 })
        ));

        arena.reset();
        assert!(arena.draw_with(&mut rng).is_ok());
    }

    #[tokio::test]
    async fn reports_need_data() {
        let (_store, mut arena) = arena(4);
        assert!(matches!(arena.records().await, Err(SpotlightError::NoData)));
        assert!(matches!(arena.summary().await, Err(SpotlightError::NoData)));

        arena.draw().unwrap();
        arena.save(Status::Present).await.unwrap();
        let summary = arena.summary().await.unwrap();
        assert_eq!(summary.present, 1);
        assert!((summary.completion - 0.25).abs() < 1e-9);
    }

    #[tokio::test]
    async fn empty_existing_log_is_no_data() {
        let store = MemoryStore::with_records(Vec::new());
        assert!(matches!(
            load_records(&store).await,
            Err(SpotlightError::NoData)
        ));
    }
}
