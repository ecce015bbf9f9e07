//! Single-run presentation stopwatch.
//!
//! The stopwatch never loops on its own; callers poll [`Stopwatch::elapsed`]
//! on whatever schedule their display needs, and [`Stopwatch::stop`] is
//! always reachable.

use std::time::{Duration, Instant};

/// Stopwatch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stopwatch {
    /// Never started.
    #[default]
    Idle,
    /// Counting since `started_at`.
    Running { started_at: Instant },
    /// Frozen at `elapsed`.
    Stopped { elapsed: Duration },
}

impl Stopwatch {
    /// Start counting from zero. Restarts a running or stopped stopwatch.
    pub fn start(&mut self, now: Instant) {
        *self = Stopwatch::Running { started_at: now };
    }

    /// Freeze the stopwatch and return the captured time.
    pub fn stop(&mut self, now: Instant) -> Duration {
        let elapsed = self.elapsed(now);
        if let Stopwatch::Running { .. } = self {
            *self = Stopwatch::Stopped { elapsed };
        }
        elapsed
    }

    /// Time on the clock at `now`.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match *self {
            Stopwatch::Idle => Duration::ZERO,
            Stopwatch::Running { started_at } => now.saturating_duration_since(started_at),
            Stopwatch::Stopped { elapsed } => elapsed,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Stopwatch::Running { .. })
    }
}

/// Format as `"{minutes}m {seconds}s"`, the form stored in the log.
pub fn format_duration(elapsed: Duration) -> String {
    let (mins, secs) = split(elapsed);
    format!("{mins}m {secs}s")
}

/// Format as a `MM:SS` clock face.
pub fn format_clock(elapsed: Duration) -> String {
    let (mins, secs) = split(elapsed);
    format!("{mins:02}:{secs:02}")
}

fn split(elapsed: Duration) -> (u64, u64) {
    let total = elapsed.as_secs();
    (total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_reads_zero() {
        let mut watch = Stopwatch::default();
        let now = Instant::now();
        assert_eq!(watch.elapsed(now), Duration::ZERO);
        assert_eq!(watch.stop(now), Duration::ZERO);
        assert_eq!(watch, Stopwatch::Idle);
    }

    #[test]
    fn start_then_stop_freezes_elapsed() {
        let t0 = Instant::now();
        let mut watch = Stopwatch::default();
        watch.start(t0);
        assert!(watch.is_running());
        assert_eq!(watch.elapsed(t0 + Duration::from_secs(30)), Duration::from_secs(30));

        let captured = watch.stop(t0 + Duration::from_secs(125));
        assert_eq!(captured, Duration::from_secs(125));
        assert!(!watch.is_running());
        assert_eq!(
            watch.elapsed(t0 + Duration::from_secs(999)),
            Duration::from_secs(125)
        );
        // Stopping again reports the same frozen value.
        assert_eq!(watch.stop(t0 + Duration::from_secs(500)), Duration::from_secs(125));
    }

    #[test]
    fn restart_counts_from_zero() {
        let t0 = Instant::now();
        let mut watch = Stopwatch::default();
        watch.start(t0);
        watch.stop(t0 + Duration::from_secs(40));
        watch.start(t0 + Duration::from_secs(60));
        assert_eq!(
            watch.elapsed(t0 + Duration::from_secs(65)),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn formatting() {
        assert_eq!(format_duration(Duration::ZERO), "0m 0s");
        assert_eq!(format_duration(Duration::from_millis(252_900)), "4m 12s");
        assert_eq!(format_clock(Duration::from_secs(65)), "01:05");
        assert_eq!(format_clock(Duration::from_secs(3600)), "60:00");
    }
}
