//! Interactive draw/review console.
//!
//! Reads one action per line and re-renders after each one. The live
//! stopwatch polls on a ticker and stops on the next line of input, so the
//! console never blocks out the stop action.

use std::io::Write;
use std::time::Instant;

use anyhow::Result;
use chrono::Local;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use spotlight_core::config::SpotlightConfig;
use spotlight_core::engine::Arena;
use spotlight_core::model::{StarRating, Status};
use spotlight_core::stopwatch::{format_clock, format_duration, Stopwatch};
use spotlight_core::SpotlightError;
use spotlight_report::{write_report, ExportFormat};

use crate::theme::{records_table, summary_table, Theme};

/// One console command.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Draw,
    Topic(String),
    Start,
    Watch,
    Stop,
    Content(StarRating),
    Delivery(StarRating),
    Present,
    Absent,
    Reset,
    ToggleTheme,
    Export(ExportFormat),
    Summary,
    Log,
    Status,
    Help,
    Quit,
}

const HELP: &str = "\
Commands:
  draw | spin            pick an unused roll number
  topic <text>           set the presentation topic
  start                  start the stopwatch
  watch                  show the live stopwatch; Enter stops it
  stop                   stop the stopwatch and capture the time
  content <1-5|⭐⭐⭐>     rate content quality
  delivery <1-5|⭐⭐⭐>    rate conveying manner
  present | save         save as present and complete
  absent                 mark absent
  reset                  forget every drawn roll number
  theme                  toggle dark/light mode
  export [csv|json]      write a dated report
  summary                present/absent counts and progress
  log                    list saved records
  status                 show the current candidate
  help                   this text
  quit                   leave the session";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_action(line: &str) -> Result<Option<Action>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let rating = |rest: &str, what: &str| -> Result<StarRating, String> {
        if rest.is_empty() {
            return Err(format!("usage: {what} <1-5 or ⭐⭐⭐>"));
        }
        rest.parse::<StarRating>().map_err(|e| e.to_string())
    };

    let action = match verb.to_lowercase().as_str() {
        "draw" | "spin" => Action::Draw,
        "topic" => {
            if rest.is_empty() {
                return Err("usage: topic <name of the AI tool or topic>".to_string());
            }
            Action::Topic(rest.to_string())
        }
        "start" => Action::Start,
        "watch" => Action::Watch,
        "stop" => Action::Stop,
        "content" => Action::Content(rating(rest, "content")?),
        "delivery" => Action::Delivery(rating(rest, "delivery")?),
        "present" | "save" => Action::Present,
        "absent" => Action::Absent,
        "reset" => Action::Reset,
        "theme" => Action::ToggleTheme,
        "export" => Action::Export(if rest.is_empty() {
            ExportFormat::default()
        } else {
            rest.parse()?
        }),
        "summary" => Action::Summary,
        "log" => Action::Log,
        "status" => Action::Status,
        "help" | "?" => Action::Help,
        "quit" | "exit" | "q" => Action::Quit,
        other => return Err(format!("Unknown command: {other} (type `help`)")),
    };
    Ok(Some(action))
}

/// The interactive console, writing everything it shows to `out`.
pub struct Console<W: Write> {
    arena: Arena,
    config: SpotlightConfig,
    theme: Theme,
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(arena: Arena, config: SpotlightConfig, out: W) -> Self {
        let theme = Theme::from_dark_mode(config.dark_mode);
        Self {
            arena,
            config,
            theme,
            out,
        }
    }

    /// Process lines from `input` until `quit` or end of input.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<()> {
        let mut lines = input.lines();
        writeln!(
            self.out,
            "🤖 AI Spotlight: 5-Minute Pitch (roster of {}, type `help`)",
            self.config.roster_size
        )?;

        loop {
            self.prompt()?;
            let Some(line) = lines.next_line().await? else {
                writeln!(self.out)?;
                break;
            };
            let action = match parse_action(&line) {
                Ok(Some(action)) => action,
                Ok(None) => continue,
                Err(message) => {
                    writeln!(self.out, "{message}")?;
                    continue;
                }
            };
            if action == Action::Quit {
                break;
            }
            self.dispatch(action, &mut lines).await?;
        }

        writeln!(self.out, "Bye!")?;
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        let marker = self.theme.prompt_marker();
        match self.arena.session().candidate() {
            Some(candidate) => write!(self.out, "🎯 roll {} {marker} ", candidate.roll)?,
            None => write!(self.out, "spotlight {marker} ")?,
        }
        self.out.flush()?;
        Ok(())
    }

    async fn dispatch<R: AsyncBufRead + Unpin>(
        &mut self,
        action: Action,
        lines: &mut Lines<R>,
    ) -> Result<()> {
        let outcome = match action {
            Action::Draw => self.draw().await,
            Action::Topic(topic) => self.arena.session_mut().set_topic(&topic).map(|()| {
                format!("📝 Topic: {}", topic.trim())
            }),
            Action::Start => self
                .arena
                .session_mut()
                .start_timer(Instant::now())
                .map(|()| "▶️ Timer started (`watch` to follow it, `stop` to capture)".to_string()),
            Action::Watch => self.watch(lines).await,
            Action::Stop => self.stop(),
            Action::Content(rating) => self
                .arena
                .session_mut()
                .rate_content(rating)
                .map(|()| format!("Content Quality: {} ({rating})", rating.glyphs())),
            Action::Delivery(rating) => self
                .arena
                .session_mut()
                .rate_delivery(rating)
                .map(|()| format!("Conveying Manner: {} ({rating})", rating.glyphs())),
            Action::Present => self.save(Status::Present).await,
            Action::Absent => self.save(Status::Absent).await,
            Action::Reset => {
                self.arena.reset();
                Ok("🧹 Memory cleared! Every roll number is back in the wheel.".to_string())
            }
            Action::ToggleTheme => {
                self.theme = self.theme.toggled();
                Ok(format!("Theme: {}", self.theme.label()))
            }
            Action::Export(format) => self.export(format).await,
            Action::Summary => match self.arena.summary().await {
                Ok(summary) => Ok(summary_table(&summary, self.theme).to_string()),
                Err(SpotlightError::NoData) => Ok("No records yet.".to_string()),
                Err(e) => Err(e),
            },
            Action::Log => self
                .arena
                .records()
                .await
                .map(|records| records_table(&records, self.theme).to_string()),
            Action::Status => Ok(self.status()),
            Action::Help => Ok(HELP.to_string()),
            Action::Quit => Ok(String::new()),
        };

        match outcome {
            Ok(message) => {
                if !message.is_empty() {
                    writeln!(self.out, "{message}")?;
                }
                Ok(())
            }
            Err(e) if e.is_recoverable() => {
                writeln!(self.out, "{}", describe(&e))?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn draw(&mut self) -> Result<String, SpotlightError> {
        let draw = self.arena.draw()?;
        let delay = self.config.spin_delay();
        for candidate in &draw.preview {
            write!(self.out, "\r🎡 {candidate:>3}")?;
            self.out.flush()?;
            tokio::time::sleep(delay).await;
        }
        writeln!(self.out, "\r🏆 ROLL {}   ", draw.roll)?;
        Ok(format!(
            "🎯 Candidate: Roll No. {} ({} left in the wheel)",
            draw.roll, draw.remaining
        ))
    }

    async fn watch<R: AsyncBufRead + Unpin>(
        &mut self,
        lines: &mut Lines<R>,
    ) -> Result<String, SpotlightError> {
        let stopwatch = self
            .arena
            .session()
            .candidate()
            .ok_or(SpotlightError::NoSelection)?
            .stopwatch;
        match stopwatch {
            Stopwatch::Idle => self.arena.session_mut().start_timer(Instant::now())?,
            Stopwatch::Running { .. } => {}
            Stopwatch::Stopped { elapsed } => {
                return Ok(format!(
                    "⏹️ Stopwatch stopped at {} (`start` to time again)",
                    format_clock(elapsed)
                ))
            }
        }

        writeln!(self.out, "⏱️ Live Stopwatch (press Enter to stop)")?;
        let mut ticker = tokio::time::interval(self.config.timer_tick());
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let elapsed = self.arena.session().elapsed(Instant::now());
                    write!(self.out, "\r⏳ Time: {}", format_clock(elapsed))?;
                    self.out.flush()?;
                }
                line = lines.next_line() => {
                    line?;
                    break;
                }
            }
        }
        writeln!(self.out)?;
        self.stop()
    }

    fn stop(&mut self) -> Result<String, SpotlightError> {
        let elapsed = self.arena.session_mut().stop_timer(Instant::now())?;
        Ok(format!(
            "⏹️ Final Time Captured: {}",
            format_duration(elapsed)
        ))
    }

    async fn save(&mut self, status: Status) -> Result<String, SpotlightError> {
        let record = self.arena.save(status).await?;
        Ok(match record.status {
            Status::Present => format!(
                "💾 Saved roll {} as Present: {} in {}, score {}/10",
                record.roll,
                if record.topic.is_empty() {
                    "(no topic)"
                } else {
                    record.topic.as_str()
                },
                record.duration,
                record.total_score
            ),
            Status::Absent => format!("❌ Roll {} marked Absent", record.roll),
        })
    }

    async fn export(&mut self, format: ExportFormat) -> Result<String, SpotlightError> {
        let records = match self.arena.records().await {
            Ok(records) => records,
            Err(SpotlightError::NoData) => {
                return Ok("No data available to download yet.".to_string())
            }
            Err(e) => return Err(e),
        };
        let today = Local::now().date_naive();
        let roster_size = self.arena.session().pool().roster_size();
        match write_report(&records, roster_size, &self.config.export_dir, format, today) {
            Ok(path) => Ok(format!("📄 Report written to {}", path.display())),
            Err(e) => {
                tracing::warn!("export failed: {e:#}");
                Ok(format!("⚠️ Export failed: {e:#}"))
            }
        }
    }

    fn status(&self) -> String {
        let session = self.arena.session();
        let pool = session.pool();
        let drawn = format!("Drawn {}/{}", pool.used_count(), pool.roster_size());
        let Some(candidate) = session.candidate() else {
            return format!("No student selected. {drawn}");
        };
        let elapsed = candidate.stopwatch.elapsed(Instant::now());
        let clock_state = if candidate.stopwatch.is_running() {
            " (running)"
        } else {
            ""
        };
        format!(
            "🎯 Candidate: Roll No. {}\n   Topic:    {}\n   Content:  {} ({})\n   Delivery: {} ({})\n   Time:     {}{}\n{drawn}",
            candidate.roll,
            if candidate.topic.is_empty() {
                "(not set)"
            } else {
                candidate.topic.as_str()
            },
            candidate.content.glyphs(),
            candidate.content,
            candidate.delivery.glyphs(),
            candidate.delivery,
            format_clock(elapsed),
            clock_state,
        )
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.out
    }
}

/// User-facing text for a recoverable failure.
fn describe(err: &SpotlightError) -> String {
    match err {
        SpotlightError::ExhaustedPool { .. } => {
            "⚠️ All students have participated! Use `reset` to start over.".to_string()
        }
        SpotlightError::FileLocked { path } => format!(
            "⚠️ CLOSE THE LOG: {} is open in another program. Close it and save again.",
            path.display()
        ),
        SpotlightError::NoData => "No records yet.".to_string(),
        SpotlightError::NoSelection => "No student selected. Type `draw` first.".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use spotlight_core::memory::MemoryStore;

    fn test_config(roster_size: u32) -> SpotlightConfig {
        SpotlightConfig {
            roster_size,
            spin_delay_ms: 0,
            timer_tick_ms: 5,
            export_dir: std::env::temp_dir(),
            ..SpotlightConfig::default()
        }
    }

    async fn run_script(
        store: Arc<MemoryStore>,
        roster_size: u32,
        script: &str,
    ) -> String {
        run_with_config(store, test_config(roster_size), script).await
    }

    async fn run_with_config(
        store: Arc<MemoryStore>,
        config: SpotlightConfig,
        script: &str,
    ) -> String {
        let roster_size = config.roster_size;
        let arena = Arena::new(roster_size, store, config.spin_frames);
        let mut console = Console::new(arena, config, Vec::new());
        console.run(script.as_bytes()).await.unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_action("  ").unwrap(), None);
        assert_eq!(parse_action("SPIN").unwrap(), Some(Action::Draw));
        assert_eq!(
            parse_action("topic  Stable Diffusion ").unwrap(),
            Some(Action::Topic("Stable Diffusion".into()))
        );
        assert_eq!(
            parse_action("content ⭐⭐⭐⭐").unwrap(),
            Some(Action::Content(StarRating::new(4).unwrap()))
        );
        assert_eq!(
            parse_action("delivery 2").unwrap(),
            Some(Action::Delivery(StarRating::new(2).unwrap()))
        );
        assert_eq!(
            parse_action("export json").unwrap(),
            Some(Action::Export(ExportFormat::Json))
        );
        assert_eq!(parse_action("save").unwrap(), Some(Action::Present));
        assert!(parse_action("content 9").is_err());
        assert!(parse_action("topic").is_err());
        assert!(parse_action("export xlsx").is_err());
        assert!(parse_action("dance").unwrap_err().contains("Unknown command"));
    }

    #[tokio::test]
    async fn draw_review_and_save() {
        let store = Arc::new(MemoryStore::new());
        let out = run_script(
            store.clone(),
            1,
            "draw\ntopic Gemini\ncontent ⭐⭐⭐⭐\ndelivery ⭐⭐\nstart\nstop\npresent\nquit\n",
        )
        .await;

        assert!(out.contains("🏆 ROLL 1"));
        assert!(out.contains("Final Time Captured: 0m 0s"));
        assert!(out.contains("Saved roll 1 as Present"));
        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].topic, "Gemini");
        assert_eq!(records[0].total_score, 6);
    }

    #[tokio::test]
    async fn exhausted_wheel_warns() {
        let store = Arc::new(MemoryStore::new());
        let out = run_script(store.clone(), 2, "draw\nabsent\ndraw\nabsent\ndraw\n").await;
        assert!(out.contains("All students have participated"));
        assert_eq!(store.records().len(), 2);
        assert!(out.ends_with("Bye!\n"));
    }

    #[tokio::test]
    async fn locked_log_keeps_candidate() {
        let store = Arc::new(MemoryStore::new());
        store.set_locked(true);
        let out = run_script(store.clone(), 3, "draw\npresent\nstatus\n").await;
        assert!(out.contains("CLOSE THE LOG"));
        assert!(out.contains("Topic:    (not set)"));
        assert!(store.records().is_empty());
    }

    #[tokio::test]
    async fn idle_actions_are_rejected_politely() {
        let store = Arc::new(MemoryStore::new());
        let out = run_script(store.clone(), 3, "present\nstop\ntopic x\n").await;
        assert_eq!(out.matches("No student selected").count(), 3);
        assert_eq!(store.append_calls(), 0);
    }

    #[tokio::test]
    async fn reports_without_data() {
        let store = Arc::new(MemoryStore::new());
        let out = run_script(store, 3, "summary\nexport\nlog\n").await;
        assert!(out.contains("No records yet."));
        assert!(out.contains("No data available to download yet."));
    }

    #[tokio::test]
    async fn watch_stops_on_enter() {
        let store = Arc::new(MemoryStore::new());
        let out = run_script(store, 3, "draw\nwatch\n\nquit\n").await;
        assert!(out.contains("Live Stopwatch"));
        assert!(out.contains("Final Time Captured"));
    }

    #[tokio::test]
    async fn watch_after_stop_keeps_captured_time() {
        let store = Arc::new(MemoryStore::new());
        let out = run_script(store.clone(), 3, "draw\nstart\nstop\nwatch\nabsent\n").await;
        assert!(out.contains("Stopwatch stopped at 00:00"));
        assert!(!out.contains("Live Stopwatch"));
        assert_eq!(store.records().len(), 1);
    }

    #[tokio::test]
    async fn failed_export_keeps_session_alive() {
        let blocker = tempfile::NamedTempFile::new().unwrap();
        let store = Arc::new(MemoryStore::new());
        let config = SpotlightConfig {
            export_dir: blocker.path().join("reports"),
            ..test_config(3)
        };
        let out = run_with_config(store.clone(), config, "draw\nabsent\ndraw\nexport\nstatus\n").await;
        assert!(out.contains("Export failed"));
        assert!(out.contains("Topic:    (not set)"));
        assert!(out.ends_with("Bye!\n"));
        assert_eq!(store.records().len(), 1);
    }

    #[tokio::test]
    async fn reset_and_theme() {
        let store = Arc::new(MemoryStore::new());
        let out = run_script(store, 1, "draw\nreset\nstatus\ntheme\ndraw\n").await;
        assert!(out.contains("Memory cleared"));
        assert!(out.contains("No student selected. Drawn 0/1"));
        assert!(out.contains("light"));
        assert_eq!(out.matches("🏆 ROLL 1").count(), 2);
    }
}
