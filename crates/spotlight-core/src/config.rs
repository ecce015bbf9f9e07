//! Startup configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level spotlight configuration, fixed for the life of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotlightConfig {
    /// Number of students; roll numbers run `1..=roster_size`.
    #[serde(default = "default_roster_size")]
    pub roster_size: u32,
    /// Attendance log (JSON Lines).
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
    /// Where exported reports are written.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
    /// Frames shown by the spin animation.
    #[serde(default = "default_spin_frames")]
    pub spin_frames: usize,
    /// Delay between spin frames in milliseconds.
    #[serde(default = "default_spin_delay")]
    pub spin_delay_ms: u64,
    /// Refresh interval of the live stopwatch in milliseconds.
    #[serde(default = "default_timer_tick")]
    pub timer_tick_ms: u64,
    /// Start the console in dark mode.
    #[serde(default = "default_true")]
    pub dark_mode: bool,
}

fn default_roster_size() -> u32 {
    62
}
fn default_log_path() -> PathBuf {
    PathBuf::from("ai_activity_log.jsonl")
}
fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_spin_frames() -> usize {
    12
}
fn default_spin_delay() -> u64 {
    60
}
fn default_timer_tick() -> u64 {
    1000
}
fn default_true() -> bool {
    true
}

impl Default for SpotlightConfig {
    fn default() -> Self {
        Self {
            roster_size: default_roster_size(),
            log_path: default_log_path(),
            export_dir: default_export_dir(),
            spin_frames: default_spin_frames(),
            spin_delay_ms: default_spin_delay(),
            timer_tick_ms: default_timer_tick(),
            dark_mode: true,
        }
    }
}

impl SpotlightConfig {
    pub fn spin_delay(&self) -> Duration {
        Duration::from_millis(self.spin_delay_ms)
    }

    pub fn timer_tick(&self) -> Duration {
        Duration::from_millis(self.timer_tick_ms.max(1))
    }

    fn validate(&self) -> Result<()> {
        if self.roster_size == 0 {
            anyhow::bail!("roster_size must be at least 1");
        }
        Ok(())
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `spotlight.toml` in the current directory
/// 2. `~/.config/spotlight/config.toml`
///
/// Environment variable override: `SPOTLIGHT_LOG_PATH`.
pub fn load_config() -> Result<SpotlightConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<SpotlightConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("spotlight.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<SpotlightConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => SpotlightConfig::default(),
    };

    if let Ok(log_path) = std::env::var("SPOTLIGHT_LOG_PATH") {
        if !log_path.is_empty() {
            config.log_path = PathBuf::from(log_path);
        }
    }

    config.validate()?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("spotlight"))
}
