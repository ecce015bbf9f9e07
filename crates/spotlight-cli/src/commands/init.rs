//! The `spotlight init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("spotlight.toml").exists() {
        println!("spotlight.toml already exists, skipping.");
    } else {
        std::fs::write("spotlight.toml", SAMPLE_CONFIG)?;
        println!("Created spotlight.toml");
    }

    println!("\nNext steps:");
    println!("  1. Set roster_size in spotlight.toml to your class size");
    println!("  2. Run: spotlight session");
    println!("  3. After class: spotlight export");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# spotlight configuration

# Roll numbers run from 1 to roster_size.
roster_size = 62

# Attendance log, one JSON record per line.
log_path = "ai_activity_log.jsonl"

# Where `spotlight export` writes AI_Activity_Report_YYYYMMDD.csv
export_dir = "."

# Spin-the-wheel animation.
spin_frames = 12
spin_delay_ms = 60

# Live stopwatch refresh.
timer_tick_ms = 1000

dark_mode = true
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use spotlight_core::config::SpotlightConfig;

    #[test]
    fn sample_config_matches_defaults() {
        let parsed: SpotlightConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(parsed, SpotlightConfig::default());
    }
}
