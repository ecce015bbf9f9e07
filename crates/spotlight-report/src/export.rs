//! Writing reports to disk.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use spotlight_core::model::AttendanceRecord;
use spotlight_core::SpotlightError;

use crate::csv::generate_csv;
use crate::json::generate_json;

/// Supported report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

/// Report file name for `date`, e.g. `AI_Activity_Report_20261017.csv`.
pub fn report_file_name(date: NaiveDate, format: ExportFormat) -> String {
    format!(
        "AI_Activity_Report_{}.{}",
        date.format("%Y%m%d"),
        format.extension()
    )
}

/// Render `records` and write them into `dir`, returning the written path.
///
/// An empty record list is [`SpotlightError::NoData`]; no header-only file
/// is produced.
pub fn write_report(
    records: &[AttendanceRecord],
    roster_size: u32,
    dir: &Path,
    format: ExportFormat,
    date: NaiveDate,
) -> Result<PathBuf> {
    if records.is_empty() {
        return Err(SpotlightError::NoData.into());
    }

    let body = match format {
        ExportFormat::Csv => generate_csv(records),
        ExportFormat::Json => serde_json::to_string_pretty(&generate_json(records, roster_size))
            .context("failed to serialize report")?,
    };

    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(report_file_name(date, format));
    std::fs::write(&path, body)
        .with_context(|| format!("failed to write report to {}", path.display()))?;

    tracing::info!(path = %path.display(), rows = records.len(), %format, "report exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[test]
    fn file_names_carry_the_date() {
        assert_eq!(
            report_file_name(date(), ExportFormat::Csv),
            "AI_Activity_Report_20261017.csv"
        );
        assert_eq!(
            report_file_name(date(), ExportFormat::Json),
            "AI_Activity_Report_20261017.json"
        );
    }

    #[test]
    fn format_parse() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("xlsx".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn writes_csv_into_nested_dir() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("reports");
        let at = date().and_hms_opt(10, 0, 0).unwrap();
        let records = vec![AttendanceRecord::absent(9, at)];

        let path = write_report(&records, 62, &out, ExportFormat::Csv, date()).unwrap();
        assert_eq!(path, out.join("AI_Activity_Report_20261017.csv"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Day,Date,Time,Roll Number"));
        assert!(text.contains("Saturday,2026-10-17,10:00 AM,9,Absent"));
    }

    #[test]
    fn empty_log_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let err = write_report(&[], 62, dir.path(), ExportFormat::Csv, date()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SpotlightError>(),
            Some(SpotlightError::NoData)
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
