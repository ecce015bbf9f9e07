//! Console look: table borders and prompt glyphs.

use comfy_table::presets::{ASCII_FULL, UTF8_FULL};
use comfy_table::{Cell, Table};

use spotlight_core::model::AttendanceRecord;
use spotlight_core::summary::Summary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "🌙 dark",
            Theme::Light => "☀️ light",
        }
    }

    pub fn prompt_marker(self) -> &'static str {
        match self {
            Theme::Dark => "❯",
            Theme::Light => ">",
        }
    }

    pub fn table(self) -> Table {
        let mut table = Table::new();
        match self {
            Theme::Dark => table.load_preset(UTF8_FULL),
            Theme::Light => table.load_preset(ASCII_FULL),
        };
        table
    }
}

/// Two-column summary table.
pub fn summary_table(summary: &Summary, theme: Theme) -> Table {
    let mut table = theme.table();
    table.set_header(vec!["📊 Session Summary", ""]);
    table.add_row(vec![Cell::new("Present ✅"), Cell::new(summary.present)]);
    table.add_row(vec![Cell::new("Absent ❌"), Cell::new(summary.absent)]);
    table.add_row(vec![
        Cell::new("Progress"),
        Cell::new(format!(
            "{} {}/{} ({:.1}%)",
            summary.progress_bar(20),
            summary.present,
            summary.roster_size,
            summary.completion * 100.0
        )),
    ]);
    let average = summary
        .average_score
        .map(|avg| format!("{avg:.1}/10"))
        .unwrap_or_else(|| "-".to_string());
    table.add_row(vec![Cell::new("Average score"), Cell::new(average)]);
    table
}

/// One row per record, in log order.
pub fn records_table(records: &[AttendanceRecord], theme: Theme) -> Table {
    let mut table = theme.table();
    table.set_header(spotlight_core::model::COLUMNS.to_vec());
    for record in records {
        table.add_row(record.fields().to_vec());
    }
    table
}
