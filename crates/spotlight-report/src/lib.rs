//! spotlight-report — Attendance report generation.
//!
//! Supports CSV (the downloadable classroom report) and JSON.

pub mod csv;
pub mod export;
pub mod json;

pub use export::{report_file_name, write_report, ExportFormat};
