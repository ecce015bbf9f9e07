//! CSV report generator.
//!
//! Produces RFC 4180 text with a header row followed by one row per record,
//! in log order.

use spotlight_core::model::{AttendanceRecord, COLUMNS};

/// Quote a field when it contains a delimiter, quote or line break.
fn csv_quote(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn push_row<I, S>(out: &mut String, fields: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let row: Vec<String> = fields.into_iter().map(|f| csv_quote(f.as_ref())).collect();
    out.push_str(&row.join(","));
    out.push_str("\r\n");
}

/// Generate the CSV report for `records`.
pub fn generate_csv(records: &[AttendanceRecord]) -> String {
    let mut csv = String::new();
    push_row(&mut csv, COLUMNS);
    for record in records {
        push_row(&mut csv, record.fields());
    }
    csv
}
