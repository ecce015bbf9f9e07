//! JSON report generator.

use serde_json::{json, Value};

use spotlight_core::model::AttendanceRecord;
use spotlight_core::summary::summarize;

/// Generate a JSON document holding the records and their summary.
pub fn generate_json(records: &[AttendanceRecord], roster_size: u32) -> Value {
    let summary = summarize(records, roster_size);
    json!({
        "roster_size": roster_size,
        "summary": summary,
        "records": records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_records_and_summary() {
        let at = chrono::NaiveDate::from_ymd_opt(2026, 10, 14)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let records = vec![AttendanceRecord::absent(2, at)];
        let doc = generate_json(&records, 62);
        assert_eq!(doc["roster_size"], 62);
        assert_eq!(doc["summary"]["absent"], 1);
        assert_eq!(doc["summary"]["present"], 0);
        assert_eq!(doc["records"][0]["Roll Number"], 2);
        assert_eq!(doc["records"][0]["Topic"], "N/A");
    }
}
