use crate::model::SummaryData;

/// One line per record, then a totals line.
///
/// Example:
/// 2024-01-01 10:00:00.000000  SN123  FAIL  1/2 failed  Voltage
pub fn render_summary_text(data: &SummaryData) -> String {
    let mut out = String::new();
    for rec in &data.records {
        let names: Vec<&str> = rec.failed.iter().map(|t| t.name.as_str()).collect();
        out.push_str(&format!(
            "{}  {}  {}  {}/{} failed",
            rec.timestamp,
            rec.serial.as_deref().unwrap_or("-"),
            if rec.status { "PASS" } else { "FAIL" },
            rec.failed.len(),
            rec.tests,
        ));
        if !names.is_empty() {
            out.push_str("  ");
            out.push_str(&names.join(","));
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "records: {}  passed: {}  failed: {}\n",
        data.totals.records, data.totals.passed, data.totals.failed
    ));
    out
}

pub fn render_summary_json(data: &SummaryData) -> serde_json::Result<String> {
    serde_json::to_string_pretty(data)
}
