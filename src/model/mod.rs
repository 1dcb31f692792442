//! Summary model: combine records with their resolved failed tests.

use crate::error::TdrError;
use crate::render::failstring::fmt_number;
use crate::spec::SpecLookup;
use crate::tdr::{Record, TestResult};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FailedTestView {
    pub name: String,
    pub raw_name: String,
    pub data_type: String,
    /// None when the data type yields no measurement.
    pub meas: Option<String>,
    pub operator: Option<String>,
    pub nominal: String,
    pub low_limit: String,
    pub high_limit: String,
    pub units: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordView {
    pub line: u64,
    pub timestamp: String,
    pub serial: Option<String>,
    pub status: bool,
    pub tests: usize,
    pub failed: Vec<FailedTestView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TotalsView {
    pub records: usize,
    pub passed: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub records: Vec<RecordView>,
    pub totals: TotalsView,
}

/// Build summary data. Any failed test without a spec aborts the summary.
pub fn build_summary<S: SpecLookup + ?Sized>(
    records: &[Record],
    spec: &S,
) -> Result<SummaryData, TdrError> {
    let mut views = Vec::with_capacity(records.len());
    for record in records {
        let failed = record
            .failed_tests(spec)?
            .iter()
            .map(failed_test_view)
            .collect();

        views.push(RecordView {
            line: record.line(),
            timestamp: record.timestamp.format("%Y-%m-%d %H:%M:%S%.6f").to_string(),
            serial: record.serial.clone(),
            status: record.status,
            tests: record.tests().count(),
            failed,
        });
    }

    let passed = views.iter().filter(|v| v.status).count();
    Ok(SummaryData {
        totals: TotalsView {
            records: views.len(),
            passed,
            failed: views.len() - passed,
        },
        records: views,
    })
}

fn failed_test_view(test: &TestResult) -> FailedTestView {
    FailedTestView {
        name: test.name().to_string(),
        raw_name: test.raw_name().to_string(),
        data_type: test.data_type().to_string(),
        meas: test.meas().map(|m| m.to_string()),
        operator: test.operator().map(|op| op.to_string()),
        nominal: fmt_number(test.nominal()),
        low_limit: fmt_number(test.low_limit()),
        high_limit: fmt_number(test.high_limit()),
        units: test.units().to_string(),
    }
}
