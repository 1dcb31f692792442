//! One completed test sequence run (one table row).

use crate::error::TdrError;
use crate::render::failstring::render_failure_report;
use crate::spec::SpecLookup;
use crate::tdr::layout::TableLayout;
use crate::tdr::row::Row;
use crate::tdr::test_result::TestResult;
use chrono::NaiveDateTime;

/// A raw test column of a record, before its spec is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestField<'a> {
    pub raw_name: &'a str,
    pub raw_value: &'a str,
}

impl TestField<'_> {
    /// Raw-text failure check used to pick tests for the failure report.
    pub fn is_failed(&self) -> bool {
        self.raw_value.contains("FAIL")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub timestamp: NaiveDateTime,
    pub serial: Option<String>,
    /// Overall sequence result; true only for the exact text "PASS".
    pub status: bool,
    line: u64,
    /// Test columns only: result, timestamp and serial columns are consumed above.
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn from_row(row: &Row, layout: &TableLayout) -> Self {
        let status = match row.get(&layout.result_column) {
            Some(value) => value == "PASS",
            None => {
                tracing::warn!(
                    line = row.line,
                    column = %layout.result_column,
                    "overall result column missing, treating record as not passed"
                );
                false
            }
        };

        let serial = row
            .get(&layout.serial_column)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let fields = row
            .fields
            .iter()
            .filter(|(name, _)| !layout.is_metadata(name))
            .cloned()
            .collect();

        Self {
            timestamp: row.timestamp,
            serial,
            status,
            line: row.line,
            fields,
        }
    }

    /// Source line of the row this record was built from.
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Every test column in table order. Not deduplicated by canonical name:
    /// `Voltage` and `Voltage [MEAS]` are two entries.
    pub fn tests(&self) -> impl Iterator<Item = TestField<'_>> {
        self.fields.iter().map(|(name, value)| TestField {
            raw_name: name,
            raw_value: value,
        })
    }

    /// Resolve every test column against the spec.
    pub fn test_results<S: SpecLookup + ?Sized>(
        &self,
        spec: &S,
    ) -> Result<Vec<TestResult>, TdrError> {
        self.tests()
            .map(|field| TestResult::resolve(self, field, spec))
            .collect()
    }

    /// Tests whose raw text contains "FAIL", resolved against the spec.
    pub fn failed_tests<S: SpecLookup + ?Sized>(
        &self,
        spec: &S,
    ) -> Result<Vec<TestResult>, TdrError> {
        self.tests()
            .filter(|field| field.is_failed())
            .map(|field| TestResult::resolve(self, field, spec))
            .collect()
    }

    pub fn build_failure_report<S: SpecLookup + ?Sized>(
        &self,
        spec: &S,
    ) -> Result<String, TdrError> {
        Ok(render_failure_report(&self.failed_tests(spec)?))
    }
}
