//! A single named test's outcome within a record, joined with its spec.
//!
//! The measured value and the comparison operator are derived together, once,
//! from the spec's data type:
//!
//! | type            | meas                                              | operator |
//! |-----------------|---------------------------------------------------|----------|
//! | DBL             | sibling `"{name} [MEAS]"` value                   | `<>`     |
//! | DBL (no MEAS)   | `!nominal` for nominal 0.0 / 1.0, else absent     | `==` / - |
//! | BOOLEAN         | 1 if the test passed, else 0                      | `==`     |
//! | STRING          | absent                                            | `==`     |
//! | CORRELATION DBL | absent                                            | `<>`     |

use crate::error::TdrError;
use crate::spec::{DataType, SpecLookup, TestSpec};
use crate::tdr::record::{Record, TestField};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Separator between a base test name and its bracketed annotation.
static ANNOTATION_SEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" \[").expect("annotation separator pattern"));

/// Strip a bracketed annotation: "Voltage [MEAS]" => "Voltage".
pub fn canonical_name(raw: &str) -> &str {
    if !raw.contains('[') {
        return raw;
    }
    ANNOTATION_SEP.split(raw).next().unwrap_or(raw)
}

/// Comparison applied between the measurement and the spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `==`
    Equal,
    /// `<>`: measurement checked against the low/high limits.
    Tolerance,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "==",
            Operator::Tolerance => "<>",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeasuredValue {
    /// Text of a sibling `[MEAS]` column, as recorded.
    Raw(String),
    /// 0 or 1.
    Flag(u8),
}

impl fmt::Display for MeasuredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasuredValue::Raw(text) => f.write_str(text),
            MeasuredValue::Flag(flag) => write!(f, "{}", flag),
        }
    }
}

/// Derived measurement. `None` marks a value (or operator) the data type
/// cannot provide.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Measurement {
    pub value: Option<MeasuredValue>,
    pub operator: Option<Operator>,
}

impl Measurement {
    fn new(value: Option<MeasuredValue>, operator: Operator) -> Self {
        Self {
            value,
            operator: Some(operator),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    raw_name: String,
    name: String,
    raw_value: String,
    spec: TestSpec,
    measurement: Measurement,
}

impl TestResult {
    /// Join one test column of `record` with its spec and derive the measurement.
    ///
    /// Fails with `SpecNotFound` if the canonical name has no spec entry.
    pub fn resolve<S: SpecLookup + ?Sized>(
        record: &Record,
        field: TestField<'_>,
        spec: &S,
    ) -> Result<Self, TdrError> {
        let name = canonical_name(field.raw_name);
        let spec = spec.lookup(name)?.clone();

        let status = passed(field.raw_value);
        let sibling = record.field(&format!("{} [MEAS]", name));
        let measurement = measure(&spec, status, sibling);

        Ok(Self {
            raw_name: field.raw_name.to_string(),
            name: name.to_string(),
            raw_value: field.raw_value.to_string(),
            spec,
            measurement,
        })
    }

    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    /// Canonical name (annotation stripped).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn raw_value(&self) -> &str {
        &self.raw_value
    }

    /// True if the raw text contains "PASS" anywhere.
    pub fn status(&self) -> bool {
        passed(&self.raw_value)
    }

    pub fn data_type(&self) -> DataType {
        self.spec.data_type
    }

    pub fn nominal(&self) -> f64 {
        self.spec.nominal
    }

    pub fn units(&self) -> &str {
        &self.spec.units
    }

    pub fn low_limit(&self) -> f64 {
        self.spec.low_limit
    }

    pub fn high_limit(&self) -> f64 {
        self.spec.high_limit
    }

    pub fn meas(&self) -> Option<&MeasuredValue> {
        self.measurement.value.as_ref()
    }

    pub fn operator(&self) -> Option<Operator> {
        self.measurement.operator
    }

    pub fn measurement(&self) -> &Measurement {
        &self.measurement
    }
}

fn passed(raw_value: &str) -> bool {
    raw_value.contains("PASS")
}

fn measure(spec: &TestSpec, status: bool, sibling: Option<&str>) -> Measurement {
    match spec.data_type {
        DataType::Dbl => measure_dbl(spec.nominal, sibling),
        DataType::Boolean => measure_boolean(status),
        DataType::String => measure_string(),
        DataType::CorrelationDbl => measure_correlation_dbl(),
    }
}

fn measure_dbl(nominal: f64, sibling: Option<&str>) -> Measurement {
    if let Some(value) = sibling {
        return Measurement::new(Some(MeasuredValue::Raw(value.to_string())), Operator::Tolerance);
    }
    // Pass/fail-only DBL tests: the recorded failure is the inverse of nominal.
    if nominal == 1.0 {
        Measurement::new(Some(MeasuredValue::Flag(0)), Operator::Equal)
    } else if nominal == 0.0 {
        Measurement::new(Some(MeasuredValue::Flag(1)), Operator::Equal)
    } else {
        Measurement::default()
    }
}

fn measure_boolean(status: bool) -> Measurement {
    Measurement::new(Some(MeasuredValue::Flag(u8::from(status))), Operator::Equal)
}

fn measure_string() -> Measurement {
    Measurement::new(None, Operator::Equal)
}

fn measure_correlation_dbl() -> Measurement {
    Measurement::new(None, Operator::Tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::SpecTable;
    use crate::tdr::layout::TableLayout;
    use crate::tdr::row::Row;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn spec(data_type: DataType, nominal: f64) -> TestSpec {
        TestSpec {
            data_type,
            nominal,
            units: "V".to_string(),
            low_limit: 4.9,
            high_limit: 5.1,
        }
    }

    fn record(fields: &[(&str, &str)]) -> Record {
        let row = Row {
            line: 2,
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        };
        Record::from_row(&row, &TableLayout::default())
    }

    fn resolve(record: &Record, raw_name: &str, spec: TestSpec) -> TestResult {
        let table = SpecTable::from_specs([(canonical_name(raw_name).to_string(), spec)]);
        let field = record
            .tests()
            .find(|t| t.raw_name == raw_name)
            .expect("field present");
        TestResult::resolve(record, field, &table).unwrap()
    }

    #[test]
    fn canonical_name_strips_annotation() {
        assert_eq!(canonical_name("Voltage [MEAS]"), "Voltage");
        assert_eq!(canonical_name("Voltage [LIMIT] [2]"), "Voltage");
        assert_eq!(canonical_name("Voltage"), "Voltage");
        // No space before the bracket: not an annotation.
        assert_eq!(canonical_name("Voltage[MEAS]"), "Voltage[MEAS]");
    }

    #[test]
    fn status_is_substring_match() {
        let r = record(&[("A", "PASS"), ("B", "xxPASSxx"), ("C", "FAIL"), ("D", "pass")]);
        let boolean = || spec(DataType::Boolean, 1.0);
        assert!(resolve(&r, "A", boolean()).status());
        assert!(resolve(&r, "B", boolean()).status());
        assert!(!resolve(&r, "C", boolean()).status());
        assert!(!resolve(&r, "D", boolean()).status());
    }

    #[test]
    fn boolean_meas_follows_status() {
        let r = record(&[("Fuse", "PASS"), ("Relay", "FAIL")]);

        let fuse = resolve(&r, "Fuse", spec(DataType::Boolean, 1.0));
        assert_eq!(fuse.meas(), Some(&MeasuredValue::Flag(1)));
        assert_eq!(fuse.operator(), Some(Operator::Equal));

        let relay = resolve(&r, "Relay", spec(DataType::Boolean, 1.0));
        assert_eq!(relay.meas(), Some(&MeasuredValue::Flag(0)));
        assert_eq!(relay.operator(), Some(Operator::Equal));
    }

    #[test]
    fn dbl_uses_sibling_meas_column() {
        let r = record(&[("Voltage [MEAS]", "4.8"), ("Voltage", "FAIL")]);
        let t = resolve(&r, "Voltage", spec(DataType::Dbl, 5.0));
        assert_eq!(t.meas(), Some(&MeasuredValue::Raw("4.8".to_string())));
        assert_eq!(t.operator(), Some(Operator::Tolerance));
    }

    #[test]
    fn dbl_binary_nominal_without_sibling_is_inverted() {
        let r = record(&[("Short", "FAIL")]);

        let zero = resolve(&r, "Short", spec(DataType::Dbl, 0.0));
        assert_eq!(zero.meas(), Some(&MeasuredValue::Flag(1)));
        assert_eq!(zero.operator(), Some(Operator::Equal));

        let one = resolve(&r, "Short", spec(DataType::Dbl, 1.0));
        assert_eq!(one.meas(), Some(&MeasuredValue::Flag(0)));
        assert_eq!(one.operator(), Some(Operator::Equal));
    }

    #[test]
    fn dbl_other_nominal_without_sibling_is_absent() {
        let r = record(&[("Voltage", "FAIL")]);
        let t = resolve(&r, "Voltage", spec(DataType::Dbl, 5.0));
        assert_eq!(t.measurement(), &Measurement::default());
    }

    #[test]
    fn string_and_correlation_values_are_absent() {
        let r = record(&[("Label", "FAIL"), ("Drift", "FAIL")]);

        let label = resolve(&r, "Label", spec(DataType::String, 0.5));
        assert_eq!(label.meas(), None);
        assert_eq!(label.operator(), Some(Operator::Equal));

        let drift = resolve(&r, "Drift", spec(DataType::CorrelationDbl, 0.5));
        assert_eq!(drift.meas(), None);
        assert_eq!(drift.operator(), Some(Operator::Tolerance));
    }

    #[test]
    fn spec_fields_pass_through() {
        let r = record(&[("Voltage", "FAIL")]);
        let t = resolve(&r, "Voltage", spec(DataType::Dbl, 5.0));
        assert_eq!(t.data_type(), DataType::Dbl);
        assert_eq!(t.nominal(), 5.0);
        assert_eq!(t.units(), "V");
        assert_eq!(t.low_limit(), 4.9);
        assert_eq!(t.high_limit(), 5.1);
        assert_eq!(t.raw_name(), "Voltage");
        assert_eq!(t.raw_value(), "FAIL");
    }

    #[test]
    fn unknown_name_is_spec_not_found() {
        let r = record(&[("Current [MEAS]", "1.0")]);
        let field = r.tests().next().unwrap();
        let err = TestResult::resolve(&r, field, &SpecTable::default()).unwrap_err();
        match err {
            TdrError::SpecNotFound { name } => assert_eq!(name, "Current"),
            other => panic!("expected SpecNotFound, got {:?}", other),
        }
    }
}
