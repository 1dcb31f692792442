use chrono::NaiveDateTime;

/// A single record row from the test data file.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// 1-based line in the source file, for diagnostics.
    pub line: u64,
    pub timestamp: NaiveDateTime,
    /// Raw `(column, value)` pairs in header order.
    pub fields: Vec<(String, String)>,
}

impl Row {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }
}

/// Rows in file order.
pub type Table = Vec<Row>;
