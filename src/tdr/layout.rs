//! Column names and timestamp format of the ATE test data export.

pub const TIMESTAMP_COLUMN: &str = "[TIME] TIMESTAMP / RECORD ID";
pub const SERIAL_COLUMN: &str = "[CONFIG] UUT SERIAL NUMBER";
pub const RESULT_COLUMN: &str = "[RESULT] TEST P/F STATUS";

/// `YYYY-MM-DD_HH:MM:SS.ffffff`. The dot and all six fraction digits are required.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H:%M:%S.%6f";

/// Which columns carry record metadata rather than test outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    pub timestamp_column: String,
    pub serial_column: String,
    pub result_column: String,
    pub timestamp_format: String,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            timestamp_column: TIMESTAMP_COLUMN.to_string(),
            serial_column: SERIAL_COLUMN.to_string(),
            result_column: RESULT_COLUMN.to_string(),
            timestamp_format: TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl TableLayout {
    /// True for columns consumed into record metadata (never yielded as tests).
    pub fn is_metadata(&self, column: &str) -> bool {
        column == self.timestamp_column
            || column == self.serial_column
            || column == self.result_column
    }
}
