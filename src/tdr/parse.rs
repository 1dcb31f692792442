use crate::error::TdrError;
use crate::tdr::layout::TableLayout;
use crate::tdr::row::{Row, Table};
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Parse an ATE test data CSV into rows.
///
/// Expected shape (comma-separated, header row first):
/// [TIME] TIMESTAMP / RECORD ID,[CONFIG] UUT SERIAL NUMBER,[RESULT] TEST P/F STATUS,Voltage [MEAS],Voltage
///
/// Example row:
/// 2024-01-01_10:00:00.000000,SN123,FAIL,4.8,FAIL
///
/// Every row must carry a timestamp matching `layout.timestamp_format`;
/// one bad value fails the whole load.
pub fn load_table(path: &Path, layout: &TableLayout) -> Result<Table, TdrError> {
    let file = File::open(path).map_err(|source| TdrError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let csv_err = |source: csv::Error| TdrError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let ts_idx = headers
        .iter()
        .position(|h| *h == layout.timestamp_column)
        .ok_or_else(|| TdrError::MissingColumn {
            path: path.to_path_buf(),
            column: layout.timestamp_column.clone(),
        })?;

    let mut out: Table = Table::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(csv_err)?;
        // Header is line 1.
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(idx as u64 + 2);

        let raw_ts = record.get(ts_idx).unwrap_or_default();
        let timestamp = NaiveDateTime::parse_from_str(raw_ts, &layout.timestamp_format)
            .map_err(|_| TdrError::DateFormat {
                path: path.to_path_buf(),
                line,
                value: raw_ts.to_string(),
                format: layout.timestamp_format.clone(),
            })?;

        let fields = headers
            .iter()
            .zip(record.iter())
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect();

        out.push(Row {
            line,
            timestamp,
            fields,
        });
    }

    tracing::debug!(path = %path.display(), rows = out.len(), "loaded test data table");
    Ok(out)
}
