//! Error taxonomy for table loading, spec resolution and measurement derivation.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TdrError {
    /// The test data file could not be opened or read.
    #[error("read test data file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV (bad header, row with the wrong number of fields, bad UTF-8).
    #[error("parse test data file {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("test data file {} has no column {column:?}", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("bad timestamp at {}:{line}: {value:?} does not match {format:?}", .path.display())]
    DateFormat {
        path: PathBuf,
        line: u64,
        value: String,
        format: String,
    },

    #[error("test data file {} contains no records", .path.display())]
    EmptyData { path: PathBuf },

    #[error("test {name:?} is not defined in the test specification")]
    SpecNotFound { name: String },

    #[error("test {name:?} has unrecognized data type {data_type:?}")]
    UnrecognizedDataType { name: String, data_type: String },

    /// The spec file itself is unreadable or inconsistent.
    #[error("spec file {}: {reason}", .path.display())]
    SpecFile { path: PathBuf, reason: String },
}
