//! Test data record (TDR) handling for ATE CSV exports.
//!
//! Pipeline: `tdr::parse` loads the table, `tdr::Record` derives each run's
//! status, `tdr::TestResult` joins a test column with its `spec` entry, and
//! `render::failstring` emits the failure report.

pub mod error;
pub mod logging;
pub mod model;
pub mod render;
pub mod spec;
pub mod tdr;

pub use error::TdrError;
