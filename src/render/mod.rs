//! Text output: the failure report wire format and record summaries.

pub mod failstring;
pub mod summary;

pub use failstring::render_failure_report;
pub use summary::{render_summary_json, render_summary_text};
