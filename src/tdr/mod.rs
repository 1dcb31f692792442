//! Test data records: CSV table loading and the record/test model built on it.

pub mod layout;
pub mod parse;
pub mod record;
pub mod record_set;
pub mod row;
pub mod test_result;
pub mod watch;

pub use layout::TableLayout;
pub use parse::load_table;
pub use record::{Record, TestField};
pub use record_set::RecordSet;
pub use row::{Row, Table};
pub use test_result::{MeasuredValue, Measurement, Operator, TestResult};
pub use watch::poll_once;
