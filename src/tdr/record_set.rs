use crate::error::TdrError;
use crate::spec::SpecLookup;
use crate::tdr::layout::TableLayout;
use crate::tdr::parse::load_table;
use crate::tdr::record::Record;
use crate::tdr::row::Table;
use std::path::{Path, PathBuf};

/// A loaded test data file plus the spec its tests are resolved against.
///
/// Not synchronized: `latest_record` replaces the whole table.
#[derive(Debug)]
pub struct RecordSet<S> {
    path: PathBuf,
    layout: TableLayout,
    spec: S,
    rows: Table,
}

impl<S: SpecLookup> RecordSet<S> {
    pub fn load(path: impl Into<PathBuf>, spec: S) -> Result<Self, TdrError> {
        Self::load_with_layout(path, spec, TableLayout::default())
    }

    pub fn load_with_layout(
        path: impl Into<PathBuf>,
        spec: S,
        layout: TableLayout,
    ) -> Result<Self, TdrError> {
        let path = path.into();
        let rows = load_table(&path, &layout)?;
        Ok(Self {
            path,
            layout,
            spec,
            rows,
        })
    }

    /// Re-read the source file. The current table is kept if the read fails.
    pub fn reload(&mut self) -> Result<(), TdrError> {
        self.rows = load_table(&self.path, &self.layout)?;
        Ok(())
    }

    /// All records in table order (not necessarily chronological).
    pub fn records(&self) -> Vec<Record> {
        self.rows
            .iter()
            .map(|row| Record::from_row(row, &self.layout))
            .collect()
    }

    /// Reload, then return the record with the greatest timestamp.
    /// Ties go to the earliest row.
    pub fn latest_record(&mut self) -> Result<Record, TdrError> {
        self.reload()?;
        let row = self
            .rows
            .iter()
            .reduce(|best, row| if row.timestamp > best.timestamp { row } else { best })
            .ok_or_else(|| TdrError::EmptyData {
                path: self.path.clone(),
            })?;
        Ok(Record::from_row(row, &self.layout))
    }

    pub fn spec(&self) -> &S {
        &self.spec
    }

    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
