//! Spec layer: test specification types and the lookup used to resolve them.
//!
//! This module is intentionally separate from table parsing and rendering.
//! It owns:
//! - DataType (how a test's measurement is derived)
//! - TestSpec (nominal value, limits, units)
//! - SpecLookup (name -> TestSpec) and the JSON-backed SpecTable

pub mod data_type;
pub mod table;

pub use data_type::DataType;
pub use table::{SpecFile, SpecTable};

use crate::error::TdrError;
use std::collections::BTreeMap;

/// Governing reference data for one named test.
#[derive(Debug, Clone, PartialEq)]
pub struct TestSpec {
    pub data_type: DataType,
    pub nominal: f64,
    pub units: String,
    pub low_limit: f64,
    pub high_limit: f64,
}

/// Maps a canonical test name to its specification.
pub trait SpecLookup {
    fn get(&self, name: &str) -> Option<&TestSpec>;

    /// Like `get`, but an unknown name is an error attributed to that name.
    fn lookup(&self, name: &str) -> Result<&TestSpec, TdrError> {
        self.get(name).ok_or_else(|| TdrError::SpecNotFound {
            name: name.to_string(),
        })
    }
}

impl SpecLookup for BTreeMap<String, TestSpec> {
    fn get(&self, name: &str) -> Option<&TestSpec> {
        BTreeMap::get(self, name)
    }
}

impl<T: SpecLookup + ?Sized> SpecLookup for &T {
    fn get(&self, name: &str) -> Option<&TestSpec> {
        (**self).get(name)
    }
}
