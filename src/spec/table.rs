//! Spec file (spec.json) provides a flat list of test specifications.
//!
//! JSON shape:
//! {
//!   "tests": [
//!     {
//!       "name": "Voltage",        // canonical test name (no bracketed suffix)
//!       "data_type": "DBL",       // DBL | BOOLEAN | STRING | CORRELATION DBL
//!       "nominal": 5.0,
//!       "units": "V",             // optional, defaults to ""
//!       "low_limit": 4.9,
//!       "high_limit": 5.1
//!     },
//!     ...
//!   ]
//! }
//!
//! We validate names are unique and data types are known, then index by name.

use crate::error::TdrError;
use crate::spec::{DataType, SpecLookup, TestSpec};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct SpecFile {
    #[serde(default)]
    pub tests: Vec<RawTestSpec>,
}

/// Raw test shape as it appears in spec.json.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTestSpec {
    pub name: String,
    pub data_type: String,
    pub nominal: f64,

    #[serde(default)]
    pub units: String,

    pub low_limit: f64,
    pub high_limit: f64,
}

/// Validated specs indexed by canonical test name.
#[derive(Debug, Clone, Default)]
pub struct SpecTable {
    tests: BTreeMap<String, TestSpec>,
}

impl SpecFile {
    /// Ensure unique names and known data types, then index by name.
    pub fn validate_and_build(&self, path: &Path) -> Result<SpecTable, TdrError> {
        let mut tests = BTreeMap::new();
        for raw in &self.tests {
            if tests.contains_key(&raw.name) {
                return Err(TdrError::SpecFile {
                    path: path.to_path_buf(),
                    reason: format!("duplicate test name {:?}", raw.name),
                });
            }

            let spec = TestSpec {
                data_type: DataType::parse(&raw.name, &raw.data_type)?,
                nominal: raw.nominal,
                units: raw.units.clone(),
                low_limit: raw.low_limit,
                high_limit: raw.high_limit,
            };
            tests.insert(raw.name.clone(), spec);
        }

        if tests.is_empty() {
            return Err(TdrError::SpecFile {
                path: path.to_path_buf(),
                reason: "contained no tests".to_string(),
            });
        }

        Ok(SpecTable { tests })
    }
}

impl SpecTable {
    /// Read and validate a spec.json file.
    pub fn load(path: &Path) -> Result<Self, TdrError> {
        let text = fs::read_to_string(path).map_err(|e| TdrError::SpecFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let file: SpecFile = serde_json::from_str(&text).map_err(|e| TdrError::SpecFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let table = file.validate_and_build(path)?;
        tracing::debug!(path = %path.display(), tests = table.len(), "loaded test spec");
        Ok(table)
    }

    pub fn from_specs<I>(specs: I) -> Self
    where
        I: IntoIterator<Item = (String, TestSpec)>,
    {
        Self {
            tests: specs.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

impl SpecLookup for SpecTable {
    fn get(&self, name: &str) -> Option<&TestSpec> {
        self.tests.get(name)
    }
}
