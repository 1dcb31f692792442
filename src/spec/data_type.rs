//! Test data types as they appear in the specification.
//!
//! Example: "CORRELATION DBL"  =>  DataType::CorrelationDbl

use crate::error::TdrError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Dbl,
    Boolean,
    String,
    CorrelationDbl,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Dbl => "DBL",
            DataType::Boolean => "BOOLEAN",
            DataType::String => "STRING",
            DataType::CorrelationDbl => "CORRELATION DBL",
        }
    }

    /// Parse the spec's type tag. `test` is only used to attribute the error.
    pub fn parse(test: &str, tag: &str) -> Result<Self, TdrError> {
        match tag {
            "DBL" => Ok(DataType::Dbl),
            "BOOLEAN" => Ok(DataType::Boolean),
            "STRING" => Ok(DataType::String),
            "CORRELATION DBL" => Ok(DataType::CorrelationDbl),
            other => Err(TdrError::UnrecognizedDataType {
                name: test.to_string(),
                data_type: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_known_tags() {
        for dt in [
            DataType::Dbl,
            DataType::Boolean,
            DataType::String,
            DataType::CorrelationDbl,
        ] {
            assert_eq!(DataType::parse("t", dt.as_str()).unwrap(), dt);
        }
    }

    #[test]
    fn unknown_tag_is_loud() {
        let err = DataType::parse("Temp", "dbl").unwrap_err();
        match err {
            TdrError::UnrecognizedDataType { name, data_type } => {
                assert_eq!(name, "Temp");
                assert_eq!(data_type, "dbl");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
