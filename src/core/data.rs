//! RON data file helpers.

use serde::de::DeserializeOwned;
use std::fs;

use super::error::DataLoadError;

/// Parse RON text, attributing errors to `path`.
pub fn parse_ron<T: DeserializeOwned>(contents: &str, path: &str) -> Result<T, DataLoadError> {
    ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
        path: path.to_string(),
        details: e.to_string(),
    })
}

/// Read and parse a RON file.
pub fn load_ron<T: DeserializeOwned>(path: &str) -> Result<T, DataLoadError> {
    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: path.to_string(),
        details: e.to_string(),
    })?;
    parse_ron(&contents, path)
}
