//! RON data file loading shared by every config resource.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::error::DataLoadError;

/// Parse RON text. `path` is only used for error reporting.
pub fn parse_ron<T: DeserializeOwned>(path: &str, contents: &str) -> Result<T, DataLoadError> {
    ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
        path: path.to_string(),
        details: e.to_string(),
    })
}

/// Read and parse a RON file.
pub fn load_ron<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, DataLoadError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound(display.clone()),
        _ => DataLoadError::ReadError {
            path: display.clone(),
            details: e.to_string(),
        },
    })?;

    parse_ron(&display, &contents)
}

/// Load a RON file, falling back to `T::default()` when it is missing or broken.
pub fn load_or_default<T: DeserializeOwned + Default>(path: impl AsRef<Path>) -> T {
    let path = path.as_ref();
    match load_ron(path) {
        Ok(value) => {
            info!("Loaded {}", path.display());
            value
        }
        Err(e @ DataLoadError::ParseError { .. }) => {
            error!("{}. Using defaults.", e);
            T::default()
        }
        Err(e) => {
            warn!("{}. Using defaults.", e);
            T::default()
        }
    }
}
