//! # Metadata Parser
//!
//! Parses the flat `KEY=VALUE` metadata file (`project.properties`) into a
//! string map.
//!
//! Blank lines and `#`-comment lines are ignored. A line without an `=`
//! separator is skipped with a warning rather than failing the file. When a
//! key appears more than once, the last occurrence wins.

use crate::error::ConvertError;
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// Parse `KEY=VALUE` lines into a map, trimming keys and values.
#[must_use]
pub fn parse_metadata(content: &str) -> HashMap<String, String> {
    let mut properties = HashMap::new();

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();

        // Skip comments and empty lines
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            properties.insert(key.trim().to_string(), value.trim().to_string());
        } else {
            warn!("Skipping malformed metadata line {}: '{line}'", index + 1);
        }
    }

    properties
}

/// Read and parse a metadata file from disk.
///
/// A missing file is reported as `ConvertError::MissingMetadata` so the
/// converter can record it as a team-level failure.
pub fn read_metadata(path: &Path) -> Result<HashMap<String, String>, ConvertError> {
    if !path.exists() {
        return Err(ConvertError::MissingMetadata(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parse_metadata(&content))
}
