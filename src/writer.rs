//! # Output Writer
//!
//! Serializes one values document per (team, environment) under the output
//! root, creating missing directories.
//!
//! Serialization order follows the document's field declaration order, so
//! re-running with unchanged input produces byte-identical files.

use crate::error::ConvertError;
use crate::values::ValuesDocument;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Write one values document to `<output_root>/<team>/<env>.yaml`.
///
/// Returns the written path.
pub fn write_values(
    output_root: &Path,
    team: &str,
    environment: &str,
    document: &ValuesDocument,
) -> Result<PathBuf, ConvertError> {
    let team_dir = output_root.join(team);
    std::fs::create_dir_all(&team_dir).map_err(|source| ConvertError::Write {
        path: team_dir.clone(),
        source,
    })?;

    let yaml = serde_yaml::to_string(document).map_err(|source| ConvertError::Serialize {
        team: team.to_string(),
        environment: environment.to_string(),
        source,
    })?;

    let output_path = team_dir.join(format!("{environment}.yaml"));
    debug!("Writing values document to {}", output_path.display());
    std::fs::write(&output_path, yaml).map_err(|source| ConvertError::Write {
        path: output_path.clone(),
        source,
    })?;

    Ok(output_path)
}
