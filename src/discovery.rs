//! # Input Discovery
//!
//! Walks the input root, identifies team directories, and resolves each
//! team's metadata file and environment quota files.
//!
//! Environment filenames follow `<team>-<env>-quotas.yml` (or `.yaml`). The
//! filename parser reports two distinct rejections: the name does not match
//! the quota-file pattern at all, or it matches but carries a different
//! team's prefix. Both are skipped with a warning; neither fails the team.

use crate::config::METADATA_FILE_NAME;
use crate::error::{ConvertError, FilenameError};
use anyhow::Result;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, warn};
use walkdir::WalkDir;

static QUOTA_FILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<team>.+)-(?P<env>[^-]+)-quotas\.ya?ml$").expect("quota file regex must compile")
});

/// One environment quota file discovered for a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentFile {
    /// Environment name captured from the filename.
    pub name: String,
    pub path: PathBuf,
}

/// Everything discovered for one team directory.
///
/// Built fresh each run and never mutated afterwards. The team identifier is
/// the directory name and is reused verbatim across every environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamConfig {
    pub team: String,
    pub metadata_path: PathBuf,
    pub environments: Vec<EnvironmentFile>,
}

/// Parse an environment filename against the expected team identifier.
///
/// The environment name is the final hyphen-delimited segment before
/// `-quotas`, so a team name containing hyphens (`team-a`) is unambiguous.
pub fn parse_environment_name(team: &str, file_name: &str) -> Result<String, FilenameError> {
    let captures = QUOTA_FILE_RE
        .captures(file_name)
        .ok_or(FilenameError::SuffixMismatch)?;

    let found_team = &captures["team"];
    if found_team != team {
        return Err(FilenameError::TeamPrefixMismatch {
            expected: team.to_string(),
            found: found_team.to_string(),
        });
    }

    Ok(captures["env"].to_string())
}

/// List the team directories directly under the input root, sorted by name.
///
/// A missing input root or an input root without any team directory is a
/// global error: there is nothing to convert.
pub fn team_directories(input_root: &Path) -> Result<Vec<PathBuf>> {
    if !input_root.exists() {
        anyhow::bail!("input root not found: {}", input_root.display());
    }

    let mut directories: Vec<PathBuf> = WalkDir::new(input_root)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| entry.path().to_path_buf())
        .collect();
    directories.sort();

    if directories.is_empty() {
        anyhow::bail!("no team directories under {}", input_root.display());
    }

    Ok(directories)
}

/// Discover the metadata file and environment files of one team directory.
///
/// Files with unrecognized names are skipped with a warning. A duplicate
/// environment name (`.yml` and `.yaml` variants of the same environment)
/// is fatal for the team.
pub fn discover_team(team_dir: &Path) -> Result<TeamConfig, ConvertError> {
    let team = team_dir
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string();

    let mut file_names: Vec<String> = std::fs::read_dir(team_dir)
        .map_err(|source| ConvertError::Read {
            path: team_dir.to_path_buf(),
            source,
        })?
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    file_names.sort();

    let mut environments: Vec<EnvironmentFile> = Vec::new();
    for file_name in file_names {
        if file_name == METADATA_FILE_NAME {
            continue;
        }
        match parse_environment_name(&team, &file_name) {
            Ok(env) => {
                if environments.iter().any(|existing| existing.name == env) {
                    return Err(ConvertError::DuplicateEnvironment {
                        team,
                        environment: env,
                    });
                }
                environments.push(EnvironmentFile {
                    name: env,
                    path: team_dir.join(&file_name),
                });
            }
            Err(FilenameError::TeamPrefixMismatch { found, .. }) => {
                warn!(
                    "Skipping quota file '{file_name}' in team '{team}': \
                     it belongs to team '{found}'"
                );
            }
            Err(FilenameError::SuffixMismatch) => {
                // Any YAML file here was probably meant to be a quota file.
                if Path::new(&file_name)
                    .extension()
                    .is_some_and(|ext| ext == "yml" || ext == "yaml")
                {
                    warn!("Skipping unrecognized quota filename '{file_name}' in team '{team}'");
                } else {
                    debug!("Ignoring non-quota file '{file_name}' in team '{team}'");
                }
            }
        }
    }

    Ok(TeamConfig {
        metadata_path: team_dir.join(METADATA_FILE_NAME),
        team,
        environments,
    })
}
