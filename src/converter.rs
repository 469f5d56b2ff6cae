//! # Conversion Run
//!
//! Orchestrates one full run: discover teams, convert every (team,
//! environment) unit, and collect per-unit outcomes into a report.
//!
//! Failure isolation: a failing environment never aborts its team's other
//! environments, and a failing team never aborts the run. The only
//! exception is global misconfiguration (an invalid namespace-format
//! template, a missing or empty input root), which aborts before any unit
//! is processed.

use crate::config::ConverterConfig;
use crate::discovery::{discover_team, team_directories, TeamConfig};
use crate::error::ConvertError;
use crate::mapper::map_metadata;
use crate::metadata::read_metadata;
use crate::namespace;
use crate::quota::extract_quota_limits;
use crate::values::assemble;
use crate::writer::write_values;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// One successfully converted unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenUnit {
    pub team: String,
    pub environment: String,
    pub path: PathBuf,
}

/// One failed unit. `environment` is `None` for team-level failures.
#[derive(Debug)]
pub struct UnitFailure {
    pub team: String,
    pub environment: Option<String>,
    pub error: ConvertError,
}

/// Outcome of a full run after every unit has been attempted exactly once.
#[derive(Debug, Default)]
pub struct ConversionReport {
    pub written: Vec<WrittenUnit>,
    pub failures: Vec<UnitFailure>,
}

impl ConversionReport {
    /// True when every unit converted cleanly.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn team_failure(&mut self, team: &str, error: ConvertError) {
        self.failures.push(UnitFailure {
            team: team.to_string(),
            environment: None,
            error,
        });
    }

    fn environment_failure(&mut self, team: &str, environment: &str, error: ConvertError) {
        self.failures.push(UnitFailure {
            team: team.to_string(),
            environment: Some(environment.to_string()),
            error,
        });
    }
}

/// Run a full conversion over every team directory under the input root.
///
/// # Errors
///
/// Returns an error only for global misconfiguration; per-unit failures are
/// reported through the returned `ConversionReport`.
pub fn run(config: &ConverterConfig) -> Result<ConversionReport> {
    // Global checks first: these would fail every unit identically.
    namespace::validate_format(&config.namespace_format)?;
    let team_dirs = team_directories(&config.input_root)?;

    let mut report = ConversionReport::default();

    for team_dir in team_dirs {
        let team_name = team_dir
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();

        let team = match discover_team(&team_dir) {
            Ok(team) => team,
            Err(err) => {
                report.team_failure(&team_name, err);
                continue;
            }
        };

        convert_team(config, &team, &mut report);
    }

    Ok(report)
}

/// Convert every environment of one team, recording outcomes in the report.
fn convert_team(config: &ConverterConfig, team: &TeamConfig, report: &mut ConversionReport) {
    let metadata = match read_metadata(&team.metadata_path) {
        Ok(metadata) => metadata,
        Err(err) => {
            report.team_failure(&team.team, err);
            return;
        }
    };

    if team.environments.is_empty() {
        report.team_failure(&team.team, ConvertError::NoEnvironmentFiles);
        return;
    }

    let mapped = map_metadata(&metadata, &config.key_mapping);

    for environment in &team.environments {
        match convert_environment(config, team, &environment.name, &environment.path, &mapped) {
            Ok(path) => {
                info!("Converted {}/{} -> {}", team.team, environment.name, path.display());
                report.written.push(WrittenUnit {
                    team: team.team.clone(),
                    environment: environment.name.clone(),
                    path,
                });
            }
            Err(err) => {
                error!("Failed {}/{}: {err}", team.team, environment.name);
                report.environment_failure(&team.team, &environment.name, err);
            }
        }
    }
}

/// Convert one (team, environment) unit. Pure function of its inputs: the
/// same metadata, quota file, and configuration always produce the same
/// document bytes.
fn convert_environment(
    config: &ConverterConfig,
    team: &TeamConfig,
    environment: &str,
    quota_path: &Path,
    mapped: &serde_yaml::Mapping,
) -> Result<PathBuf, ConvertError> {
    let content = std::fs::read_to_string(quota_path).map_err(|source| ConvertError::Read {
        path: quota_path.to_path_buf(),
        source,
    })?;
    let document: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|source| ConvertError::Yaml {
            path: quota_path.to_path_buf(),
            source,
        })?;

    let limits = extract_quota_limits(&document)
        .map_err(|_| ConvertError::NoResourceQuota(quota_path.to_path_buf()))?;

    let ns = namespace::resolve(&config.namespace_format, &team.team, environment);
    namespace::validate_namespace(&ns).map_err(|source| ConvertError::InvalidNamespace {
        namespace: ns.clone(),
        source,
    })?;

    let values = assemble(&team.team, &ns, mapped.clone(), &config.key_mapping, &limits);
    write_values(&config.output_root, &team.team, environment, &values)
}

/// Log the end-of-run summary: every unit's outcome, written or failed.
pub fn log_report(report: &ConversionReport) {
    for unit in &report.written {
        info!(
            "OK   {}/{} -> {}",
            unit.team,
            unit.environment,
            unit.path.display()
        );
    }
    for failure in &report.failures {
        match &failure.environment {
            Some(env) => error!("FAIL {}/{}: {}", failure.team, env, failure.error),
            None => error!("FAIL {}: {}", failure.team, failure.error),
        }
    }
    info!(
        "Conversion finished: {} written, {} failed",
        report.written.len(),
        report.failures.len()
    );
}
