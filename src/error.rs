//! # Error Types
//!
//! Typed failures for the conversion pipeline.
//!
//! Per-unit failures (`ConvertError`) are collected into the end-of-run
//! report instead of aborting the run. Global misconfiguration (an invalid
//! namespace-format template, a missing input root) aborts before any unit
//! is processed.

use std::path::PathBuf;
use thiserror::Error;

/// Reasons an environment filename is rejected.
///
/// The two variants are deliberately distinct so callers (and tests) can
/// tell "this is not a quota file at all" apart from "this quota file
/// belongs to a different team".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilenameError {
    /// The filename does not match the `<team>-<env>-quotas.yml` pattern.
    #[error("filename does not match the `<team>-<env>-quotas.yml` pattern")]
    SuffixMismatch,
    /// The filename matches the pattern but its team prefix is not the
    /// enclosing directory's team identifier.
    #[error("team prefix '{found}' does not match team directory '{expected}'")]
    TeamPrefixMismatch { expected: String, found: String },
}

/// Failure extracting quota limits from a parsed environment document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuotaError {
    /// The document contains no object of kind `ResourceQuota`.
    #[error("no ResourceQuota object found in quota document")]
    NoResourceQuota,
}

/// Invalid namespace-format template. Global misconfiguration: every unit
/// would fail identically, so this aborts the run before any is processed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported placeholder '{{{placeholder}}}' in namespace format (only {{team}} and {{env}} are allowed)")]
pub struct TemplateError {
    pub placeholder: String,
}

/// A resolved namespace that is not a valid DNS-1123 label.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NamespaceError {
    #[error("namespace is empty")]
    Empty,
    #[error("namespace is too long ({length} characters, maximum is 63)")]
    TooLong { length: usize },
    #[error("namespace contains invalid characters (only lowercase alphanumerics and '-' are allowed)")]
    InvalidCharacters,
    #[error("namespace must start and end with an alphanumeric character")]
    EdgeHyphen,
}

/// A failure scoped to one team or one (team, environment) unit.
///
/// These never abort the run; the converter records them and continues with
/// the remaining units.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("metadata file not found: {}", .0.display())]
    MissingMetadata(PathBuf),

    #[error("duplicate environment '{environment}' in team '{team}'")]
    DuplicateEnvironment { team: String, environment: String },

    #[error("no environment quota files found")]
    NoEnvironmentFiles,

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("no ResourceQuota object found in {}", .0.display())]
    NoResourceQuota(PathBuf),

    #[error("invalid namespace '{namespace}': {source}")]
    InvalidNamespace {
        namespace: String,
        #[source]
        source: NamespaceError,
    },

    #[error("failed to serialize values for {team}/{environment}: {source}")]
    Serialize {
        team: String,
        environment: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
