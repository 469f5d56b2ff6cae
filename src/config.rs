//! # Converter Configuration
//!
//! Run-level configuration: input and output roots, the namespace-format
//! template, and the key-mapping table.
//!
//! The mapping table is carried as an explicit ordered value rather than a
//! module-wide constant so alternate tables can be injected in tests. Table
//! order is part of the contract: when two entries target the same dotted
//! path, the later entry wins.

use std::path::PathBuf;

/// Fixed name of the per-team metadata file.
pub const METADATA_FILE_NAME: &str = "project.properties";

/// Default namespace-format template.
pub const DEFAULT_NAMESPACE_FORMAT: &str = "{team}-{env}-1";

/// Ordered mapping from flat metadata keys to dotted output paths.
pub type KeyMapping = Vec<(String, String)>;

/// Configuration for one conversion run.
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Root directory containing one subdirectory per team.
    pub input_root: PathBuf,
    /// Root directory receiving `<team>/<env>.yaml` output files.
    pub output_root: PathBuf,
    /// Namespace template with `{team}` and `{env}` placeholders.
    pub namespace_format: String,
    /// Metadata-key to dotted-output-path table, in significance order.
    pub key_mapping: KeyMapping,
}

impl ConverterConfig {
    /// Build a configuration carrying the default key-mapping table.
    #[must_use]
    pub fn new(input_root: PathBuf, output_root: PathBuf, namespace_format: String) -> Self {
        Self {
            input_root,
            output_root,
            namespace_format,
            key_mapping: default_key_mapping(),
        }
    }
}

/// The production mapping from legacy `project.properties` keys to chart
/// values paths. Dotted paths nest under the output document.
#[must_use]
pub fn default_key_mapping() -> KeyMapping {
    [
        ("PROJECT_DOMAIN", "project.domain"),
        ("PROJECT_MANAGER", "project.manager"),
        ("PROJECT_CODE", "project.code"),
        ("PROJECT_COST_CENTER", "project.cost_center"),
        ("CREATED_DATE", "project.create_date"),
        ("CREATED_BY", "project.created_by"),
        ("CMDB_APPLICATION", "project.cmdb_application"),
        ("AD_GROUP", "adgroup"),
        ("REQUEST_ID", "request_id"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}
