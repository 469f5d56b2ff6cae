//! # Values Assembler
//!
//! Combines mapped metadata, extracted quota limits, and the resolved
//! namespace into the final values document.
//!
//! Every field the downstream chart requires is always present: the
//! assembler seeds an empty-string leaf for every dotted path in the
//! injected mapping table, then overlays the mapped metadata, so a team
//! with a sparse properties file still produces a fully-populated document.

use crate::config::KeyMapping;
use crate::mapper::{merge_into, set_nested};
use crate::quota::QuotaLimits;
use serde::Serialize;
use serde_yaml::{Mapping, Value};

/// The `resourceQuota` section of the values document.
///
/// `enabled` is true exactly when at least one limit field is non-empty.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResourceQuotaValues {
    pub enabled: bool,
    pub cpu: String,
    pub memory: String,
    pub storage: String,
    pub pods: String,
}

impl From<&QuotaLimits> for ResourceQuotaValues {
    fn from(limits: &QuotaLimits) -> Self {
        Self {
            enabled: !limits.is_empty(),
            cpu: limits.cpu.clone().unwrap_or_default(),
            memory: limits.memory.clone().unwrap_or_default(),
            storage: limits.storage.clone().unwrap_or_default(),
            pods: limits.pods.clone().unwrap_or_default(),
        }
    }
}

/// The complete per-(team, environment) values document.
///
/// Field declaration order is the serialization order the downstream chart
/// expects; it is deliberate, not alphabetical.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ValuesDocument {
    pub team: String,
    pub namespace: String,
    pub project: Mapping,
    pub adgroup: String,
    pub request_id: String,
    pub repositories: Vec<Value>,
    pub applications: Vec<Value>,
    #[serde(rename = "resourceQuota")]
    pub resource_quota: ResourceQuotaValues,
}

/// Assemble the final document from the per-stage outputs.
///
/// `mapped` is the key mapper's nested mapping; `table` is the same mapping
/// table, used here to seed defaults so that every declared output path is
/// present even when the source metadata omits it.
#[must_use]
pub fn assemble(
    team: &str,
    namespace: &str,
    mapped: Mapping,
    table: &KeyMapping,
    limits: &QuotaLimits,
) -> ValuesDocument {
    let mut merged = Mapping::new();
    for (_, dotted_path) in table {
        set_nested(&mut merged, dotted_path, Value::String(String::new()));
    }
    merge_into(&mut merged, mapped);

    let project = match merged.remove("project") {
        Some(Value::Mapping(project)) => project,
        _ => Mapping::new(),
    };

    ValuesDocument {
        team: team.to_string(),
        namespace: namespace.to_string(),
        project,
        adgroup: string_field(&mut merged, "adgroup"),
        request_id: string_field(&mut merged, "request_id"),
        repositories: Vec::new(),
        applications: Vec::new(),
        resource_quota: ResourceQuotaValues::from(limits),
    }
}

fn string_field(merged: &mut Mapping, key: &str) -> String {
    match merged.remove(key) {
        Some(Value::String(value)) => value,
        _ => String::new(),
    }
}
