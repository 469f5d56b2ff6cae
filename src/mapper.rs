//! # Key Mapper
//!
//! Applies the metadata-key mapping table, turning flat `UPPER_SNAKE_CASE`
//! keys into a nested mapping keyed by dotted output paths.
//!
//! Matching is exact: no case folding, no fuzzy matching. Metadata keys
//! absent from the table are dropped with a warning; table entries absent
//! from the metadata contribute nothing (defaulting is the assembler's job).

use crate::config::KeyMapping;
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use tracing::warn;

/// Insert `value` at a dotted path, creating intermediate mappings.
///
/// An intermediate node that exists but is not a mapping is replaced by one,
/// so a later `project.domain` entry wins over an earlier scalar `project`.
pub fn set_nested(target: &mut Mapping, dotted_path: &str, value: Value) {
    let mut parts = dotted_path.split('.').peekable();
    let mut current = target;

    while let Some(part) = parts.next() {
        let key = Value::String(part.to_string());
        if parts.peek().is_none() {
            current.insert(key, value);
            return;
        }

        if !matches!(current.get(&key), Some(Value::Mapping(_))) {
            current.insert(key.clone(), Value::Mapping(Mapping::new()));
        }
        match current.get_mut(&key) {
            Some(Value::Mapping(next)) => current = next,
            _ => unreachable!("intermediate node was just inserted as a mapping"),
        }
    }
}

/// Deep-merge `src` into `dst`. Nested mappings merge recursively; any other
/// value in `src` replaces the value in `dst`.
pub fn merge_into(dst: &mut Mapping, src: Mapping) {
    for (key, value) in src {
        match (dst.get_mut(&key), value) {
            (Some(Value::Mapping(existing)), Value::Mapping(incoming)) => {
                merge_into(existing, incoming);
            }
            (_, value) => {
                dst.insert(key, value);
            }
        }
    }
}

/// Map flat metadata into a nested mapping using the injected table.
///
/// The table is applied in its own order, so when two entries target the
/// same dotted path the later entry wins deterministically regardless of
/// metadata iteration order.
#[must_use]
pub fn map_metadata(metadata: &HashMap<String, String>, table: &KeyMapping) -> Mapping {
    let mut mapped = Mapping::new();

    for (source_key, dotted_path) in table {
        if let Some(value) = metadata.get(source_key) {
            set_nested(&mut mapped, dotted_path, Value::String(value.clone()));
        }
    }

    let mut dropped: Vec<&str> = metadata
        .keys()
        .filter(|key| !table.iter().any(|(source_key, _)| source_key == *key))
        .map(String::as_str)
        .collect();
    dropped.sort_unstable();
    for key in dropped {
        warn!("Dropping unrecognized metadata key '{key}'");
    }

    mapped
}
