//! # Quota Extractor
//!
//! Locates the `ResourceQuota` object inside a parsed environment document
//! and extracts its hard-limit fields.
//!
//! Legacy quota files come in three shapes: an OpenShift-Template-style
//! wrapper carrying an `objects` list, a bare list of objects, or a single
//! bare object. `DocumentShape` names the shape once so the scan does not
//! re-branch on structure at every call site.

use crate::error::QuotaError;
use serde_yaml::{Sequence, Value};

/// A parsed environment document, classified by structure.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentShape<'a> {
    /// Wrapper mapping exposing an `objects` list of embedded objects.
    Wrapper(&'a Sequence),
    /// Bare top-level list of objects.
    List(&'a Sequence),
    /// Single bare object.
    Single(&'a Value),
}

impl<'a> DocumentShape<'a> {
    /// Classify a parsed document.
    #[must_use]
    pub fn classify(document: &'a Value) -> Self {
        if let Value::Mapping(mapping) = document {
            if let Some(Value::Sequence(objects)) = mapping.get("objects") {
                return Self::Wrapper(objects);
            }
        }
        if let Value::Sequence(objects) = document {
            return Self::List(objects);
        }
        Self::Single(document)
    }

    /// The flat sequence of candidate objects, regardless of shape.
    pub fn candidates(&self) -> impl Iterator<Item = &'a Value> + '_ {
        match self {
            Self::Wrapper(objects) | Self::List(objects) => Candidates::Many(objects.iter()),
            Self::Single(object) => Candidates::One(std::iter::once(*object)),
        }
    }
}

enum Candidates<'a> {
    Many(std::slice::Iter<'a, Value>),
    One(std::iter::Once<&'a Value>),
}

impl<'a> Iterator for Candidates<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Many(iter) => iter.next(),
            Self::One(iter) => iter.next(),
        }
    }
}

/// Hard-limit values pulled from a `ResourceQuota` object.
///
/// Unit suffixes are preserved verbatim; no normalization or conversion is
/// performed. Fields the source does not set are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuotaLimits {
    pub cpu: Option<String>,
    pub memory: Option<String>,
    pub storage: Option<String>,
    pub pods: Option<String>,
}

impl QuotaLimits {
    /// True when no limit field carries a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cpu.is_none() && self.memory.is_none() && self.storage.is_none() && self.pods.is_none()
    }
}

/// Extract quota limits from a parsed environment document.
///
/// Scans the candidate objects for the first one whose `kind` is exactly
/// `ResourceQuota`; objects of any other kind (`LimitRange` among them) are
/// ignored. Of the matched object's `spec.hard` keys only `cpu`, `memory`,
/// `storage` (or `ephemeral-storage`), and `pods` are read; the rest of the
/// hard-limit schema is intentionally not carried into the output.
pub fn extract_quota_limits(document: &Value) -> Result<QuotaLimits, QuotaError> {
    let shape = DocumentShape::classify(document);

    let quota_object = shape
        .candidates()
        .find(|candidate| {
            matches!(
                candidate.get("kind"),
                Some(Value::String(kind)) if kind == "ResourceQuota"
            )
        })
        .ok_or(QuotaError::NoResourceQuota)?;

    let hard = quota_object.get("spec").and_then(|spec| spec.get("hard"));

    Ok(QuotaLimits {
        cpu: hard_limit(hard, "cpu"),
        memory: hard_limit(hard, "memory"),
        storage: hard_limit(hard, "storage").or_else(|| hard_limit(hard, "ephemeral-storage")),
        pods: hard_limit(hard, "pods"),
    })
}

/// Read one hard-limit value as a string, preserving the source spelling.
/// Numeric scalars are rendered to their string form (`pods: 50` → `"50"`).
fn hard_limit(hard: Option<&Value>, key: &str) -> Option<String> {
    match hard?.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
