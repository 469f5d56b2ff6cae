//! # Namespace Resolver
//!
//! Synthesizes the namespace identifier from a configurable template and
//! validates the result as a Kubernetes namespace name.
//!
//! Template validation runs once, before any unit is processed: an unknown
//! placeholder would fail every single output identically, so failing fast
//! beats producing garbage for every team.

use crate::error::{NamespaceError, TemplateError};
use regex::Regex;
use std::sync::LazyLock;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]*)\}").expect("placeholder regex must compile"));

/// Maximum length of a DNS-1123 label.
const NAMESPACE_MAX_LENGTH: usize = 63;

/// Check that a namespace-format template uses only the supported
/// `{team}` and `{env}` placeholders.
pub fn validate_format(template: &str) -> Result<(), TemplateError> {
    for capture in PLACEHOLDER_RE.captures_iter(template) {
        let placeholder = &capture[1];
        if placeholder != "team" && placeholder != "env" {
            return Err(TemplateError {
                placeholder: placeholder.to_string(),
            });
        }
    }
    Ok(())
}

/// Substitute `{team}` and `{env}` into a validated template.
///
/// Pure substitution: the same (team, env, template) triple always yields
/// the same string.
#[must_use]
pub fn resolve(template: &str, team: &str, env: &str) -> String {
    template.replace("{team}", team).replace("{env}", env)
}

/// Validate a resolved namespace as a DNS-1123 label: at most 63 characters,
/// lowercase alphanumerics and `-` only, alphanumeric at both ends.
pub fn validate_namespace(namespace: &str) -> Result<(), NamespaceError> {
    if namespace.is_empty() {
        return Err(NamespaceError::Empty);
    }
    if namespace.len() > NAMESPACE_MAX_LENGTH {
        return Err(NamespaceError::TooLong {
            length: namespace.len(),
        });
    }
    if !namespace
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(NamespaceError::InvalidCharacters);
    }
    if namespace.starts_with('-') || namespace.ends_with('-') {
        return Err(NamespaceError::EdgeHyphen);
    }
    Ok(())
}
