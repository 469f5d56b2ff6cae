//! Values Converter Library
//!
//! Transforms per-team legacy configuration (a flat `project.properties`
//! file plus per-environment Kubernetes quota YAML) into normalized chart
//! values documents. Tests live in the module files; a full end-to-end run
//! is exercised in `tests/convert_integration.rs`.

pub mod cli;
pub mod config;
pub mod converter;
pub mod discovery;
pub mod error;
pub mod mapper;
pub mod metadata;
pub mod namespace;
pub mod quota;
pub mod values;
pub mod writer;
