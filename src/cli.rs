//! # Command-Line Interface
//!
//! Arguments for the converter binary: where to read team directories,
//! where to write values documents, and how to format namespaces.

use clap::Parser;
use std::path::PathBuf;

/// Convert legacy team configuration into chart values documents.
///
/// Each team directory under the input root holds a `project.properties`
/// file and one or more `<team>-<env>-quotas.yml` files; every environment
/// yields one `<output-root>/<team>/<env>.yaml` values document.
#[derive(Parser, Debug)]
#[command(name = "values-converter", version)]
pub struct Cli {
    /// Root directory containing one subdirectory per team
    #[arg(long, default_value = "input")]
    pub input_root: PathBuf,

    /// Root directory receiving the generated values documents
    #[arg(long, default_value = "output")]
    pub output_root: PathBuf,

    /// Namespace format; supports the {team} and {env} placeholders
    #[arg(long, default_value = "{team}-{env}-1")]
    pub namespace_format: String,
}
