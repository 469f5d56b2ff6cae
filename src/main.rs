//! # Values Converter
//!
//! Converts per-team legacy configuration into chart values documents.
//!
//! For every team directory under the input root this binary:
//!
//! 1. **Parses metadata** - Reads the flat `project.properties` file
//! 2. **Maps keys** - Applies the metadata-key mapping table into the nested values schema
//! 3. **Extracts quotas** - Pulls `ResourceQuota` hard limits from each environment's quota YAML
//! 4. **Resolves namespaces** - Substitutes the configurable `{team}`/`{env}` template
//! 5. **Writes values** - Emits one `<output-root>/<team>/<env>.yaml` document per environment
//!
//! Per-unit failures are collected and reported at the end of the run; the
//! process exits non-zero when any unit failed, and with status 2 for global
//! misconfiguration.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};

use values_converter::cli::Cli;
use values_converter::config::ConverterConfig;
use values_converter::converter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "values_converter=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = ConverterConfig::new(cli.input_root, cli.output_root, cli.namespace_format);

    info!(
        "Starting conversion: {} -> {}",
        config.input_root.display(),
        config.output_root.display()
    );

    let report = match converter::run(&config) {
        Ok(report) => report,
        Err(err) => {
            error!("Conversion aborted: {err:#}");
            return ExitCode::from(2);
        }
    };

    converter::log_report(&report);

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
