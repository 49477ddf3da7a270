//! `add-js` command: literal marker substitution over a page file.

use super::common::print_report;
use anyhow::Result;
use docpost_core::cli::{ExitCode, OutputFormat};
use docpost_core::{PostProcessConfig, Substitution, add_script_to_file};
use std::path::Path;
use tracing::info;

/// Runs the add-js command.
///
/// Replaces every occurrence of the configured marker in `file` with the
/// configured replacement and writes the file back.
///
/// # Errors
///
/// Returns an error if the marker is empty or the file cannot be read or
/// written.
pub fn run(file: &Path, config: &PostProcessConfig, output_format: OutputFormat) -> Result<ExitCode> {
    info!("Adding script to {}", file.display());

    let substitution = Substitution::new(config.marker.as_str(), config.replacement.as_str())?;
    let report = add_script_to_file(file, &substitution)?;

    print_report(&report, output_format)?;
    Ok(ExitCode::SUCCESS)
}
