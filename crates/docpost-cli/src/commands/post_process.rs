//! `post-process` command: positional ids plus script injection.

use super::common::print_report;
use anyhow::Result;
use docpost_core::cli::{ExitCode, OutputFormat};
use docpost_core::{PostProcessConfig, ScriptMode, post_process_file};
use std::path::Path;
use tracing::info;

/// Runs the post-process command.
///
/// With `replace_scripts` every existing script is removed before the body
/// and head scripts are added; otherwise only the body script is appended.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written, or if the page
/// structure is not what the transform expects. The file is left unchanged
/// in the latter case.
pub fn run(
    file: &Path,
    replace_scripts: bool,
    config: &PostProcessConfig,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let mode = if replace_scripts {
        ScriptMode::ReplaceAll
    } else {
        ScriptMode::Append
    };
    info!("Post-processing {} ({:?})", file.display(), mode);

    let report = post_process_file(file, config, mode)?;

    print_report(&report, output_format)?;
    Ok(ExitCode::SUCCESS)
}
