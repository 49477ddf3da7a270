//! Common utilities shared across CLI commands.

use anyhow::{Context, Result};
use docpost_core::cli::{ExitCode, OutputFormat};
use serde::Serialize;

/// Maps an error returned by a command to the process exit code.
///
/// Library errors keep their own classification; anything else is a
/// general failure.
///
/// # Examples
///
/// ```
/// use docpost_cli::commands::common::exit_code_for;
/// use docpost_core::{Error, cli::ExitCode};
///
/// let err = anyhow::Error::new(Error::ContainerNotFound { id: "page-container".into() });
/// assert_eq!(exit_code_for(&err), ExitCode::NOT_FOUND);
///
/// let other = anyhow::anyhow!("formatting failed");
/// assert_eq!(exit_code_for(&other), ExitCode::ERROR);
/// ```
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<docpost_core::Error>())
        .map_or(ExitCode::ERROR, ExitCode::for_error)
}

/// Renders `report` in `format` and prints it to stdout.
pub fn print_report<T: Serialize>(report: &T, format: OutputFormat) -> Result<()> {
    let formatted =
        crate::formatters::format_output(report, format).context("failed to format output")?;
    println!("{formatted}");
    Ok(())
}
