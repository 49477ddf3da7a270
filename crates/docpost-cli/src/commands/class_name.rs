//! `class-name` command: delimiter swap on the clipboard contents.

use super::common::print_report;
use anyhow::Result;
use docpost_core::cli::{ExitCode, OutputFormat};
use docpost_core::{Clipboard, ClipboardReport, Direction, convert_clipboard};
use std::io::Write;
use tracing::info;

/// Converts the clipboard text and echoes both sides to `out`.
///
/// Spaces become dots, or dots become spaces in the `KeyToClass` direction.
///
/// # Errors
///
/// Returns an error if the clipboard cannot be read or written, or if
/// writing to `out` fails.
pub fn convert(
    clipboard: &mut impl Clipboard,
    direction: Direction,
    out: &mut impl Write,
) -> Result<ClipboardReport> {
    let report = convert_clipboard(clipboard, direction)?;
    writeln!(out, "Get input from your clipboard: {}", report.input)?;
    writeln!(out, "Put output into your clipboard: {}", report.output)?;
    Ok(report)
}

/// Runs the class-name command against the given clipboard.
///
/// The echo lines are printed only for pretty output; json and text output
/// carry the same information in the report.
pub fn run(
    clipboard: &mut impl Clipboard,
    reverse: bool,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let direction = if reverse {
        Direction::KeyToClass
    } else {
        Direction::ClassToKey
    };
    info!("Converting clipboard ({:?})", direction);

    if output_format == OutputFormat::Pretty {
        convert(clipboard, direction, &mut std::io::stdout().lock())?;
    } else {
        let report = convert_clipboard(clipboard, direction)?;
        print_report(&report, output_format)?;
    }
    Ok(ExitCode::SUCCESS)
}
