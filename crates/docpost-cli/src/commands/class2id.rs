//! `class2id` command: resolve class keys to element ids.
//!
//! Reads keys such as `t.m0.x8.h5` one per line, finds the `div` whose
//! class is `t m0 x8 h5` in the source page, prints its id and copies it to
//! the clipboard.

use super::common::print_report;
use anyhow::{Context, Result};
use docpost_core::cli::{ExitCode, OutputFormat};
use docpost_core::{ClassLookup, Clipboard, Error, LookupReport};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{info, warn};

/// Prompt printed before each key is read.
pub const PROMPT: &str = "Input ClassName:";

/// Outcome of one lookup session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    /// Keys resolved and copied, in input order
    pub resolved: Vec<LookupReport>,
    /// Keys that matched nothing usable
    pub failed: usize,
}

impl SessionReport {
    /// Exit code for the session: any unresolved key is a not-found failure.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        if self.failed > 0 {
            ExitCode::NOT_FOUND
        } else {
            ExitCode::SUCCESS
        }
    }
}

/// Runs an interactive lookup session.
///
/// Each round prints [`PROMPT`] to `prompts`, reads one line from `input`
/// and resolves it. The session ends at end of input or on an empty line. A
/// key that cannot be resolved is reported on `prompts` and counted in
/// [`SessionReport::failed`]; the clipboard keeps its previous contents.
///
/// With `once` a single key is read and a failed lookup is returned as the
/// error.
///
/// # Errors
///
/// Returns an error if reading `input`, writing `prompts` or writing the
/// clipboard fails, or, with `once`, if the key cannot be resolved.
pub fn run_session<R: BufRead, W: Write>(
    lookup: &ClassLookup,
    clipboard: &mut impl Clipboard,
    mut input: R,
    mut prompts: W,
    once: bool,
) -> Result<SessionReport> {
    let mut report = SessionReport::default();
    let mut line = String::new();

    loop {
        writeln!(prompts, "{PROMPT}")?;
        prompts.flush()?;

        line.clear();
        if input.read_line(&mut line).context("failed to read class key")? == 0 {
            break;
        }
        let key = line.trim();
        if key.is_empty() {
            break;
        }

        match lookup.copy_id(key, clipboard) {
            Ok(found) => {
                writeln!(prompts, "Output ID: {}", found.id)?;
                report.resolved.push(found);
            }
            Err(err) if !once && err.is_not_found() => {
                warn!(%key, "lookup failed: {err}");
                writeln!(prompts, "No ID: {err}")?;
                report.failed += 1;
            }
            Err(err) => return Err(err.into()),
        }

        if once {
            break;
        }
    }

    Ok(report)
}

/// Runs a session and reports it.
///
/// Machine formats print the [`SessionReport`] to stdout once the session
/// ends; `prompts` should then point elsewhere. The exit code is
/// [`ExitCode::NOT_FOUND`] when any key stayed unresolved.
pub fn run_with<R: BufRead, W: Write>(
    lookup: &ClassLookup,
    clipboard: &mut impl Clipboard,
    input: R,
    prompts: W,
    once: bool,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let report = run_session(lookup, clipboard, input, prompts, once)?;

    if output_format != OutputFormat::Pretty {
        print_report(&report, output_format)?;
    }
    if report.failed > 0 {
        warn!(failed = report.failed, "some class keys were not resolved");
    }
    Ok(report.exit_code())
}

/// Runs the class2id command on stdin.
///
/// `source` is the page to search; a missing source is an invalid argument.
/// Prompts go to stdout for pretty output and to stderr otherwise, so json
/// and text output stay parseable.
pub fn run(
    source: Option<&Path>,
    clipboard: &mut impl Clipboard,
    once: bool,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let source = source.ok_or_else(|| {
        Error::InvalidArgument(
            "no source page given (use --source or set lookup.source in the config)".to_string(),
        )
    })?;
    info!("Looking up class keys in {}", source.display());

    let lookup = ClassLookup::open(source)?;
    let input = std::io::stdin().lock();
    if output_format == OutputFormat::Pretty {
        run_with(&lookup, clipboard, input, std::io::stdout().lock(), once, output_format)
    } else {
        run_with(&lookup, clipboard, input, std::io::stderr().lock(), once, output_format)
    }
}
