//! Clipboard access.
//!
//! The desktop clipboard is reached through the platform's command-line
//! utilities (`pbpaste`/`pbcopy`, `wl-paste`/`wl-copy`, `xclip`, `xsel`).
//! [`MemoryClipboard`] keeps the text in process for tests and dry runs.

use crate::{Error, Result};
use std::fmt;
use std::io::Write;
use std::process::{Command, Stdio};
use std::str::FromStr;
use tracing::debug;

/// Text clipboard.
pub trait Clipboard {
    /// Returns the current clipboard text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Clipboard`] if the clipboard cannot be read.
    fn read_text(&mut self) -> Result<String>;

    /// Replaces the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Clipboard`] if the clipboard cannot be written.
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// A program and its arguments.
///
/// # Examples
///
/// ```
/// use docpost_core::ClipboardCommand;
///
/// let cmd: ClipboardCommand = "xclip -selection clipboard -o".parse().unwrap();
/// assert_eq!(cmd.program(), "xclip");
/// assert_eq!(cmd.args(), ["-selection", "clipboard", "-o"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardCommand {
    program: String,
    args: Vec<String>,
}

impl ClipboardCommand {
    /// Creates a command from a program and its arguments.
    #[must_use]
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(ToString::to_string).collect(),
        }
    }

    /// Returns the program name or path.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the arguments.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for ClipboardCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

impl FromStr for ClipboardCommand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace().map(ToString::to_string);
        let program = parts.next().ok_or_else(|| {
            Error::InvalidArgument("clipboard command cannot be empty".to_string())
        })?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }
}

/// Paste/copy pairs tried by [`CommandClipboard::detect`], in order.
const CANDIDATES: &[(&str, &[&str], &str, &[&str])] = &[
    ("pbpaste", &[], "pbcopy", &[]),
    ("wl-paste", &["--no-newline"], "wl-copy", &[]),
    ("xclip", &["-selection", "clipboard", "-o"], "xclip", &["-selection", "clipboard", "-i"]),
    ("xsel", &["--clipboard", "--output"], "xsel", &["--clipboard", "--input"]),
];

/// Clipboard backed by external paste and copy utilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandClipboard {
    paste: ClipboardCommand,
    copy: ClipboardCommand,
}

impl CommandClipboard {
    /// Creates a clipboard from explicit paste and copy commands.
    #[must_use]
    pub const fn new(paste: ClipboardCommand, copy: ClipboardCommand) -> Self {
        Self { paste, copy }
    }

    /// Picks the first known utility pair installed on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Clipboard`] if none of the utilities is installed.
    pub fn detect() -> Result<Self> {
        for (paste, paste_args, copy, copy_args) in CANDIDATES {
            if which::which(paste).is_ok() && which::which(copy).is_ok() {
                debug!(paste, copy, "clipboard utilities detected");
                return Ok(Self::new(
                    ClipboardCommand::new(*paste, paste_args),
                    ClipboardCommand::new(*copy, copy_args),
                ));
            }
        }
        Err(Error::Clipboard {
            message: "no clipboard utility found (tried pbpaste, wl-paste, xclip, xsel)"
                .to_string(),
            source: None,
        })
    }

    /// Returns the paste command.
    #[must_use]
    pub const fn paste_command(&self) -> &ClipboardCommand {
        &self.paste
    }

    /// Returns the copy command.
    #[must_use]
    pub const fn copy_command(&self) -> &ClipboardCommand {
        &self.copy
    }
}

fn spawn_error(cmd: &ClipboardCommand, source: std::io::Error) -> Error {
    Error::Clipboard {
        message: format!("failed to run '{cmd}'"),
        source: Some(source),
    }
}

fn status_error(cmd: &ClipboardCommand, status: std::process::ExitStatus) -> Error {
    Error::Clipboard {
        message: format!("'{cmd}' exited with {status}"),
        source: None,
    }
}

impl Clipboard for CommandClipboard {
    fn read_text(&mut self) -> Result<String> {
        let output = self
            .paste
            .command()
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| spawn_error(&self.paste, e))?;

        if !output.status.success() {
            return Err(status_error(&self.paste, output.status));
        }

        String::from_utf8(output.stdout).map_err(|e| Error::Clipboard {
            message: format!("clipboard text is not valid UTF-8: {e}"),
            source: None,
        })
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut child = self
            .copy
            .command()
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .map_err(|e| spawn_error(&self.copy, e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| spawn_error(&self.copy, e))?;
        }

        let status = child.wait().map_err(|e| spawn_error(&self.copy, e))?;
        if !status.success() {
            return Err(status_error(&self.copy, status));
        }
        Ok(())
    }
}

/// In-process clipboard.
///
/// # Examples
///
/// ```
/// use docpost_core::{Clipboard, MemoryClipboard};
///
/// let mut clipboard = MemoryClipboard::with_text("a m0");
/// clipboard.write_text("a.m0").unwrap();
/// assert_eq!(clipboard.read_text().unwrap(), "a.m0");
/// assert_eq!(clipboard.writes(), ["a.m0"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    text: String,
    writes: Vec<String>,
}

impl MemoryClipboard {
    /// Creates a clipboard holding `text`.
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            writes: Vec::new(),
        }
    }

    /// Every text written so far, oldest first.
    #[must_use]
    pub fn writes(&self) -> &[String] {
        &self.writes
    }
}

impl Clipboard for MemoryClipboard {
    fn read_text(&mut self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        text.clone_into(&mut self.text);
        self.writes.push(text.to_string());
        Ok(())
    }
}
