//! Literal marker substitution over whole files.
//!
//! Every exact occurrence of the marker is replaced; there are no regex or
//! escaping semantics. The replacement keeps the marker text at its end, so
//! running the substitution twice inserts the script twice.

use crate::config::{DEFAULT_MARKER, DEFAULT_REPLACEMENT};
use crate::{Error, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A marker and the text it is replaced with.
///
/// # Examples
///
/// ```
/// use docpost_core::Substitution;
///
/// let sub = Substitution::default();
/// let (out, count) = sub.apply("<body>hi</body>");
/// assert_eq!(out, r#"<body>hi<script src="highlight.js"></script></body>"#);
/// assert_eq!(count, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    marker: String,
    replacement: String,
}

impl Substitution {
    /// Creates a substitution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `marker` is empty.
    pub fn new(marker: impl Into<String>, replacement: impl Into<String>) -> Result<Self> {
        let marker = marker.into();
        if marker.is_empty() {
            return Err(Error::InvalidArgument(
                "substitution marker cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            marker,
            replacement: replacement.into(),
        })
    }

    /// Returns the marker.
    #[must_use]
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Returns the replacement.
    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Replaces every occurrence of the marker in `text`.
    ///
    /// Returns the new text and the number of replaced occurrences.
    #[must_use]
    pub fn apply(&self, text: &str) -> (String, usize) {
        substitute(text, &self.marker, &self.replacement)
    }
}

impl Default for Substitution {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            replacement: DEFAULT_REPLACEMENT.to_string(),
        }
    }
}

/// Outcome of a file substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubstitutionReport {
    /// File that was rewritten
    pub file: PathBuf,
    /// Number of marker occurrences replaced
    pub replacements: usize,
}

/// Replaces every non-overlapping occurrence of `marker` with `replacement`.
///
/// `marker` must not be empty.
#[must_use]
pub fn substitute(text: &str, marker: &str, replacement: &str) -> (String, usize) {
    let count = text.matches(marker).count();
    if count == 0 {
        return (text.to_string(), 0);
    }
    (text.replace(marker, replacement), count)
}

/// Applies `substitution` to the file at `path`, writing the result in place.
///
/// A file without the marker is written back unchanged.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read or written.
pub fn add_script_to_file(path: &Path, substitution: &Substitution) -> Result<SubstitutionReport> {
    debug!(path = %path.display(), marker = substitution.marker(), "reading file");
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    let (replaced, replacements) = substitution.apply(&text);
    if replacements == 0 {
        warn!(path = %path.display(), marker = substitution.marker(), "marker not found");
    }

    fs::write(path, replaced).map_err(|e| Error::io(path, e))?;
    info!(path = %path.display(), replacements, "substitution written");

    Ok(SubstitutionReport {
        file: path.to_path_buf(),
        replacements,
    })
}
