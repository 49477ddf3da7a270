//! Error types for documentation post-processing.
//!
//! Every failure is surfaced to the caller; nothing in this crate retries or
//! falls back to a default value.
//!
//! # Examples
//!
//! ```
//! use docpost_core::{Error, Result};
//!
//! fn find_container(found: bool) -> Result<()> {
//!     if !found {
//!         return Err(Error::ContainerNotFound {
//!             id: "page-container".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = find_container(false).unwrap_err();
//! assert!(err.is_not_found());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for documentation post-processing.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading or writing a file failed.
    ///
    /// Covers missing, unreadable and unwritable files.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File the operation was performed on
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The element whose pages are enumerated does not exist.
    #[error("container element with id '{id}' not found")]
    ContainerNotFound {
        /// Id that was searched for
        id: String,
    },

    /// A page has no first `div` child to take items from.
    #[error("page {page} has no first child element")]
    MissingFirstChild {
        /// 1-based page number
        page: usize,
    },

    /// No element matched a lookup.
    #[error("no <{tag}> element with class '{class}'")]
    ElementNotFound {
        /// Tag name that was searched
        tag: String,
        /// Class attribute value that was searched
        class: String,
    },

    /// The matched element lacks the requested attribute.
    #[error("element with class '{class}' has no '{attribute}' attribute")]
    MissingAttribute {
        /// Class attribute value of the matched element
        class: String,
        /// Name of the missing attribute
        attribute: String,
    },

    /// A required document section (`head` or `body`) is missing.
    #[error("document has no <{tag}> element")]
    MissingSection {
        /// Tag name of the missing section
        tag: String,
    },

    /// Clipboard utility missing or failing.
    #[error("clipboard error: {message}")]
    Clipboard {
        /// Description of the clipboard failure
        message: String,
        /// Underlying error, if any
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Invalid argument error.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Wraps an I/O error with the path it occurred on.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this is a file I/O error.
    ///
    /// # Examples
    ///
    /// ```
    /// use docpost_core::Error;
    /// use std::io;
    ///
    /// let err = Error::Io {
    ///     path: "page.html".into(),
    ///     source: io::Error::new(io::ErrorKind::NotFound, "missing"),
    /// };
    /// assert!(err.is_io_error());
    /// ```
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns `true` if an expected element, attribute or section is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use docpost_core::Error;
    ///
    /// let err = Error::MissingFirstChild { page: 3 };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ContainerNotFound { .. }
                | Self::MissingFirstChild { .. }
                | Self::ElementNotFound { .. }
                | Self::MissingAttribute { .. }
                | Self::MissingSection { .. }
        )
    }

    /// Returns `true` if this is a clipboard error.
    #[must_use]
    pub const fn is_clipboard_error(&self) -> bool {
        matches!(self, Self::Clipboard { .. })
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if this is an invalid argument error.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

/// Result type alias for post-processing operations.
pub type Result<T> = std::result::Result<T, Error>;
