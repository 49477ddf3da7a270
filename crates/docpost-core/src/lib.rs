//! Post-processing for generated HTML documentation pages.
//!
//! The pages are produced by a PDF-to-HTML converter; this crate edits them
//! so the highlight scripts can address individual text elements.
//!
//! # Architecture
//!
//! - [`substitute`] - literal `</body>` replacement over a whole file
//! - [`Document`] - parsed page with positional id assignment and script edits
//! - [`post_process_file`] - id assignment plus script injection, written back
//! - [`convert`] - class name / class key / element id conversions
//! - [`Clipboard`] - clipboard boundary with command and in-memory backends
//!
//! # Examples
//!
//! ```
//! use docpost_core::{Document, PostProcessConfig, ScriptMode, post_process};
//!
//! let doc = Document::parse(
//!     r#"<div id="page-container"><div><div><div>a</div><div>b</div></div></div></div>"#,
//! );
//! let report = post_process(&doc, &PostProcessConfig::default(), ScriptMode::Append)?;
//! assert_eq!(report.ids_assigned, 2);
//! # Ok::<(), docpost_core::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod clipboard;
mod config;
mod document;
mod error;
mod postprocess;
mod types;

pub mod cli;
pub mod convert;
pub mod substitute;

pub use clipboard::{Clipboard, ClipboardCommand, CommandClipboard, MemoryClipboard};
pub use config::{
    DEFAULT_BODY_SCRIPT, DEFAULT_CONTAINER_ID, DEFAULT_HEAD_SCRIPTS, DEFAULT_MARKER,
    DEFAULT_REPLACEMENT, PostProcessConfig,
};
pub use convert::{
    ClassLookup, ClipboardReport, Direction, LookupReport, class_to_key, convert_clipboard,
    key_to_class,
};
pub use document::{Document, Placement};
pub use error::{Error, Result};
pub use postprocess::{PostProcessReport, ScriptMode, post_process, post_process_file};
pub use substitute::{Substitution, SubstitutionReport, add_script_to_file};
pub use types::{ClassKey, PositionalId};
