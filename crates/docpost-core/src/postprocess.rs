//! Positional id assignment plus script injection over a page file.
//!
//! # Examples
//!
//! ```
//! use docpost_core::{Document, PostProcessConfig, ScriptMode, post_process};
//!
//! let doc = Document::parse(
//!     r#"<html><head><script src="old.js"></script></head><body>
//!        <div id="page-container"><div><div><div>a</div></div></div></div>
//!        </body></html>"#,
//! );
//! let outcome = post_process(&doc, &PostProcessConfig::default(), ScriptMode::ReplaceAll).unwrap();
//! assert_eq!(outcome.ids_assigned, 1);
//! assert_eq!(outcome.scripts_removed, 1);
//! assert_eq!(doc.script_count(), 3);
//! ```

use crate::document::Placement;
use crate::{Document, PositionalId, PostProcessConfig, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How scripts are injected after ids are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScriptMode {
    /// Append the body script, keeping existing scripts.
    #[default]
    Append,
    /// Remove every script, then append the body script and the head scripts.
    ReplaceAll,
}

/// What [`post_process`] changed in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostProcessReport {
    /// File that was rewritten, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Script injection mode used
    pub mode: ScriptMode,
    /// Number of items that received an id
    pub ids_assigned: usize,
    /// Number of pages containing at least one item
    pub pages: usize,
    /// Last id assigned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_id: Option<PositionalId>,
    /// Number of pre-existing scripts removed
    pub scripts_removed: usize,
    /// Sources of the scripts added, in insertion order
    pub scripts_added: Vec<String>,
}

/// Assigns positional ids, then injects scripts according to `mode`.
///
/// Mutates `document` in place. Nothing is written anywhere.
///
/// # Errors
///
/// Returns [`crate::Error::ContainerNotFound`],
/// [`crate::Error::MissingFirstChild`] or [`crate::Error::MissingSection`].
pub fn post_process(
    document: &Document,
    config: &PostProcessConfig,
    mode: ScriptMode,
) -> Result<PostProcessReport> {
    let ids = document.assign_positional_ids(&config.container_id)?;

    let mut pages: Vec<usize> = ids.iter().map(PositionalId::page_index).collect();
    pages.dedup();

    let scripts_removed = match mode {
        ScriptMode::Append => 0,
        ScriptMode::ReplaceAll => document.remove_scripts(),
    };
    debug!(scripts_removed, "existing scripts handled");

    let mut scripts_added = Vec::new();
    document.append_script(Placement::Body, &config.body_script)?;
    scripts_added.push(config.body_script.clone());

    if mode == ScriptMode::ReplaceAll {
        for src in &config.head_scripts {
            document.append_script(Placement::Head, src)?;
            scripts_added.push(src.clone());
        }
    }

    Ok(PostProcessReport {
        file: None,
        mode,
        ids_assigned: ids.len(),
        pages: pages.len(),
        last_id: ids.last().copied(),
        scripts_removed,
        scripts_added,
    })
}

/// Post-processes the page at `path` and overwrites it.
///
/// The file is only written after every edit succeeded.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] if the file cannot be read or written, and
/// the errors of [`post_process`].
pub fn post_process_file(
    path: &Path,
    config: &PostProcessConfig,
    mode: ScriptMode,
) -> Result<PostProcessReport> {
    let document = Document::read(path)?;
    let mut report = post_process(&document, config, mode)?;
    document.write(path)?;

    info!(
        path = %path.display(),
        ids = report.ids_assigned,
        removed = report.scripts_removed,
        "page post-processed"
    );
    report.file = Some(path.to_path_buf());
    Ok(report)
}
