//! Conversions between class names, class keys and element ids.
//!
//! Class names are space separated (`t m0 x8`), class keys are dot separated
//! (`t.m0.x8`). Keys are what the highlight script expects in page URLs.

use crate::{Clipboard, ClassKey, Document, Result};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Replaces every space with a dot.
///
/// # Examples
///
/// ```
/// assert_eq!(docpost_core::class_to_key("a m0 x8"), "a.m0.x8");
/// ```
#[must_use]
pub fn class_to_key(class: &str) -> String {
    class.replace(' ', ".")
}

/// Replaces every dot with a space.
///
/// # Examples
///
/// ```
/// assert_eq!(docpost_core::key_to_class("a.m0.x8"), "a m0 x8");
/// ```
#[must_use]
pub fn key_to_class(key: &str) -> String {
    key.replace('.', " ")
}

/// Direction of a delimiter swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Space to dot
    #[default]
    ClassToKey,
    /// Dot to space
    KeyToClass,
}

impl Direction {
    /// Applies the swap to `text`.
    #[must_use]
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::ClassToKey => class_to_key(text),
            Self::KeyToClass => key_to_class(text),
        }
    }
}

/// Clipboard contents before and after a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClipboardReport {
    /// Text read from the clipboard
    pub input: String,
    /// Text written back to the clipboard
    pub output: String,
}

/// Reads the clipboard, swaps delimiters and writes the result back.
///
/// # Errors
///
/// Returns [`crate::Error::Clipboard`] if the clipboard cannot be read or written.
pub fn convert_clipboard(
    clipboard: &mut impl Clipboard,
    direction: Direction,
) -> Result<ClipboardReport> {
    let input = clipboard.read_text()?;
    let output = direction.apply(&input);
    clipboard.write_text(&output)?;
    debug!(?direction, %input, %output, "clipboard converted");
    Ok(ClipboardReport { input, output })
}

/// Result of a class-key lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupReport {
    /// Key as entered
    pub key: String,
    /// Class string searched for
    pub class: String,
    /// Id of the matching element
    pub id: String,
}

/// Resolves class keys to the ids of `div` elements in one parsed page.
///
/// The page is parsed once; each lookup walks the tree again.
///
/// # Examples
///
/// ```
/// use docpost_core::{ClassLookup, Document};
///
/// let lookup = ClassLookup::new(Document::parse(r#"<div class="t m0 x8" id="4.2"></div>"#));
/// assert_eq!(lookup.lookup("t.m0.x8").unwrap().id, "4.2");
/// assert!(lookup.lookup("t.m1.x8").is_err());
/// ```
#[derive(Debug)]
pub struct ClassLookup {
    document: Document,
}

impl ClassLookup {
    /// Wraps an already parsed document.
    #[must_use]
    pub const fn new(document: Document) -> Self {
        Self { document }
    }

    /// Reads and parses the page at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the file cannot be read.
    pub fn open(path: &Path) -> Result<Self> {
        let document = Document::read(path)?;
        info!(path = %path.display(), "lookup source loaded");
        Ok(Self::new(document))
    }

    /// Finds the id of the first `div` whose class matches `key`.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::ElementNotFound`] if no `div` matches
    /// - [`crate::Error::MissingAttribute`] if the match has no `id`
    pub fn lookup(&self, key: &str) -> Result<LookupReport> {
        let class = ClassKey::new(key).to_class();
        let id = self.document.attribute_by_class("div", &class, "id")?;
        debug!(%key, %class, %id, "class resolved");
        Ok(LookupReport {
            key: key.to_string(),
            class,
            id,
        })
    }

    /// Looks up `key` and writes the id to `clipboard`.
    ///
    /// The clipboard is left untouched when the lookup fails.
    ///
    /// # Errors
    ///
    /// Returns lookup errors and [`crate::Error::Clipboard`].
    pub fn copy_id(&self, key: &str, clipboard: &mut impl Clipboard) -> Result<LookupReport> {
        let report = self.lookup(key)?;
        clipboard.write_text(&report.id)?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryClipboard;

    #[test]
    fn test_class_to_key_scenario() {
        assert_eq!(class_to_key("a m0 x8"), "a.m0.x8");
        assert_eq!(key_to_class(&class_to_key("a m0 x8")), "a m0 x8");
    }

    #[test]
    fn test_swap_does_not_validate() {
        assert_eq!(class_to_key(""), "");
        assert_eq!(class_to_key("  "), "..");
        assert_eq!(class_to_key("a\tb c\n"), "a\tb.c\n");
    }

    #[test]
    fn test_convert_clipboard_class_to_key() {
        let mut clipboard =
            MemoryClipboard::with_text("t m0 x8 h5 y2899 ff1 fs2 fc2 sc0 ls0 ws0");
        let report = convert_clipboard(&mut clipboard, Direction::ClassToKey).unwrap();
        assert_eq!(report.output, "t.m0.x8.h5.y2899.ff1.fs2.fc2.sc0.ls0.ws0");
        assert_eq!(clipboard.writes(), [report.output.as_str()]);
    }

    #[test]
    fn test_convert_clipboard_key_to_class() {
        let mut clipboard = MemoryClipboard::with_text("a.m0.x8");
        let report = convert_clipboard(&mut clipboard, Direction::KeyToClass).unwrap();
        assert_eq!(report.input, "a.m0.x8");
        assert_eq!(report.output, "a m0 x8");
    }

    #[test]
    fn test_lookup_converts_key() {
        let lookup = ClassLookup::new(Document::parse(
            r#"<div class="t m0 x8" id="2.7">text</div>"#,
        ));
        let report = lookup.lookup("t.m0.x8").unwrap();
        assert_eq!(report.class, "t m0 x8");
        assert_eq!(report.id, "2.7");
    }

    #[test]
    fn test_lookup_missing_element_fails() {
        let lookup = ClassLookup::new(Document::parse(r#"<div class="t m0" id="1.0"></div>"#));
        let err = lookup.lookup("t.m0.x8").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_copy_id_leaves_clipboard_on_failure() {
        let lookup = ClassLookup::new(Document::parse(r#"<div class="t m0 x8"></div>"#));
        let mut clipboard = MemoryClipboard::with_text("previous");

        assert!(lookup.copy_id("t.m0.x8", &mut clipboard).is_err());
        assert!(clipboard.writes().is_empty());
        assert_eq!(clipboard.read_text().unwrap(), "previous");
    }

    #[test]
    fn test_copy_id_writes_clipboard() {
        let lookup = ClassLookup::new(Document::parse(r#"<div class="t m0 x8" id="3.0"></div>"#));
        let mut clipboard = MemoryClipboard::default();
        lookup.copy_id("t.m0.x8", &mut clipboard).unwrap();
        assert_eq!(clipboard.writes(), ["3.0"]);
    }
}
