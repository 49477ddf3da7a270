//! Parsed HTML document and the tree operations the transforms need.
//!
//! Parsing and serialization are delegated to `kuchikikiki`; this module only
//! walks and edits the resulting tree.
//!
//! # Examples
//!
//! ```
//! use docpost_core::{Document, PositionalId};
//!
//! let doc = Document::parse(
//!     r#"<div id="page-container"><div><div><div>a</div><div>b</div></div></div></div>"#,
//! );
//! let ids = doc.assign_positional_ids("page-container").unwrap();
//! assert_eq!(ids, vec![PositionalId::new(0, 0), PositionalId::new(0, 1)]);
//! assert!(doc.to_html().contains(r#"<div id="1.1">b</div>"#));
//! ```

use crate::{Error, PositionalId, Result};
use kuchikikiki::iter::NodeIterator;
use kuchikikiki::traits::TendrilSink;
use kuchikikiki::{ElementData, NodeDataRef, NodeRef};
use std::fmt;
use std::fs;
use std::iter;
use std::path::Path;
use tracing::debug;

/// Section of the document a script is appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Last child of `<head>`
    Head,
    /// Last child of `<body>`
    Body,
}

impl Placement {
    /// Tag name of the section.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Body => "body",
        }
    }
}

/// A mutable HTML document tree.
pub struct Document {
    root: NodeRef,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document").finish_non_exhaustive()
    }
}

impl Document {
    /// Parses an HTML string.
    ///
    /// Parsing follows HTML5 error recovery, so it never fails; missing
    /// `<html>`, `<head>` and `<body>` elements are synthesised.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        Self {
            root: kuchikikiki::parse_html().one(html),
        }
    }

    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read as UTF-8 text.
    pub fn read(path: &Path) -> Result<Self> {
        let html = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(Self::parse(&html))
    }

    /// Serializes the document back to HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.root.to_string()
    }

    /// Serializes the document and writes it to `path`, overwriting it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be written.
    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_html()).map_err(|e| Error::io(path, e))
    }

    /// Assigns `"{page + 1}.{item}"` ids to the items under the container.
    ///
    /// Pages are the container's `div` children. Items are the `div` children
    /// of each page's first `div` child. Returns the ids in assignment order.
    ///
    /// # Errors
    ///
    /// - [`Error::ContainerNotFound`] if no element has id `container_id`
    /// - [`Error::MissingFirstChild`] if a page has no `div` child; pages
    ///   before it have already been edited in memory
    pub fn assign_positional_ids(&self, container_id: &str) -> Result<Vec<PositionalId>> {
        let container = self
            .find_by_id(container_id)
            .ok_or_else(|| Error::ContainerNotFound {
                id: container_id.to_string(),
            })?;

        let mut assigned = Vec::new();
        for (page_index, page) in child_elements(&container, "div").enumerate() {
            let first = child_elements(&page, "div")
                .next()
                .ok_or(Error::MissingFirstChild {
                    page: page_index + 1,
                })?;

            for (item_index, item) in child_elements(&first, "div").enumerate() {
                let id = PositionalId::new(page_index, item_index);
                set_attribute(&item, "id", id.to_string());
                assigned.push(id);
            }
            debug!(page = page_index + 1, total = assigned.len(), "page numbered");
        }

        Ok(assigned)
    }

    /// Removes every `script` element in the document.
    ///
    /// Returns the number of removed elements.
    pub fn remove_scripts(&self) -> usize {
        let scripts: Vec<NodeRef> = self
            .root
            .descendants()
            .filter(|node| is_element(node, "script"))
            .collect();
        for script in &scripts {
            script.detach();
        }
        scripts.len()
    }

    /// Appends `<script src="{src}"></script>` after all children of the
    /// `placement` section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSection`] if the section does not exist.
    pub fn append_script(&self, placement: Placement, src: &str) -> Result<()> {
        let section = self.section(placement)?;

        // Same namespace as the section it is appended to.
        let mut name = section.name.clone();
        name.local = "script".into();
        let script = NodeRef::new_element(name, iter::empty());
        set_attribute(&script, "src", src.to_string());

        section.as_node().append(script);
        Ok(())
    }

    /// Returns the `src` of every script inside the `placement` section, in
    /// document order. Inline scripts yield an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSection`] if the section does not exist.
    pub fn script_sources(&self, placement: Placement) -> Result<Vec<String>> {
        let section = self.section(placement)?;
        Ok(section
            .as_node()
            .descendants()
            .filter(|node| is_element(node, "script"))
            .map(|node| attribute(&node, "src").unwrap_or_default())
            .collect())
    }

    /// Counts the `script` elements anywhere in the document.
    #[must_use]
    pub fn script_count(&self) -> usize {
        self.root
            .descendants()
            .filter(|node| is_element(node, "script"))
            .count()
    }

    /// Reads `attribute` from the first `tag` element whose class matches.
    ///
    /// A class matches when the whole `class` attribute equals `class`, or
    /// when `class` is a single name listed in the attribute.
    ///
    /// # Errors
    ///
    /// - [`Error::ElementNotFound`] if no element matches
    /// - [`Error::MissingAttribute`] if the first match lacks `attribute`
    pub fn attribute_by_class(&self, tag: &str, class: &str, attribute_name: &str) -> Result<String> {
        let element = self
            .root
            .descendants()
            .find(|node| {
                is_element(node, tag)
                    && attribute(node, "class").is_some_and(|value| class_matches(&value, class))
            })
            .ok_or_else(|| Error::ElementNotFound {
                tag: tag.to_string(),
                class: class.to_string(),
            })?;

        attribute(&element, attribute_name).ok_or_else(|| Error::MissingAttribute {
            class: class.to_string(),
            attribute: attribute_name.to_string(),
        })
    }

    /// Returns the element with the given `id` attribute.
    fn find_by_id(&self, id: &str) -> Option<NodeRef> {
        self.root
            .descendants()
            .find(|node| attribute(node, "id").as_deref() == Some(id))
    }

    fn section(&self, placement: Placement) -> Result<NodeDataRef<ElementData>> {
        self.root
            .descendants()
            .elements()
            .find(|element| &*element.name.local == placement.tag())
            .ok_or_else(|| Error::MissingSection {
                tag: placement.tag().to_string(),
            })
    }
}

fn is_element(node: &NodeRef, tag: &str) -> bool {
    node.as_element()
        .is_some_and(|element| &*element.name.local == tag)
}

/// Immediate element children of `node` named `tag`, in document order.
fn child_elements<'a>(node: &NodeRef, tag: &'a str) -> impl Iterator<Item = NodeRef> + 'a {
    node.children().filter(move |child| is_element(child, tag))
}

fn attribute(node: &NodeRef, name: &str) -> Option<String> {
    node.as_element()
        .and_then(|element| element.attributes.borrow().get(name).map(ToString::to_string))
}

fn set_attribute(node: &NodeRef, name: &str, value: String) {
    if let Some(element) = node.as_element() {
        element.attributes.borrow_mut().insert(name, value);
    }
}

/// Compares against the class list joined by single spaces, so runs of
/// whitespace in the attribute do not matter.
fn class_matches(value: &str, class: &str) -> bool {
    if value == class || value.split_whitespace().collect::<Vec<_>>().join(" ") == class {
        return true;
    }
    !class.is_empty()
        && !class.contains(char::is_whitespace)
        && value.split_whitespace().any(|name| name == class)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_PAGES: &str = r#"<html><head><title>t</title></head><body>
<div id="page-container">
  <div class="pf"><div class="pc"><div class="t a">x</div><div class="t b">y</div></div></div>
  <div class="pf"><div class="pc"><div class="t c">z</div></div><div class="ignored"><div>w</div></div></div>
</div></body></html>"#;

    #[test]
    fn test_assign_single_page() {
        let doc = Document::parse(
            r#"<div id="page-container"><div><div><div>a</div><div>b</div></div></div></div>"#,
        );
        let ids = doc.assign_positional_ids("page-container").unwrap();
        let rendered: Vec<String> = ids.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["1.0", "1.1"]);

        let html = doc.to_html();
        assert!(html.contains(r#"<div id="1.0">a</div><div id="1.1">b</div>"#));
    }

    #[test]
    fn test_assign_two_pages_only_first_child() {
        let doc = Document::parse(TWO_PAGES);
        let ids = doc.assign_positional_ids("page-container").unwrap();
        let rendered: Vec<String> = ids.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["1.0", "1.1", "2.0"]);

        let html = doc.to_html();
        assert!(html.contains(r#"<div class="t c" id="2.0">z</div>"#));
        assert!(html.contains("<div>w</div>"));
    }

    #[test]
    fn test_assign_overwrites_existing_ids() {
        let doc = Document::parse(
            r#"<div id="page-container"><div><div><div id="old">a</div></div></div></div>"#,
        );
        doc.assign_positional_ids("page-container").unwrap();
        let html = doc.to_html();
        assert!(html.contains(r#"<div id="1.0">a</div>"#));
        assert!(!html.contains("old"));
    }

    #[test]
    fn test_assign_skips_non_div_children() {
        let doc = Document::parse(
            r#"<div id="page-container"><p>note</p><div><span></span><div><img><div>a</div></div></div></div>"#,
        );
        let ids = doc.assign_positional_ids("page-container").unwrap();
        assert_eq!(ids, vec![PositionalId::new(0, 0)]);
    }

    #[test]
    fn test_assign_missing_container() {
        let doc = Document::parse("<div id='other'></div>");
        let err = doc.assign_positional_ids("page-container").unwrap_err();
        assert!(matches!(err, Error::ContainerNotFound { ref id } if id == "page-container"));
    }

    #[test]
    fn test_assign_page_without_first_child() {
        let doc = Document::parse(
            r#"<div id="page-container"><div><div><div>a</div></div></div><div>text only</div></div>"#,
        );
        let err = doc.assign_positional_ids("page-container").unwrap_err();
        assert!(matches!(err, Error::MissingFirstChild { page: 2 }));
    }

    #[test]
    fn test_empty_container_assigns_nothing() {
        let doc = Document::parse(r#"<div id="page-container"></div>"#);
        assert!(doc.assign_positional_ids("page-container").unwrap().is_empty());
    }

    #[test]
    fn test_remove_scripts_everywhere() {
        let doc = Document::parse(
            r#"<html><head><script src="a.js"></script></head><body><div><script>var x;</script></div><script src="b.js"></script></body></html>"#,
        );
        assert_eq!(doc.remove_scripts(), 3);
        assert_eq!(doc.script_count(), 0);
        assert!(!doc.to_html().contains("var x"));
    }

    #[test]
    fn test_append_script_is_last_child() {
        let doc = Document::parse("<html><head></head><body><p>x</p></body></html>");
        doc.append_script(Placement::Body, "highlight.js").unwrap();
        assert!(
            doc.to_html()
                .contains(r#"<p>x</p><script src="highlight.js"></script></body>"#)
        );
    }

    #[test]
    fn test_append_head_scripts_in_order() {
        let doc = Document::parse("<html><head><title>t</title></head><body></body></html>");
        doc.append_script(Placement::Head, "iframe.js").unwrap();
        doc.append_script(Placement::Head, "switch.js").unwrap();
        assert_eq!(
            doc.script_sources(Placement::Head).unwrap(),
            vec!["iframe.js", "switch.js"]
        );
        assert!(doc.to_html().contains(
            r#"<title>t</title><script src="iframe.js"></script><script src="switch.js"></script></head>"#
        ));
    }

    #[test]
    fn test_attribute_by_class_exact() {
        let doc = Document::parse(
            r#"<div class="t m0 x8 h5" id="1.4"></div><div class="t m0 x8" id="1.5"></div>"#,
        );
        assert_eq!(doc.attribute_by_class("div", "t m0 x8", "id").unwrap(), "1.5");
    }

    #[test]
    fn test_attribute_by_class_single_name() {
        let doc = Document::parse(r#"<span class="x8"></span><div class="t m0 x8" id="3.1"></div>"#);
        assert_eq!(doc.attribute_by_class("div", "x8", "id").unwrap(), "3.1");
    }

    #[test]
    fn test_attribute_by_class_not_found() {
        let doc = Document::parse(r#"<div class="t m0" id="1.0"></div>"#);
        let err = doc.attribute_by_class("div", "t m0 x8", "id").unwrap_err();
        assert!(matches!(err, Error::ElementNotFound { .. }));
    }

    #[test]
    fn test_attribute_by_class_missing_id() {
        let doc = Document::parse(r#"<div class="t m0 x8"></div>"#);
        let err = doc.attribute_by_class("div", "t m0 x8", "id").unwrap_err();
        assert!(matches!(err, Error::MissingAttribute { .. }));
    }

    #[test]
    fn test_class_matches() {
        assert!(class_matches("t m0 x8", "t m0 x8"));
        assert!(class_matches("t m0 x8", "m0"));
        assert!(!class_matches("t m0 x8", "t m0"));
        assert!(!class_matches("t m0 x8", ""));
    }

    #[test]
    fn test_class_matches_ignores_whitespace_runs() {
        assert!(class_matches("t  m0\tx8 ", "t m0 x8"));
        assert!(!class_matches("t  m0 x8", "t  m1 x8"));

        let doc = Document::parse(r#"<div class=" t  m0 x8" id="2.7"></div>"#);
        assert_eq!(doc.attribute_by_class("div", "t m0 x8", "id").unwrap(), "2.7");
    }

    #[test]
    fn test_appended_script_is_html_element() {
        let doc = Document::parse("<html><head></head><body></body></html>");
        doc.append_script(Placement::Body, "late.js").unwrap();

        let html = doc.to_html();
        assert!(html.contains(r#"<body><script src="late.js"></script></body>"#));
        assert!(!html.contains("xmlns"));
        assert_eq!(doc.script_count(), 1);
    }
}
