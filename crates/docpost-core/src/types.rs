//! Strong domain types for documentation post-processing.
//!
//! # Examples
//!
//! ```
//! use docpost_core::{ClassKey, PositionalId};
//!
//! let id = PositionalId::new(0, 3);
//! assert_eq!(id.to_string(), "1.3");
//!
//! let key = ClassKey::from_class("t m0 x8");
//! assert_eq!(key.as_str(), "t.m0.x8");
//! ```

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier derived from an item's position under the page container.
///
/// Stores the 0-based page index and 0-based item index. The rendered form
/// is `"{page_index + 1}.{item_index}"`.
///
/// # Examples
///
/// ```
/// use docpost_core::PositionalId;
///
/// let id: PositionalId = "2.5".parse().unwrap();
/// assert_eq!(id.page_index(), 1);
/// assert_eq!(id.item_index(), 5);
/// assert_eq!(id.to_string(), "2.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PositionalId {
    page_index: usize,
    item_index: usize,
}

impl PositionalId {
    /// Creates an identifier from 0-based page and item indices.
    #[inline]
    #[must_use]
    pub const fn new(page_index: usize, item_index: usize) -> Self {
        Self {
            page_index,
            item_index,
        }
    }

    /// Returns the 0-based page index.
    #[inline]
    #[must_use]
    pub const fn page_index(&self) -> usize {
        self.page_index
    }

    /// Returns the 1-based page number used in the rendered form.
    #[inline]
    #[must_use]
    pub const fn page_number(&self) -> usize {
        self.page_index + 1
    }

    /// Returns the 0-based item index.
    #[inline]
    #[must_use]
    pub const fn item_index(&self) -> usize {
        self.item_index
    }
}

impl fmt::Display for PositionalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.page_number(), self.item_index)
    }
}

impl FromStr for PositionalId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidArgument(format!("invalid positional id: '{s}'"));

        let (page, item) = s.split_once('.').ok_or_else(invalid)?;
        let page: usize = page.parse().map_err(|_| invalid())?;
        let item: usize = item.parse().map_err(|_| invalid())?;
        if page == 0 {
            return Err(invalid());
        }
        Ok(Self::new(page - 1, item))
    }
}

impl From<PositionalId> for String {
    fn from(id: PositionalId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for PositionalId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Dot-separated form of an HTML `class` attribute.
///
/// `t m0 x8` becomes `t.m0.x8`. The conversion is a plain character swap:
/// no validation of the input shape is performed.
///
/// # Examples
///
/// ```
/// use docpost_core::ClassKey;
///
/// let key = ClassKey::new("t.m0.x8");
/// assert_eq!(key.to_class(), "t m0 x8");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassKey(String);

impl ClassKey {
    /// Wraps an already dot-separated key.
    #[inline]
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Builds a key from a space-separated class string.
    #[must_use]
    pub fn from_class(class: &str) -> Self {
        Self(crate::convert::class_to_key(class))
    }

    /// Returns the space-separated class string.
    #[must_use]
    pub fn to_class(&self) -> String {
        crate::convert::key_to_class(&self.0)
    }

    /// Returns the key as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key and returns the inner `String`.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ClassKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ClassKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}
