//! Configuration for the document transforms.
//!
//! The defaults reproduce the fixed constants the generated documentation
//! pages rely on: the `page-container` element, the `</body>` marker and the
//! three script sources.
//!
//! # Examples
//!
//! ```
//! use docpost_core::PostProcessConfig;
//!
//! let config = PostProcessConfig::default();
//! assert_eq!(config.container_id, "page-container");
//! assert_eq!(config.head_scripts, vec!["iframe.js", "switch.js"]);
//! assert!(config.validate().is_ok());
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Id of the element whose children are enumerated as pages.
pub const DEFAULT_CONTAINER_ID: &str = "page-container";

/// Text the literal substitution searches for.
pub const DEFAULT_MARKER: &str = "</body>";

/// Text every marker occurrence is replaced with.
pub const DEFAULT_REPLACEMENT: &str = "<script src=\"highlight.js\"></script></body>";

/// Script appended to `<body>` by both injection variants.
pub const DEFAULT_BODY_SCRIPT: &str = "highlight.js";

/// Scripts appended to `<head>` by the replace-all variant, in order.
pub const DEFAULT_HEAD_SCRIPTS: [&str; 2] = ["iframe.js", "switch.js"];

/// Settings shared by the file transforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostProcessConfig {
    /// Id of the page container element.
    pub container_id: String,

    /// Marker replaced by the literal substitution.
    pub marker: String,

    /// Replacement text for the literal substitution.
    pub replacement: String,

    /// Source of the script appended to `<body>`.
    pub body_script: String,

    /// Sources of the scripts appended to `<head>` when replacing scripts.
    pub head_scripts: Vec<String>,
}

impl Default for PostProcessConfig {
    fn default() -> Self {
        Self {
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            marker: DEFAULT_MARKER.to_string(),
            replacement: DEFAULT_REPLACEMENT.to_string(),
            body_script: DEFAULT_BODY_SCRIPT.to_string(),
            head_scripts: DEFAULT_HEAD_SCRIPTS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl PostProcessConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if any required value is empty.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("container_id", &self.container_id),
            ("marker", &self.marker),
            ("body_script", &self.body_script),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::ConfigError {
                    message: format!("{field} cannot be empty"),
                });
            }
        }

        if let Some(pos) = self.head_scripts.iter().position(|s| s.trim().is_empty()) {
            return Err(Error::ConfigError {
                message: format!("head_scripts[{pos}] cannot be empty"),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let config = PostProcessConfig::default();
        assert_eq!(config.marker, "</body>");
        assert_eq!(
            config.replacement,
            r#"<script src="highlight.js"></script></body>"#
        );
        assert_eq!(config.body_script, "highlight.js");
    }

    #[test]
    fn test_replacement_keeps_marker() {
        let config = PostProcessConfig::default();
        assert!(config.replacement.ends_with(&config.marker));
    }

    #[test]
    fn test_validate_rejects_empty_container() {
        let config = PostProcessConfig {
            container_id: "  ".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("container_id"));
    }

    #[test]
    fn test_validate_rejects_empty_head_script() {
        let config = PostProcessConfig {
            head_scripts: vec!["iframe.js".to_string(), String::new()],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("head_scripts[1]"));
    }

    #[test]
    fn test_validate_allows_no_head_scripts() {
        let config = PostProcessConfig {
            head_scripts: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
