//! Config command implementation.
//!
//! Configuration is stored in TOML format at:
//! - Linux: `~/.config/docpost/config.toml`
//! - macOS: `~/Library/Application Support/docpost/config.toml`
//! - Windows: `%APPDATA%\docpost\config.toml`
//!
//! A path given with `--config` replaces the default location.

use crate::actions::ConfigAction;
use anyhow::{Context, Result};
use docpost_core::cli::{ExitCode, OutputFormat};
use docpost_core::{ClipboardCommand, CommandClipboard, Error, PostProcessConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// CLI configuration.
///
/// # Examples
///
/// ```toml
/// [general]
/// default_format = "pretty"
/// log_level = "info"
///
/// [document]
/// container_id = "page-container"
/// marker = "</body>"
/// replacement = "<script src=\"highlight.js\"></script></body>"
/// body_script = "highlight.js"
/// head_scripts = ["iframe.js", "switch.js"]
///
/// [clipboard]
/// paste = "xclip -selection clipboard -o"
/// copy = "xclip -selection clipboard -i"
///
/// [lookup]
/// source = "docs/static/liberty07_03.html"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Document transform settings
    #[serde(default)]
    pub document: PostProcessConfig,

    /// Clipboard utility overrides
    #[serde(default)]
    pub clipboard: ClipboardConfig,

    /// Class lookup settings
    #[serde(default)]
    pub lookup: LookupConfig,
}

/// General configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format (json, text, pretty)
    pub default_format: String,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_format: "pretty".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Clipboard utility overrides.
///
/// When both are unset the utilities are detected on `PATH`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ClipboardConfig {
    /// Command printing the clipboard text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paste: Option<String>,

    /// Command reading new clipboard text from stdin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy: Option<String>,
}

/// Class lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LookupConfig {
    /// Page searched when `class2id` is run without `--source`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        self.general
            .default_format
            .parse::<OutputFormat>()
            .with_context(|| {
                format!(
                    "invalid default_format '{}', must be one of: json, text, pretty",
                    self.general.default_format
                )
            })?;

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(config_error(format!(
                "invalid log_level '{}', must be one of: {}",
                self.general.log_level,
                valid_levels.join(", ")
            )));
        }

        self.document.validate()?;

        if self.clipboard.paste.is_some() != self.clipboard.copy.is_some() {
            return Err(config_error(
                "clipboard.paste and clipboard.copy must be set together",
            ));
        }

        Ok(())
    }

    /// Returns the configured default output format.
    ///
    /// # Errors
    ///
    /// Returns an error if the format name is unknown.
    pub fn output_format(&self) -> Result<OutputFormat> {
        Ok(self.general.default_format.parse()?)
    }

    /// Builds the clipboard from the overrides, or detects one.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be parsed or no clipboard
    /// utility is installed.
    pub fn clipboard(&self) -> Result<CommandClipboard> {
        match (&self.clipboard.paste, &self.clipboard.copy) {
            (Some(paste), Some(copy)) => {
                let paste: ClipboardCommand = paste.parse()?;
                let copy: ClipboardCommand = copy.parse()?;
                debug!(%paste, %copy, "using configured clipboard commands");
                Ok(CommandClipboard::new(paste, copy))
            }
            _ => Ok(CommandClipboard::detect()?),
        }
    }

    /// Loads configuration from `path`, or from the default location.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let path = get_config_path()?;
                if !path.exists() {
                    debug!("Config file not found, using defaults");
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file {}", config_path.display()))?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            config_error(format!(
                "failed to parse config file {}: {e}",
                config_path.display()
            ))
        })?;

        config.validate()?;
        debug!("Loaded config from {}", config_path.display());

        Ok(config)
    }

    /// Saves configuration to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("failed to create config directory")?;
        }

        let toml_str = toml::to_string_pretty(self).context("failed to serialize config")?;
        fs::write(path, toml_str).context("failed to write config file")?;

        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Gets a configuration value by dotted key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "general.default_format" => Some(self.general.default_format.clone()),
            "general.log_level" => Some(self.general.log_level.clone()),

            "document.container_id" => Some(self.document.container_id.clone()),
            "document.marker" => Some(self.document.marker.clone()),
            "document.replacement" => Some(self.document.replacement.clone()),
            "document.body_script" => Some(self.document.body_script.clone()),
            "document.head_scripts" => Some(self.document.head_scripts.join(", ")),

            "clipboard.paste" => self.clipboard.paste.clone(),
            "clipboard.copy" => self.clipboard.copy.clone(),

            "lookup.source" => self
                .lookup
                .source
                .as_ref()
                .map(|p| p.display().to_string()),

            _ => None,
        }
    }
}

fn config_error(message: impl Into<String>) -> anyhow::Error {
    Error::ConfigError {
        message: message.into(),
    }
    .into()
}

/// Gets the default configuration file path.
///
/// # Errors
///
/// Returns an error if the platform config directory is unknown.
pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("failed to determine config directory")?;
    Ok(config_dir.join("docpost").join("config.toml"))
}

/// Initialization result.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InitResult {
    /// Whether a file was written
    pub written: bool,
    /// Status message
    pub message: String,
    /// Config file path
    pub path: String,
}

/// Configuration value result.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConfigValue {
    /// Configuration key
    pub key: String,
    /// Configuration value
    pub value: String,
}

/// Runs the config command.
///
/// `path` is the `--config` override, if any.
///
/// # Errors
///
/// Returns an error if the configuration operation fails.
pub fn run(action: ConfigAction, path: Option<&Path>, output_format: OutputFormat) -> Result<ExitCode> {
    info!("Config action: {:?}", action);

    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => get_config_path()?,
    };

    match action {
        ConfigAction::Init { force } => init_config(&config_path, force, output_format),
        ConfigAction::Show => {
            let config = Config::load(path)?;
            let formatted = crate::formatters::format_output(&config, output_format)
                .context("failed to format configuration")?;
            println!("{formatted}");
            Ok(ExitCode::SUCCESS)
        }
        ConfigAction::Get { key } => {
            let config = Config::load(path)?;
            let Some(value) = config.get(&key) else {
                eprintln!("configuration key '{key}' is unknown or unset");
                return Ok(ExitCode::INVALID_INPUT);
            };
            let formatted =
                crate::formatters::format_output(&ConfigValue { key, value }, output_format)
                    .context("failed to format config value")?;
            println!("{formatted}");
            Ok(ExitCode::SUCCESS)
        }
        ConfigAction::Path => {
            println!("{}", config_path.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Writes a default configuration file.
///
/// Will not overwrite an existing file unless `force` is set.
fn init_config(config_path: &Path, force: bool, output_format: OutputFormat) -> Result<ExitCode> {
    let result = if config_path.exists() && !force {
        InitResult {
            written: false,
            message: "configuration file already exists (use --force to overwrite)".to_string(),
            path: config_path.display().to_string(),
        }
    } else {
        Config::default().save(config_path)?;
        InitResult {
            written: true,
            message: "configuration file created with default values".to_string(),
            path: config_path.display().to_string(),
        }
    };

    let formatted = crate::formatters::format_output(&result, output_format)
        .context("failed to format init result")?;
    println!("{formatted}");

    Ok(ExitCode::SUCCESS)
}
