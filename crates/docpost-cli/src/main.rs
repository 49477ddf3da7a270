//! docpost - post-processing for generated documentation pages.
//!
//! Command-line interface over `docpost-core`: edits HTML pages produced by
//! a PDF-to-HTML converter and converts between class names and element ids
//! through the system clipboard.
//!
//! # Architecture
//!
//! The CLI is organized around subcommands:
//! - `add-js` - Insert the highlight script before `</body>`
//! - `post-process` - Assign positional ids and inject scripts
//! - `class-name` - Swap spaces and dots in the clipboard text
//! - `class2id` - Resolve class keys to element ids
//! - `config` - Manage the configuration file
//! - `completions` - Generate shell completions
//!
//! # Examples
//!
//! ```bash
//! # Assign ids and replace every script
//! docpost post-process docs/static/liberty07_03.html --replace-scripts
//!
//! # Look up ids interactively
//! docpost class2id --source docs/static/liberty07_03.html
//! ```

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use docpost_cli::actions::ConfigAction;
use docpost_cli::commands;
use docpost_cli::commands::config::Config;
use docpost_core::cli::{ExitCode, OutputFormat};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// docpost - Post-processing for generated documentation pages.
///
/// Prepares pdf2htmlEX output for the documentation site and helps map the
/// converter's class names to stable element ids.
#[derive(Parser, Debug)]
#[command(name = "docpost")]
#[command(version, about, long_about = None)]
#[command(author = "liberty-rs docs team")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, text, pretty); defaults to the configured format
    #[arg(long = "format", global = true)]
    format: Option<String>,

    /// Configuration file to use instead of the default location
    #[arg(long = "config", global = true, env = "DOCPOST_CONFIG")]
    config: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Insert the highlight script before `</body>`.
    ///
    /// Replaces every occurrence of the marker with the replacement text
    /// and rewrites the file. Running it twice inserts the script twice.
    ///
    /// # Examples
    ///
    /// ```bash
    /// docpost add-js docs/static/liberty07_03.html
    /// ```
    AddJs {
        /// HTML file to rewrite in place
        file: PathBuf,
    },

    /// Assign positional ids to page items and inject scripts.
    ///
    /// Pages are the `div` children of the container. Each `div` child of a
    /// page's first `div` receives the id `<page>.<item>`. The highlight
    /// script is then appended to `<body>`.
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Keep existing scripts
    /// docpost post-process page.html
    ///
    /// # Drop every script, then add highlight.js, iframe.js and switch.js
    /// docpost post-process page.html --replace-scripts
    /// ```
    PostProcess {
        /// HTML file to rewrite in place
        file: PathBuf,

        /// Remove all existing scripts and add the head scripts as well
        #[arg(long)]
        replace_scripts: bool,
    },

    /// Turn the class name on the clipboard into a class key.
    ///
    /// `t m0 x8` becomes `t.m0.x8`; with `--reverse` the dots become
    /// spaces again.
    ClassName {
        /// Convert a class key back into a class name
        #[arg(short, long)]
        reverse: bool,
    },

    /// Resolve class keys to element ids and copy them to the clipboard.
    ///
    /// Prompts for keys until an empty line or end of input.
    ///
    /// # Examples
    ///
    /// ```bash
    /// docpost class2id --source docs/static/liberty07_03.html
    /// echo t.m0.x8.h5 | docpost class2id --once
    /// ```
    Class2id {
        /// Page to search; defaults to `lookup.source` from the config
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Resolve a single key, then exit
        #[arg(long)]
        once: bool,
    },

    /// Manage the configuration file.
    Config {
        /// Configuration action
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions.
    ///
    /// # Examples
    ///
    /// ```bash
    /// docpost completions bash > /etc/bash_completion.d/docpost
    /// docpost completions zsh > ~/.zfunc/_docpost
    /// ```
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            commands::common::exit_code_for(&err)
        }
    };

    std::process::exit(exit_code.as_i32());
}

/// Loads configuration, sets up logging and dispatches the command.
fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(&cli.command, cli.config.as_deref())?;

    init_logging(cli.verbose, &config.general.log_level)?;

    let output_format = match &cli.format {
        Some(format) => format.parse::<OutputFormat>()?,
        None => config.output_format()?,
    };

    execute_command(cli.command, &config, cli.config.as_deref(), output_format)
}

/// Loads the configuration the command runs with.
///
/// `config` and `completions` start from defaults so they still work when
/// the file is missing or broken; `config show` and `config get` read the
/// file themselves.
fn load_config(command: &Commands, path: Option<&std::path::Path>) -> Result<Config> {
    match command {
        Commands::Config { .. } | Commands::Completions { .. } => Ok(Config::default()),
        _ => Config::load(path),
    }
}

/// Initializes logging infrastructure.
///
/// `--verbose` forces debug level; otherwise `RUST_LOG` wins over the
/// configured level. Logs go to stderr so stdout stays parseable.
fn init_logging(verbose: bool, configured_level: &str) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured_level))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

/// Executes the parsed command.
fn execute_command(
    command: Commands,
    config: &Config,
    config_path: Option<&std::path::Path>,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    match command {
        Commands::AddJs { file } => commands::add_js::run(&file, &config.document, output_format),
        Commands::PostProcess {
            file,
            replace_scripts,
        } => commands::post_process::run(&file, replace_scripts, &config.document, output_format),
        Commands::ClassName { reverse } => {
            let mut clipboard = config.clipboard()?;
            commands::class_name::run(&mut clipboard, reverse, output_format)
        }
        Commands::Class2id { source, once } => {
            let source = source.or_else(|| config.lookup.source.clone());
            let mut clipboard = config.clipboard()?;
            commands::class2id::run(source.as_deref(), &mut clipboard, once, output_format)
        }
        Commands::Config { action } => commands::config::run(action, config_path, output_format),
        Commands::Completions { shell } => {
            commands::completions::run(shell, &mut Cli::command())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_add_js() {
        let cli = Cli::parse_from(["docpost", "add-js", "page.html"]);
        match cli.command {
            Commands::AddJs { file } => assert_eq!(file, PathBuf::from("page.html")),
            _ => panic!("Expected AddJs command"),
        }
        assert!(cli.format.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parsing_post_process() {
        let cli = Cli::parse_from(["docpost", "post-process", "page.html", "--replace-scripts"]);
        match cli.command {
            Commands::PostProcess {
                file,
                replace_scripts,
            } => {
                assert_eq!(file, PathBuf::from("page.html"));
                assert!(replace_scripts);
            }
            _ => panic!("Expected PostProcess command"),
        }
    }

    #[test]
    fn test_cli_parsing_class_name_reverse() {
        let cli = Cli::parse_from(["docpost", "class-name", "-r"]);
        assert!(matches!(cli.command, Commands::ClassName { reverse: true }));
    }

    #[test]
    fn test_cli_parsing_class2id() {
        let cli = Cli::parse_from(["docpost", "class2id", "--source", "p.html", "--once"]);
        match cli.command {
            Commands::Class2id { source, once } => {
                assert_eq!(source, Some(PathBuf::from("p.html")));
                assert!(once);
            }
            _ => panic!("Expected Class2id command"),
        }
    }

    #[test]
    fn test_cli_parsing_config_get() {
        let cli = Cli::parse_from(["docpost", "config", "get", "document.container_id"]);
        match cli.command {
            Commands::Config {
                action: ConfigAction::Get { key },
            } => assert_eq!(key, "document.container_id"),
            _ => panic!("Expected Config Get command"),
        }
    }

    #[test]
    fn test_cli_parsing_global_flags() {
        let cli = Cli::parse_from([
            "docpost",
            "--verbose",
            "--format",
            "json",
            "--config",
            "/tmp/docpost.toml",
            "class-name",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.format.as_deref(), Some("json"));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/docpost.toml")));
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::parse_from(["docpost", "completions", "zsh"]);
        assert!(matches!(
            cli.command,
            Commands::Completions { shell: Shell::Zsh }
        ));
    }

    #[test]
    fn test_cli_rejects_missing_file() {
        assert!(Cli::try_parse_from(["docpost", "add-js"]).is_err());
    }

    #[test]
    fn test_config_commands_ignore_missing_or_broken_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let fresh = dir.path().join("fresh.toml");
        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[general\n").unwrap();

        let init = Cli::parse_from(["docpost", "config", "init"]);
        assert!(load_config(&init.command, Some(&fresh)).is_ok());
        assert!(load_config(&init.command, Some(&broken)).is_ok());

        let completions = Cli::parse_from(["docpost", "completions", "bash"]);
        assert!(load_config(&completions.command, Some(&broken)).is_ok());

        let add_js = Cli::parse_from(["docpost", "add-js", "page.html"]);
        assert!(load_config(&add_js.command, Some(&fresh)).is_err());
        assert!(load_config(&add_js.command, Some(&broken)).is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
