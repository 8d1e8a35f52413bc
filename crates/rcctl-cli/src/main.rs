//! # rcctl-cli
//!
//! Binary entry point for rcctl.
//!
//! This crate provides:
//! - CLI argument parsing using `clap`
//! - Project configuration loading with command-line overrides
//! - Project setup via `rcctl init`
//! - Template fetch via `rcctl get`
//! - Template rollback via `rcctl rollback`
//! - Version history via `rcctl versions list`

mod completions;
mod context;
mod display;
mod get;
mod init;
mod prompt;
mod rollback;
#[cfg(test)]
mod test_support;
mod versions;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use rcctl_core::{PROJECT_FILE, ProjectConfig};
use std::io::{IsTerminal, stdout};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::completions::CompletionsArgs;
use crate::context::CommandContext;

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
    /// Automatically detect if stdout is a TTY
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorMode {
    /// Returns true if colors should be used based on mode and terminal detection.
    fn should_use_colors(self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => stdout().is_terminal(),
        }
    }
}

/// Source for configuration: file path or a single-key override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Local file path (default behavior)
    File(PathBuf),
    /// Config override (e.g., "api.origin=http://localhost:9000")
    Override { key: String, value: String },
}

/// Keys that can be overridden via `-c key=value`.
const KNOWN_OVERRIDE_KEYS: &[&str] = &[
    "project",
    "remoteconfig.template",
    "api.origin",
    "api.timeout_secs",
    "auth.token_env",
];

impl ConfigSource {
    /// Parse a config source string into its variant.
    ///
    /// Format:
    /// - `project=...`, `api.*=...`, `auth.*=...`, `remoteconfig.*=...` → Override
    /// - Anything else → File path
    fn parse(s: &str) -> Self {
        // Only treat as override for known sections, so paths containing '=' stay paths
        if let Some((key, value)) = s.split_once('=')
            && (key == "project"
                || key.starts_with("api.")
                || key.starts_with("auth.")
                || key.starts_with("remoteconfig."))
        {
            return ConfigSource::Override {
                key: key.to_string(),
                value: value.to_string(),
            };
        }
        ConfigSource::File(PathBuf::from(s))
    }
}

/// Applies CLI config overrides to the loaded configuration.
///
/// Overrides are in the format `section.field=value` and take precedence
/// over values from the config file.
pub(crate) fn apply_config_overrides(
    config: &mut ProjectConfig,
    sources: &[ConfigSource],
) -> Result<()> {
    for source in sources {
        if let ConfigSource::Override { key, value } = source {
            match key.as_str() {
                "project" => config.project = Some(value.clone()),
                "remoteconfig.template" => config.remoteconfig.template = Some(value.clone()),
                "api.origin" => config.api.origin = value.clone(),
                "api.timeout_secs" => {
                    config.api.timeout_secs = value
                        .parse()
                        .with_context(|| format!("Invalid api.timeout_secs '{}'", value))?;
                }
                "auth.token_env" => config.auth.token_env = value.clone(),
                other => {
                    warn!(
                        "Unknown config key '{}'. Known keys: {}",
                        other,
                        KNOWN_OVERRIDE_KEYS.join(", ")
                    );
                }
            }
        }
    }
    config.validate()?;
    Ok(())
}

/// Walk up from `start` looking for `rcctl.yml`.
fn find_project_file(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let candidate = current.join(PROJECT_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

/// The project file named by `-c FILE`, or the nearest `rcctl.yml` at or
/// above `cwd`.
fn resolve_project_file(config_sources: &[ConfigSource], cwd: &Path) -> Option<PathBuf> {
    let explicit = config_sources.iter().find_map(|s| match s {
        ConfigSource::File(path) if path.as_os_str() != PROJECT_FILE => Some(path.clone()),
        _ => None,
    });
    explicit.or_else(|| find_project_file(cwd))
}

/// Loads the project configuration and applies overrides.
///
/// The default `rcctl.yml` is searched for in the working directory and its
/// ancestors; an explicitly named file that does not exist falls back to
/// defaults with a warning.
pub(crate) fn load_config(config_sources: &[ConfigSource]) -> Result<ProjectConfig> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut config = match resolve_project_file(config_sources, &cwd) {
        Some(path) if path.exists() => ProjectConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        Some(path) => {
            warn!("Config file {:?} not found, using defaults", path);
            ProjectConfig::default()
        }
        None => {
            debug!("No {} found, using defaults", PROJECT_FILE);
            ProjectConfig::default()
        }
    };

    if config.project_dir.as_os_str().is_empty() {
        config.project_dir = cwd;
    }

    apply_config_overrides(&mut config, config_sources)?;

    Ok(config)
}

/// rcctl - manage Remote Config templates from the command line
#[derive(Parser, Debug)]
#[command(name = "rcctl", version, about, disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    // ─────────────────────────────────────────────────────────────────────────
    // Global options (available for all subcommands)
    // ─────────────────────────────────────────────────────────────────────────
    /// Configuration source: file path or key=value override (e.g. api.origin=...).
    /// Can be specified multiple times. Overrides are applied after config file loading.
    #[arg(short, long, default_value = PROJECT_FILE, global = true, action = ArgAction::Append)]
    config: Vec<String>,

    /// Project to operate on (overrides `project` in rcctl.yml)
    #[arg(short = 'P', long, global = true)]
    project: Option<String>,

    /// Access token (overrides the token environment variable)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Color output mode (auto, always, never)
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    color: ColorMode,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Choose the template file path and record it in rcctl.yml
    Init(init::InitArgs),

    /// Fetch the current (or a specific) template
    Get(get::GetArgs),

    /// Roll the template back to an earlier version
    Rollback(rollback::RollbackArgs),

    /// Inspect template version history
    Versions(versions::VersionsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    colored::control::set_override(cli.color.should_use_colors());

    // Logs go to stderr so `rcctl get` output can be piped
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config_sources: Vec<ConfigSource> =
        cli.config.iter().map(|s| ConfigSource::parse(s)).collect();

    let context = || -> Result<CommandContext> {
        let config = load_config(&config_sources)?;
        Ok(CommandContext::new(config, cli.project.clone(), cli.token.clone()))
    };

    match cli.command {
        Commands::Completions(args) => {
            completions::generate_completions(&args);
            Ok(())
        }
        Commands::Init(args) => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            let project_file = resolve_project_file(&config_sources, &cwd)
                .unwrap_or_else(|| cwd.join(PROJECT_FILE));
            let config = load_config(&config_sources)?;
            init::execute(args, &project_file, &config.auth.token_env)
        }
        Commands::Get(args) => get::execute(args, &context()?).await,
        Commands::Rollback(args) => rollback::execute(args, &context()?).await,
        Commands::Versions(args) => versions::execute(args, &context()?).await,
    }
}
