//! CLI commands for the `rcctl versions` namespace.
//!
//! Subcommands:
//! - `list`: Show the published version history of the project's template

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use rcctl_core::DEFAULT_VERSION_LIMIT;
use tracing::info;

use crate::context::CommandContext;
use crate::display;

/// Inspect template version history.
#[derive(Parser, Debug)]
pub struct VersionsArgs {
    #[command(subcommand)]
    pub command: VersionsCommands,
}

#[derive(Subcommand, Debug)]
pub enum VersionsCommands {
    /// List the most recent template versions
    List(ListArgs),
}

/// Output format for version listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for programmatic access
    Json,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Number of versions to list; 0 lists all versions
    #[arg(long, default_value_t = DEFAULT_VERSION_LIMIT)]
    pub limit: u32,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Execute a versions command.
pub async fn execute(args: VersionsArgs, ctx: &CommandContext) -> Result<()> {
    match args.command {
        VersionsCommands::List(list_args) => list(list_args, ctx).await,
    }
}

async fn list(args: ListArgs, ctx: &CommandContext) -> Result<()> {
    let project_id = ctx.project_id()?;
    let service = ctx.template_service()?;

    info!(project = %project_id, limit = args.limit, "Listing template versions");
    let listed = service.list_versions(&project_id, args.limit).await?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listed)?),
        OutputFormat::Table => {
            if listed.versions.is_empty() {
                println!("No versions found for project {project_id}.");
            } else {
                print!("{}", display::format_versions_table(&listed.versions));
            }
        }
    }
    Ok(())
}
