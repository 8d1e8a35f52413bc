//! `rcctl rollback`: revert the template to an earlier version.

use anyhow::{Result, bail};
use clap::Parser;
use rcctl_proto::{ProjectId, VersionNumber};
use std::io::IsTerminal;
use tracing::info;

use crate::context::CommandContext;
use crate::{display, prompt};

/// Arguments for the rollback subcommand.
#[derive(Parser, Debug)]
pub struct RollbackArgs {
    /// Version to roll back to (defaults to the version before the current one)
    #[arg(long = "version-number", value_name = "N")]
    pub version_number: Option<VersionNumber>,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub force: bool,
}

fn confirmation_message(project_id: &ProjectId, version: Option<VersionNumber>) -> String {
    match version {
        Some(v) => format!("Roll back the template of project {project_id} to version {v}?"),
        None => format!(
            "Roll back the template of project {project_id} to the version before the current one?"
        ),
    }
}

pub async fn execute(args: RollbackArgs, ctx: &CommandContext) -> Result<()> {
    let project_id = ctx.project_id()?;

    if !args.force {
        if !std::io::stdin().is_terminal() {
            bail!("Refusing to roll back without confirmation in non-interactive mode. Pass --force.");
        }
        let message = confirmation_message(&project_id, args.version_number);
        if !prompt::confirm(&message, false)? {
            println!("Rollback cancelled.");
            return Ok(());
        }
    }

    let resolver = ctx.rollback_resolver()?;
    let template = resolver
        .rollback_template(&project_id, args.version_number)
        .await?;

    info!(project = %project_id, "Rollback complete");
    display::success(&format!(
        "Rolled back project {project_id}: current template is now {}",
        display::describe_template(&template)
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_message_names_target() {
        let project = ProjectId::from("demo");
        assert_eq!(
            confirmation_message(&project, Some(VersionNumber::new(12))),
            "Roll back the template of project demo to version 12?"
        );
        assert!(confirmation_message(&project, None).contains("version before the current one"));
    }
}
