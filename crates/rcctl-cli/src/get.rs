//! `rcctl get`: fetch the current or a historical template.

use anyhow::{Context, Result};
use clap::Parser;
use rcctl_core::ProjectConfig;
use rcctl_proto::{ConfigTemplate, VersionNumber};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::context::CommandContext;
use crate::display;

/// Arguments for the get subcommand.
#[derive(Parser, Debug)]
pub struct GetArgs {
    /// Fetch this version instead of the current template
    #[arg(long = "version-number", value_name = "N")]
    pub version_number: Option<VersionNumber>,

    /// Write the template to FILE instead of printing it
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write the template to the path recorded by `rcctl init`
    #[arg(long, conflicts_with = "output")]
    pub save: bool,
}

/// Where the fetched template goes: `-o FILE`, the recorded template path
/// for `--save`, or stdout.
fn destination(args: &GetArgs, config: &ProjectConfig) -> Result<Option<PathBuf>> {
    if args.save {
        let path = config.template_path().ok_or_else(|| {
            anyhow::anyhow!(
                "No template path recorded. Run `rcctl init` or set `remoteconfig.template` in rcctl.yml."
            )
        })?;
        return Ok(Some(path));
    }
    Ok(args.output.clone())
}

pub async fn execute(args: GetArgs, ctx: &CommandContext) -> Result<()> {
    let project_id = ctx.project_id()?;
    let destination = destination(&args, &ctx.config)?;
    let service = ctx.template_service()?;

    info!(project = %project_id, version = ?args.version_number, "Fetching template");
    let template = service.get_template(&project_id, args.version_number).await?;

    match destination {
        Some(path) => {
            write_template(&path, &template)?;
            display::success(&format!(
                "Wrote {} to {}",
                display::describe_template(&template),
                path.display()
            ));
        }
        None => println!("{}", serde_json::to_string_pretty(&template)?),
    }
    Ok(())
}

/// Writes a template as pretty JSON with a trailing newline.
pub fn write_template(path: &Path, template: &ConfigTemplate) -> Result<()> {
    let mut rendered = serde_json::to_string_pretty(template)?;
    rendered.push('\n');
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, rendered).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(output: Option<&str>, save: bool) -> GetArgs {
        GetArgs {
            version_number: None,
            output: output.map(PathBuf::from),
            save,
        }
    }

    #[test]
    fn test_save_uses_recorded_template_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ProjectConfig::default();
        config.project_dir = dir.path().to_path_buf();
        config.remoteconfig.template = Some("rc/template.json".to_string());

        assert_eq!(
            destination(&args(None, true), &config).unwrap(),
            Some(dir.path().join("rc/template.json"))
        );
        assert_eq!(
            destination(&args(Some("out.json"), false), &config).unwrap(),
            Some(PathBuf::from("out.json"))
        );
        assert_eq!(destination(&args(None, false), &config).unwrap(), None);
    }

    #[test]
    fn test_save_without_recorded_path_is_an_error() {
        let err = destination(&args(None, true), &ProjectConfig::default()).unwrap_err();
        assert!(err.to_string().contains("No template path recorded"));
    }

    #[test]
    fn test_write_template_writes_the_fetched_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("rc.json");
        let raw = json!({
            "conditions": [],
            "parameters": {
                "flag": { "defaultValue": { "value": "on" }, "conditionalValues": {} }
            },
            "version": {
                "versionNumber": "7",
                "updateTime": "2020-08-07T23:11:41.629000Z"
            },
            "etag": "etag-7"
        });
        let template: ConfigTemplate = serde_json::from_value(raw.clone()).unwrap();

        write_template(&path, &template).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with('\n'));
        let written: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(written, raw);
    }
}
