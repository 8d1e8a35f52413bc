//! Per-invocation state shared by the API-backed commands.

use anyhow::{Context as _, Result};
use rcctl_core::{HttpApiClient, ProjectConfig, RollbackResolver, TemplateService};
use rcctl_proto::ProjectId;
use std::sync::Arc;

/// Resolved configuration plus the global flags that override it.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: ProjectConfig,
    pub project_flag: Option<String>,
    pub token: Option<String>,
}

impl CommandContext {
    pub fn new(config: ProjectConfig, project_flag: Option<String>, token: Option<String>) -> Self {
        Self {
            config,
            project_flag,
            token,
        }
    }

    /// Project from `--project`, falling back to the project file.
    pub fn project_id(&self) -> Result<ProjectId> {
        self.project_flag
            .as_deref()
            .or(self.config.project.as_deref())
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(ProjectId::from)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No project selected. Pass --project <id> or set `project` in rcctl.yml."
                )
            })
    }

    pub fn template_service(&self) -> Result<TemplateService> {
        let client = HttpApiClient::new(self.token.clone(), &self.config.auth.token_env)
            .context("Failed to initialize the Remote Config API client")?;
        Ok(TemplateService::new(Arc::new(client))
            .with_origin(self.config.api.origin.clone())
            .with_timeout(self.config.api_timeout()))
    }

    pub fn rollback_resolver(&self) -> Result<RollbackResolver> {
        Ok(RollbackResolver::new(self.template_service()?))
    }
}
