//! Template rollback: resolve the target version, then invoke the rollback.
//!
//! The sequence is linear. With an explicit version the rollback call is
//! issued directly. Without one, the current template is fetched first and
//! the target is its version number minus one. Every failure is reported as
//! a single [`RollbackError`] whose cause keeps the original error.

use rcctl_proto::{ConfigTemplate, ProjectId, VersionNumber};
use tracing::{debug, info};

use crate::error::{ResolutionFailure, RollbackError, RollbackFailure};
use crate::templates::TemplateService;

/// The version a rollback will target.
///
/// Only a `Resolved` target can be handed to the rollback call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollbackTarget {
    /// The caller did not name a version; it must be looked up.
    Pending,
    Resolved(VersionNumber),
}

impl From<Option<VersionNumber>> for RollbackTarget {
    fn from(version: Option<VersionNumber>) -> Self {
        version.map_or(RollbackTarget::Pending, RollbackTarget::Resolved)
    }
}

/// Rolls Remote Config templates back to earlier versions.
///
/// Holds no state between calls; concurrent rollbacks are independent at
/// this layer.
#[derive(Clone)]
pub struct RollbackResolver {
    templates: TemplateService,
}

impl RollbackResolver {
    pub fn new(templates: TemplateService) -> Self {
        Self { templates }
    }

    /// Rolls the project's template back and returns the new current template.
    ///
    /// Issues one request when `version_number` is given and two (lookup, then
    /// rollback) when it is not. The returned template is the rollback
    /// response body, untouched.
    pub async fn rollback_template(
        &self,
        project_id: &ProjectId,
        version_number: Option<VersionNumber>,
    ) -> Result<ConfigTemplate, RollbackError> {
        let target = self
            .resolve(project_id, RollbackTarget::from(version_number))
            .await
            .map_err(|e| RollbackError::new(project_id.clone(), RollbackFailure::Resolution(e)))?;

        info!(project = %project_id, version = %target, "Rolling back template");

        self.templates
            .post_rollback(project_id, target)
            .await
            .map_err(|e| RollbackError::new(project_id.clone(), RollbackFailure::Invocation(e)))
    }

    async fn resolve(
        &self,
        project_id: &ProjectId,
        target: RollbackTarget,
    ) -> Result<VersionNumber, ResolutionFailure> {
        match target {
            RollbackTarget::Resolved(version) => Ok(version),
            RollbackTarget::Pending => {
                let current = self.templates.get_template(project_id, None).await?;
                let current_version = current.version_number().ok_or_else(|| {
                    ResolutionFailure::MissingVersion {
                        project_id: project_id.clone(),
                    }
                })?;
                let previous = current_version.previous();
                debug!(
                    project = %project_id,
                    current = %current_version,
                    target = %previous,
                    "Resolved rollback target from current template"
                );
                Ok(previous)
            }
        }
    }
}
