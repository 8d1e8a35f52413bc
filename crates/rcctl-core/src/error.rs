//! Error types for rcctl-core.

use rcctl_proto::{PRODUCT_NAME, ProjectId};
use std::path::PathBuf;
use thiserror::Error;

/// Failures of a single request to the Remote Config REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with a non-success status.
    #[error("HTTP Error {status}: {message}")]
    Status { status: u16, message: String },

    /// The request never produced a response (connect, TLS, timeout).
    #[error("Failed to make request to {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not the JSON document we expected.
    #[error("Unable to parse JSON response")]
    Decode(#[from] serde_json::Error),

    /// An authenticated request was attempted without an access token.
    #[error("Authentication required: set {env_var} or pass --token")]
    MissingCredentials { env_var: String },

    #[error("Failed to build HTTP client")]
    ClientInit(#[source] reqwest::Error),
}

impl ApiError {
    /// HTTP status of a rejected request, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failures of the template read operations.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to get {product} template for project {project_id}. ", product = PRODUCT_NAME)]
    Get {
        project_id: ProjectId,
        #[source]
        source: ApiError,
    },

    #[error("Failed to get Remote Config template versions for project {project_id}. ")]
    ListVersions {
        project_id: ProjectId,
        #[source]
        source: ApiError,
    },
}

/// Raised by [`crate::RollbackResolver::rollback_template`] for every failure.
///
/// The message is fixed per project; the underlying failure is available
/// through [`RollbackError::cause`] or `std::error::Error::source`.
#[derive(Debug, Error)]
#[error("Failed to rollback {product} template for project {project_id}. ", product = PRODUCT_NAME)]
pub struct RollbackError {
    project_id: ProjectId,
    #[source]
    cause: RollbackFailure,
}

impl RollbackError {
    pub(crate) fn new(project_id: ProjectId, cause: RollbackFailure) -> Self {
        Self { project_id, cause }
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn cause(&self) -> &RollbackFailure {
        &self.cause
    }

    pub fn into_cause(self) -> RollbackFailure {
        self.cause
    }
}

/// Which step of the rollback sequence failed.
#[derive(Debug, Error)]
pub enum RollbackFailure {
    /// The target version could not be determined.
    #[error(transparent)]
    Resolution(#[from] ResolutionFailure),

    /// The rollback call itself failed, including server-side rejection of
    /// the requested version.
    #[error(transparent)]
    Invocation(ApiError),
}

#[derive(Debug, Error)]
pub enum ResolutionFailure {
    /// Fetching the current template failed.
    #[error(transparent)]
    Lookup(#[from] TemplateError),

    /// The current template carries no version number to step back from.
    #[error("current template for project {project_id} has no version number")]
    MissingVersion { project_id: ProjectId },
}

/// Failures loading or updating the `rcctl.yml` project file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in project file")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid project configuration: {0}")]
    Invalid(String),
}

/// Failures of the interactive setup helper.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Prompt failed")]
    Prompt(#[source] std::io::Error),

    #[error("Failed to create template file {path}")]
    TemplateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
