//! # rcctl-core
//!
//! Core functionality for rcctl.
//!
//! This crate provides:
//! - The `ApiClient` seam and its reqwest implementation
//! - Template reads (current template, version history)
//! - Template rollback with version resolution
//! - Project configuration loading and the setup helper

mod api;
mod config;
mod error;
mod rollback;
mod setup;
mod templates;
#[cfg(test)]
mod test_support;

pub use api::{
    ApiClient, ApiRequest, ApiResponse, DEFAULT_ORIGIN, DEFAULT_TIMEOUT, DEFAULT_TOKEN_ENV,
    HttpApiClient, Method,
};
pub use config::{
    ApiConfig, AuthConfig, PROJECT_FILE, ProjectConfig, RemoteConfigSection, write_template_entry,
};
pub use error::{
    ApiError, ConfigError, ResolutionFailure, RollbackError, RollbackFailure, SetupError,
    TemplateError,
};
pub use rollback::{RollbackResolver, RollbackTarget};
pub use setup::{
    DEFAULT_TEMPLATE_PATH, FixedAnswers, Prompter, SetupOutcome, TEMPLATE_PATH_PROMPT, run_setup,
};
pub use templates::{DEFAULT_VERSION_LIMIT, TemplateService};
