//! Project configuration (`rcctl.yml`).

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::api::{DEFAULT_ORIGIN, DEFAULT_TOKEN_ENV};
use crate::error::ConfigError;

/// File name of the per-project configuration.
pub const PROJECT_FILE: &str = "rcctl.yml";

/// Top-level project configuration.
///
/// ```yaml
/// project: my-project
/// remoteconfig:
///   template: remoteconfig.template.json
/// api:
///   origin: https://firebaseremoteconfig.googleapis.com
///   timeout_secs: 30
/// auth:
///   token_env: RCCTL_ACCESS_TOKEN
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project targeted when `--project` is not given.
    pub project: Option<String>,

    pub remoteconfig: RemoteConfigSection,

    pub api: ApiConfig,

    pub auth: AuthConfig,

    /// Directory the config was loaded from; relative paths resolve here.
    #[serde(skip)]
    pub project_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfigSection {
    /// Template file path, stored exactly as entered during setup.
    pub template: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub origin: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Environment variable holding the access token.
    pub token_env: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_env: DEFAULT_TOKEN_ENV.to_string(),
        }
    }
}

impl ProjectConfig {
    /// Loads configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse_yaml(&content)?;
        config.project_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        debug!(path = %path.display(), "Loaded project config");
        Ok(config)
    }

    /// Parses configuration from a YAML string. An empty document yields defaults.
    pub fn parse_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.api.origin.trim().is_empty() {
            return Err(ConfigError::Invalid("api.origin must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Resolves a path relative to the project directory.
    pub fn resolve_path(&self, relative: &str) -> PathBuf {
        let path = Path::new(relative);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_dir.join(path)
        }
    }

    /// The configured template file, resolved against the project directory.
    pub fn template_path(&self) -> Option<PathBuf> {
        self.remoteconfig
            .template
            .as_deref()
            .map(|t| self.resolve_path(t))
    }
}

/// Records `remoteconfig.template` in the project file, creating it if needed.
///
/// Works on the raw YAML mapping so keys rcctl does not know about survive.
pub fn write_template_entry(project_file: &Path, template: &str) -> Result<(), ConfigError> {
    let mut root = if project_file.exists() {
        let content =
            std::fs::read_to_string(project_file).map_err(|source| ConfigError::Read {
                path: project_file.to_path_buf(),
                source,
            })?;
        if content.trim().is_empty() {
            Mapping::new()
        } else {
            match serde_yaml::from_str::<Value>(&content)? {
                Value::Mapping(mapping) => mapping,
                Value::Null => Mapping::new(),
                _ => {
                    return Err(ConfigError::Invalid(format!(
                        "{} must contain a YAML mapping",
                        project_file.display()
                    )));
                }
            }
        }
    } else {
        Mapping::new()
    };

    let section_key = Value::from("remoteconfig");
    let mut section = match root.remove(&section_key) {
        Some(Value::Mapping(mapping)) => mapping,
        _ => Mapping::new(),
    };
    section.insert(Value::from("template"), Value::from(template));
    root.insert(section_key, Value::Mapping(section));

    let rendered = serde_yaml::to_string(&Value::Mapping(root))?;
    std::fs::write(project_file, rendered).map_err(|source| ConfigError::Write {
        path: project_file.to_path_buf(),
        source,
    })?;
    debug!(path = %project_file.display(), template, "Recorded template path");
    Ok(())
}
