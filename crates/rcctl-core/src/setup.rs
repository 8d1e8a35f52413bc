//! Project setup: choose the template file and record it in `rcctl.yml`.

use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::write_template_entry;
use crate::error::SetupError;

/// Template path offered when the user just presses enter.
pub const DEFAULT_TEMPLATE_PATH: &str = "remoteconfig.template.json";

pub const TEMPLATE_PATH_PROMPT: &str = "What is the path file you want to store your template.json?";

/// Source of answers for the setup questions.
pub trait Prompter {
    /// Asks for free text. Returns `default` when the answer is empty.
    fn input(&mut self, message: &str, default: &str) -> Result<String, SetupError>;

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, SetupError>;
}

/// Answers setup questions without a terminal (`rcctl init --template ... --force`).
#[derive(Debug, Clone)]
pub struct FixedAnswers {
    template: Option<String>,
    overwrite: bool,
}

impl FixedAnswers {
    pub fn new(template: Option<String>, overwrite: bool) -> Self {
        Self {
            template,
            overwrite,
        }
    }
}

impl Prompter for FixedAnswers {
    fn input(&mut self, _message: &str, default: &str) -> Result<String, SetupError> {
        Ok(self
            .template
            .clone()
            .unwrap_or_else(|| default.to_string()))
    }

    fn confirm(&mut self, _message: &str, _default: bool) -> Result<bool, SetupError> {
        Ok(self.overwrite)
    }
}

/// What setup did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupOutcome {
    /// The path as entered; this exact string is stored in the project file.
    pub template: String,
    pub project_file: PathBuf,
    /// False when the file existed and the user chose to keep it.
    pub template_written: bool,
}

/// Runs the setup questions and records the answer in `project_file`.
///
/// The template path is resolved against the project file's directory. The
/// template file is created empty unless it already exists and the user
/// declines to overwrite it; the chosen path is recorded either way, after
/// the template file is in place.
pub fn run_setup(
    prompter: &mut dyn Prompter,
    project_file: &Path,
) -> Result<SetupOutcome, SetupError> {
    let answer = prompter.input(TEMPLATE_PATH_PROMPT, DEFAULT_TEMPLATE_PATH)?;
    let template = if answer.trim().is_empty() {
        DEFAULT_TEMPLATE_PATH.to_string()
    } else {
        answer
    };

    let project_dir = project_file.parent().unwrap_or_else(|| Path::new(""));
    let template_file = project_dir.join(&template);
    let template_written = if template_file.exists() {
        let message = format!(
            "File {template} already exists. Do you want to overwrite the default Remote Config Template file path?"
        );
        let overwrite = prompter.confirm(&message, false)?;
        if overwrite {
            info!(template = %template, "Overwriting template file");
        }
        overwrite
    } else {
        true
    };

    if template_written {
        create_empty_template(&template_file)?;
    }
    write_template_entry(project_file, &template)?;

    Ok(SetupOutcome {
        template,
        project_file: project_file.to_path_buf(),
        template_written,
    })
}

fn create_empty_template(template_file: &Path) -> Result<(), SetupError> {
    let failed = |source| SetupError::TemplateFile {
        path: template_file.to_path_buf(),
        source,
    };
    if let Some(parent) = template_file.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(failed)?;
    }
    std::fs::write(template_file, "").map_err(failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PROJECT_FILE, ProjectConfig};
    use tempfile::TempDir;

    /// Replays scripted answers and records the questions asked.
    struct ScriptedPrompter {
        inputs: Vec<String>,
        confirms: Vec<bool>,
        asked: Vec<String>,
    }

    impl ScriptedPrompter {
        fn new(inputs: &[&str], confirms: &[bool]) -> Self {
            Self {
                inputs: inputs.iter().rev().map(|s| (*s).to_string()).collect(),
                confirms: confirms.iter().rev().copied().collect(),
                asked: Vec::new(),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn input(&mut self, message: &str, default: &str) -> Result<String, SetupError> {
            self.asked.push(message.to_string());
            let answer = self.inputs.pop().expect("unexpected input prompt");
            Ok(if answer.is_empty() {
                default.to_string()
            } else {
                answer
            })
        }

        fn confirm(&mut self, message: &str, _default: bool) -> Result<bool, SetupError> {
            self.asked.push(message.to_string());
            Ok(self.confirms.pop().expect("unexpected confirm prompt"))
        }
    }

    #[test]
    fn test_default_path_is_used_for_empty_answer() {
        let dir = TempDir::new().unwrap();
        let mut prompter = ScriptedPrompter::new(&[""], &[]);

        let outcome = run_setup(&mut prompter, &dir.path().join(PROJECT_FILE)).unwrap();

        assert_eq!(outcome.template, DEFAULT_TEMPLATE_PATH);
        assert!(outcome.template_written);
        assert_eq!(prompter.asked, vec![TEMPLATE_PATH_PROMPT.to_string()]);
        assert!(dir.path().join(DEFAULT_TEMPLATE_PATH).exists());

        let config = ProjectConfig::from_file(dir.path().join(PROJECT_FILE)).unwrap();
        assert_eq!(config.remoteconfig.template.as_deref(), Some(DEFAULT_TEMPLATE_PATH));
    }

    #[test]
    fn test_new_path_creates_empty_file_without_confirm() {
        let dir = TempDir::new().unwrap();
        let mut prompter = ScriptedPrompter::new(&["config/rc.json"], &[]);

        let outcome = run_setup(&mut prompter, &dir.path().join(PROJECT_FILE)).unwrap();

        assert_eq!(outcome.template, "config/rc.json");
        let written = std::fs::read_to_string(dir.path().join("config/rc.json")).unwrap();
        assert!(written.is_empty());
        assert_eq!(prompter.asked.len(), 1);
    }

    #[test]
    fn test_existing_file_declined_keeps_contents_but_records_path() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("rc.json"), r#"{"parameters":{}}"#).unwrap();
        let mut prompter = ScriptedPrompter::new(&["rc.json"], &[false]);

        let outcome = run_setup(&mut prompter, &dir.path().join(PROJECT_FILE)).unwrap();

        assert!(!outcome.template_written);
        assert_eq!(prompter.asked.len(), 2);
        assert!(prompter.asked[1].starts_with("File rc.json already exists."));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("rc.json")).unwrap(),
            r#"{"parameters":{}}"#
        );
        let config = ProjectConfig::from_file(&outcome.project_file).unwrap();
        assert_eq!(config.remoteconfig.template.as_deref(), Some("rc.json"));
    }

    #[test]
    fn test_existing_file_confirmed_is_overwritten() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("rc.json"), "old").unwrap();
        let mut prompter = ScriptedPrompter::new(&["rc.json"], &[true]);

        let outcome = run_setup(&mut prompter, &dir.path().join(PROJECT_FILE)).unwrap();

        assert!(outcome.template_written);
        assert_eq!(std::fs::read_to_string(dir.path().join("rc.json")).unwrap(), "");
    }

    #[test]
    fn test_fixed_answers_fall_back_to_default() {
        let mut answers = FixedAnswers::new(None, false);
        assert_eq!(
            answers.input(TEMPLATE_PATH_PROMPT, DEFAULT_TEMPLATE_PATH).unwrap(),
            DEFAULT_TEMPLATE_PATH
        );
        assert!(!answers.confirm("overwrite?", true).unwrap());
    }

    #[test]
    fn test_setup_preserves_existing_project_keys() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(PROJECT_FILE), "project: demo\n").unwrap();
        let mut answers = FixedAnswers::new(Some("rc.json".to_string()), true);

        run_setup(&mut answers, &dir.path().join(PROJECT_FILE)).unwrap();

        let config = ProjectConfig::from_file(dir.path().join(PROJECT_FILE)).unwrap();
        assert_eq!(config.project.as_deref(), Some("demo"));
        assert_eq!(config.remoteconfig.template.as_deref(), Some("rc.json"));
    }

    #[test]
    fn test_template_is_resolved_next_to_project_file() {
        let dir = TempDir::new().unwrap();
        let project_file = dir.path().join("staging.yml");
        let mut answers = FixedAnswers::new(Some("rc.json".to_string()), false);

        let outcome = run_setup(&mut answers, &project_file).unwrap();

        assert_eq!(outcome.project_file, project_file);
        assert!(dir.path().join("rc.json").exists());
        assert!(!dir.path().join(PROJECT_FILE).exists());
        let config = ProjectConfig::from_file(&project_file).unwrap();
        assert_eq!(config.remoteconfig.template.as_deref(), Some("rc.json"));
    }

    #[test]
    fn test_failed_template_write_records_nothing() {
        let dir = TempDir::new().unwrap();
        // A regular file where the template's parent directory should go
        std::fs::write(dir.path().join("blocker"), "").unwrap();
        let mut answers = FixedAnswers::new(Some("blocker/rc.json".to_string()), false);

        let err = run_setup(&mut answers, &dir.path().join(PROJECT_FILE)).unwrap_err();

        assert!(matches!(err, SetupError::TemplateFile { .. }));
        assert!(!dir.path().join(PROJECT_FILE).exists());
    }
}
