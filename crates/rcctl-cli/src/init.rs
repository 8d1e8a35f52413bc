//! `rcctl init`: choose where the template lives and record it in `rcctl.yml`.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use rcctl_core::{FixedAnswers, Prompter, SetupOutcome, run_setup};
use std::io::IsTerminal;
use std::path::Path;

use crate::display;
use crate::prompt::TerminalPrompter;

/// Arguments for the init subcommand.
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Template file path; skips the path prompt
    #[arg(long, value_name = "PATH")]
    pub template: Option<String>,

    /// Overwrite an existing template file without asking
    #[arg(long)]
    pub force: bool,
}

/// Runs setup against `project_file`; `token_env` is only used for the hint.
pub fn execute(args: InitArgs, project_file: &Path, token_env: &str) -> Result<()> {
    let interactive = args.template.is_none() && !args.force && std::io::stdin().is_terminal();
    let mut prompter: Box<dyn Prompter> = if interactive {
        Box::new(TerminalPrompter::new())
    } else {
        Box::new(FixedAnswers::new(args.template, args.force))
    };

    let outcome = run_setup(prompter.as_mut(), project_file)
        .context("Remote Config setup failed")?;
    report(&outcome, token_env);
    Ok(())
}

fn report(outcome: &SetupOutcome, token_env: &str) {
    display::success(&format!(
        "Recorded template path {} in {}",
        outcome.template.as_str().bold(),
        outcome.project_file.display()
    ));
    if !outcome.template_written {
        println!("{}", "Kept the existing template file.".dimmed());
    }
    println!("\n{}\n{}", "Next steps:".dimmed(), next_steps(token_env));
}

fn next_steps(token_env: &str) -> String {
    format!("  1. Set {token_env}\n  2. Run: rcctl get --save")
}
