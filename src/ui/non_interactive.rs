//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::{Result, WrError};
use crate::runner::{OutcomeStatus, RunReport};

use super::progress::{format_counter, format_duration};
use super::{OutputMode, Prompt, UserInterface};

/// Prefix of environment variables that answer prompts, e.g.
/// `WR_PROMPT_GITHUB_USERNAME=octocat`.
pub const PROMPT_ENV_PREFIX: &str = "WR_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prints plain text. Prompts are answered from `WR_PROMPT_*`
/// environment variables or the prompt's default, and fail otherwise.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<String> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        if let Some(value) = self.env_overrides.get(&env_key) {
            return Ok(value.trim().to_string());
        }

        if let Some(default) = &prompt.default {
            return Ok(default.clone());
        }

        Err(WrError::Prompt {
            key: prompt.key.clone(),
            message: format!("no default in non-interactive mode (set {})", env_key),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn show_step(&mut self, current: usize, total: usize, name: &str, description: &str) {
        if self.mode.shows_status() {
            println!(
                "{} → {} - {}",
                format_counter(current, total),
                name,
                description
            );
        }
    }

    fn show_skipped(&mut self, current: usize, total: usize, name: &str) {
        if self.mode.shows_status() {
            println!(
                "{} ✓ {} (already completed)",
                format_counter(current, total),
                name
            );
        }
    }

    fn show_error_block(&mut self, command: &str, output: &str, hint: Option<&str>) {
        eprintln!();
        eprintln!("    ┌─ Command ──────────────────────────");
        eprintln!("    │ {}", command);
        if !output.is_empty() {
            eprintln!("    ├─ Output ───────────────────────────");
            for line in output.lines() {
                eprintln!("    │ {}", line);
            }
        }
        eprintln!("    └────────────────────────────────────");
        if let Some(h) = hint {
            eprintln!();
            eprintln!("    Hint: {}", h);
        }
    }

    fn show_run_summary(&mut self, report: &RunReport) {
        if !self.mode.shows_status() {
            return;
        }

        println!();
        println!("  ┌─ Summary ──────────────────────────");
        for outcome in report.outcomes() {
            let right_side = match outcome.status {
                OutcomeStatus::Skipped => "already completed".to_string(),
                _ => format_duration(outcome.duration),
            };
            println!(
                "  │ {} {:<24} {}",
                outcome.status.display_char(),
                outcome.name,
                right_side
            );
        }
        println!("  ├────────────────────────────────────");
        println!(
            "  │ Total: {} · {} succeeded · {} skipped · {} failed",
            format_duration(report.duration()),
            report.count(OutcomeStatus::Succeeded),
            report.count(OutcomeStatus::Skipped),
            report.count(OutcomeStatus::Failed),
        );
        println!("  └────────────────────────────────────");
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_interactive_is_not_interactive() {
        let ui = NonInteractiveUI::new(OutputMode::Normal);
        assert!(!ui.is_interactive());
    }

    #[test]
    fn prompt_uses_env_override() {
        let mut overrides = HashMap::new();
        overrides.insert("WR_PROMPT_GITHUB_USERNAME".to_string(), " octocat ".to_string());
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, overrides);

        let value = ui
            .prompt(&Prompt::input("github_username", "Username?"))
            .unwrap();
        assert_eq!(value, "octocat");
    }

    #[test]
    fn prompt_uses_default() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let mut prompt = Prompt::input("branch", "Branch?");
        prompt.default = Some("main".to_string());

        assert_eq!(ui.prompt(&prompt).unwrap(), "main");
    }

    #[test]
    fn prompt_fails_without_default() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let err = ui
            .prompt(&Prompt::secret("github_token", "Token?"))
            .unwrap_err();
        assert!(err.to_string().contains("WR_PROMPT_GITHUB_TOKEN"));
    }
}
