//! Named commands from `wr.yml`.
//!
//! `wr run <name>` looks the name up under `commands:` and runs the
//! command line through the user's shell in the project root.

use std::path::Path;

use tracing::{debug, info};

use crate::config::WrConfig;
use crate::error::{Result, WrError};
use crate::shell::{CommandResult, ProcessRunner};
use crate::ui::SharedUi;

/// Exit code used when the command did not report one.
const SIGNAL_EXIT_CODE: i32 = 1;

/// Result of running a named command.
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    pub name: String,
    pub command: String,
    pub result: CommandResult,
}

impl TaskOutcome {
    /// Process exit code to propagate.
    pub fn exit_code(&self) -> i32 {
        if self.result.success {
            0
        } else {
            self.result.exit_code.unwrap_or(SIGNAL_EXIT_CODE)
        }
    }
}

/// Run the named command and report the result to the UI.
///
/// Fails with [`WrError::UnknownCommand`] if `name` is not configured.
/// A command that runs but exits non-zero is not an error; check
/// [`TaskOutcome::exit_code`].
pub fn run_task(
    config: &WrConfig,
    name: &str,
    process: &dyn ProcessRunner,
    project_root: &Path,
    ui: &SharedUi,
) -> Result<TaskOutcome> {
    let command = config
        .command(name)
        .ok_or_else(|| WrError::UnknownCommand {
            name: name.to_string(),
            available: config.command_names(),
        })?
        .to_string();

    ui.borrow_mut().message(&format!("Running: {}", command));
    info!("Running command '{}': {}", name, command);

    let result = process.shell(&command, Some(project_root))?;
    debug!("Command '{}' exited with {:?}", name, result.exit_code);

    let outcome = TaskOutcome {
        name: name.to_string(),
        command,
        result,
    };

    let mut ui = ui.borrow_mut();
    if outcome.result.success {
        if !outcome.result.stdout.is_empty() {
            ui.message(&outcome.result.stdout);
        }
        ui.success(&format!("Command '{}' completed successfully", name));
    } else {
        ui.error(&format!(
            "Command '{}' failed with exit code {}",
            name,
            outcome.exit_code()
        ));
        let output = [&outcome.result.stdout, &outcome.result.stderr]
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        ui.show_error_block(&outcome.command, &output, None);
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockProcess;
    use crate::ui::{shared, MockUI};
    use std::time::Duration;

    fn config() -> WrConfig {
        serde_yaml::from_str("commands:\n  test: pytest -q\n  lint: ruff check .\n").unwrap()
    }

    #[test]
    fn unknown_command_lists_available() {
        let ui = shared(MockUI::new());
        let process = MockProcess::new();

        let handle: SharedUi = ui.clone();

        let err = run_task(&config(), "deploy", &process, Path::new("."), &handle).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Command 'deploy' not found. Available commands: test, lint"
        );
        assert!(process.calls().is_empty());
    }

    #[test]
    fn successful_command_prints_output() {
        let ui = shared(MockUI::new());
        let process = MockProcess::new();
        process.respond_stdout("pytest -q", "3 passed");

        let handle: SharedUi = ui.clone();

        let outcome = run_task(&config(), "test", &process, Path::new("."), &handle).unwrap();

        assert_eq!(outcome.exit_code(), 0);
        let ui = ui.borrow();
        assert!(ui.has_message("Running: pytest -q"));
        assert!(ui.has_message("3 passed"));
        assert!(ui.has_success("Command 'test' completed successfully"));
    }

    #[test]
    fn failed_command_propagates_exit_code() {
        let ui = shared(MockUI::new());
        let process = MockProcess::new();
        process.respond(
            "ruff check .",
            CommandResult::failure(
                Some(3),
                "a.py:1: E501".to_string(),
                "found 1 error".to_string(),
                Duration::ZERO,
            ),
        );

        let handle: SharedUi = ui.clone();

        let outcome = run_task(&config(), "lint", &process, Path::new("."), &handle).unwrap();

        assert_eq!(outcome.exit_code(), 3);
        let ui = ui.borrow();
        assert!(ui.has_error("Command 'lint' failed with exit code 3"));
        assert_eq!(
            ui.error_blocks()[0],
            (
                "ruff check .".to_string(),
                "a.py:1: E501\nfound 1 error".to_string(),
                None
            )
        );
    }

    #[test]
    fn killed_command_exits_with_one() {
        let outcome = TaskOutcome {
            name: "x".into(),
            command: "x".into(),
            result: CommandResult::failure(None, String::new(), String::new(), Duration::ZERO),
        };
        assert_eq!(outcome.exit_code(), 1);
    }
}
