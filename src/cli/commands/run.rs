//! Run command implementation.
//!
//! The `wr run <name>` command runs a named command from `wr.yml`.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::cli::args::RunArgs;
use crate::config::load_config;
use crate::error::Result;
use crate::shell::ProcessRunner;
use crate::tasks::run_task;
use crate::ui::SharedUi;

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    project_root: PathBuf,
    config_path: PathBuf,
    args: RunArgs,
    process: Rc<dyn ProcessRunner>,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(
        project_root: &Path,
        config_path: &Path,
        args: RunArgs,
        process: Rc<dyn ProcessRunner>,
    ) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.to_path_buf(),
            args,
            process,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &SharedUi) -> Result<CommandResult> {
        let config = load_config(&self.config_path)?;
        let outcome = run_task(
            &config,
            &self.args.name,
            self.process.as_ref(),
            &self.project_root,
            ui,
        )?;

        match outcome.exit_code() {
            0 => Ok(CommandResult::success()),
            code => Ok(CommandResult::failure(code)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WrError;
    use crate::shell::MockProcess;
    use crate::ui::{shared, MockUI};
    use std::fs;
    use tempfile::TempDir;

    fn setup(yaml: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("wr.yml"), yaml).unwrap();
        temp
    }

    fn run(temp: &TempDir, name: &str, process: MockProcess) -> Result<CommandResult> {
        let handle: SharedUi = shared(MockUI::new());
        RunCommand::new(
            temp.path(),
            &temp.path().join("wr.yml"),
            RunArgs {
                name: name.to_string(),
            },
            Rc::new(process),
        )
        .execute(&handle)
    }

    #[test]
    fn runs_configured_command() {
        let temp = setup("commands:\n  test: pytest\n");
        let result = run(&temp, "test", MockProcess::new().with_tool("pytest")).unwrap();
        assert!(result.success);
    }

    #[test]
    fn propagates_command_exit_code() {
        let temp = setup("commands:\n  test: pytest\n");
        let process = MockProcess::new();
        process.respond_failure("pytest", 5, "no tests ran");

        let result = run(&temp, "test", process).unwrap();
        assert_eq!(result, CommandResult::failure(5));
    }

    #[test]
    fn unknown_command_is_an_error() {
        let temp = setup("commands:\n  test: pytest\n");
        let err = run(&temp, "deploy", MockProcess::new()).unwrap_err();
        assert!(matches!(err, WrError::UnknownCommand { .. }));
    }

    #[test]
    fn empty_config_has_no_commands() {
        let temp = setup("");
        let err = run(&temp, "test", MockProcess::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Command 'test' not found. Available commands: "
        );
    }
}
