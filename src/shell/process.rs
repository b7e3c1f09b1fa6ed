//! Process execution seam used by setup steps.
//!
//! Steps never spawn processes directly. They go through a
//! [`ProcessRunner`], which lets tests substitute [`MockProcess`]
//! (see [`super::mock`]) for the real system.
//!
//! [`MockProcess`]: super::mock::MockProcess

use std::path::{Path, PathBuf};

use crate::error::Result;

use super::command::{execute, execute_program, CommandOptions, CommandResult};
use super::platform::{parse_system_path, resolve_tool_path};

/// Runs external commands on behalf of steps and tasks.
///
/// All methods are synchronous; the caller blocks until the child exits.
/// No timeout is enforced here.
pub trait ProcessRunner {
    /// Run `program` with `args` and capture stdout and stderr.
    ///
    /// A missing program yields a failed [`CommandResult`] whose stderr
    /// reads `Command not found: <program>`.
    fn capture(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> Result<CommandResult>;

    /// Run a command line through the user's shell with the terminal
    /// attached, so installers can prompt and stream progress.
    fn interactive(&self, command: &str, cwd: Option<&Path>) -> Result<CommandResult>;

    /// Run a command line through the user's shell, capturing output.
    fn shell(&self, command: &str, cwd: Option<&Path>) -> Result<CommandResult>;

    /// Locate an executable on PATH.
    fn which(&self, tool: &str) -> Option<PathBuf>;

    /// Check whether an executable is on PATH.
    fn command_exists(&self, tool: &str) -> bool {
        self.which(tool).is_some()
    }
}

/// [`ProcessRunner`] backed by real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcess;

impl SystemProcess {
    /// Create a new system process runner.
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcess {
    fn capture(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> Result<CommandResult> {
        execute_program(program, args, &CommandOptions::captured(cwd))
    }

    fn interactive(&self, command: &str, cwd: Option<&Path>) -> Result<CommandResult> {
        execute(command, &CommandOptions::inherited(cwd))
    }

    fn shell(&self, command: &str, cwd: Option<&Path>) -> Result<CommandResult> {
        execute(command, &CommandOptions::captured(cwd))
    }

    fn which(&self, tool: &str) -> Option<PathBuf> {
        resolve_tool_path(tool, &parse_system_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_process_captures_program_output() {
        let runner = SystemProcess::new();
        let result = runner.capture("echo", &["hello"], None).unwrap();
        assert!(result.success);
        assert_eq!(result.stdout, "hello");
    }

    #[test]
    fn system_process_missing_program_is_not_found() {
        let runner = SystemProcess::new();
        let result = runner
            .capture("wr-no-such-program", &[], None)
            .unwrap();
        assert!(!result.success);
        assert!(result.stderr.starts_with("Command not found"));
    }

    #[test]
    fn system_process_shell_runs_command_line() {
        let runner = SystemProcess::new();
        let result = runner.shell("echo one && echo two", None).unwrap();
        assert!(result.success);
        assert!(result.stdout.contains("one"));
        assert!(result.stdout.contains("two"));
    }

    #[test]
    fn command_exists_matches_which() {
        let runner = SystemProcess::new();
        assert!(!runner.command_exists("wr-no-such-program"));
    }
}
