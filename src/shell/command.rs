//! Shell command execution.

use crate::error::{Result, WrError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Exit code (None if killed by signal or never started).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Result for a program that is not installed.
    pub fn not_found(program: &str) -> Self {
        Self::failure(
            None,
            String::new(),
            format!("Command not found: {}", program),
            Duration::ZERO,
        )
    }
}

/// How a child process is wired up.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    pub cwd: Option<PathBuf>,
    /// Pipe stdout instead of inheriting the terminal.
    pub capture_stdout: bool,
    /// Pipe stderr instead of inheriting the terminal.
    pub capture_stderr: bool,
}

impl CommandOptions {
    /// Options that capture both streams.
    pub fn captured(cwd: Option<&Path>) -> Self {
        Self {
            cwd: cwd.map(Path::to_path_buf),
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        }
    }

    /// Options that hand the terminal to the child.
    pub fn inherited(cwd: Option<&Path>) -> Self {
        Self {
            cwd: cwd.map(Path::to_path_buf),
            ..Default::default()
        }
    }
}

/// Execute a command line through the user's shell.
pub fn execute(command: &str, options: &CommandOptions) -> Result<CommandResult> {
    let mut cmd = Command::new(detect_shell());
    cmd.arg(shell_flag(super::is_ci()));
    cmd.arg(command);

    run(cmd, command, options)
}

/// Execute a program directly with an argument vector.
///
/// A program that cannot be found is reported as a failed result rather
/// than an error, so callers can treat "tool missing" as an ordinary
/// negative answer.
pub fn execute_program(program: &str, args: &[&str], options: &CommandOptions) -> Result<CommandResult> {
    let mut cmd = Command::new(program);
    cmd.args(args);

    let label = std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");

    match run(cmd, &label, options) {
        Err(WrError::CommandFailed { reason, .. }) if reason.kind() == ErrorKind::NotFound => {
            Ok(CommandResult::not_found(program))
        }
        other => other,
    }
}

fn run(mut cmd: Command, label: &str, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    cmd.stdout(if options.capture_stdout {
        Stdio::piped()
    } else {
        Stdio::inherit()
    });
    cmd.stderr(if options.capture_stderr {
        Stdio::piped()
    } else {
        Stdio::inherit()
    });

    tracing::debug!("Executing: {}", label);

    let output = cmd.output().map_err(|reason| WrError::CommandFailed {
        command: label.to_string(),
        reason,
    })?;

    let duration = start.elapsed();

    let stdout = if options.capture_stdout {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    } else {
        String::new()
    };

    let stderr = if options.capture_stderr {
        String::from_utf8_lossy(&output.stderr).trim().to_string()
    } else {
        String::new()
    };

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        tracing::debug!("'{}' exited with {:?}", label, output.status.code());
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

/// Detect the current shell.
fn detect_shell() -> String {
    if cfg!(target_os = "windows") {
        std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    } else {
        std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string())
    }
}

/// Flag that makes the shell run a command string.
///
/// On Unix this is an interactive login shell so tools added to PATH by
/// rc files (nvm, pyenv, a freshly installed uv) resolve. CI has no TTY
/// for job control and gets a plain login shell.
fn shell_flag(ci: bool) -> &'static str {
    if cfg!(target_os = "windows") {
        "/C"
    } else if ci {
        "-lc"
    } else {
        "-lic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execute_successful_command() {
        let result = execute("echo hello", &CommandOptions::captured(None)).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[test]
    fn execute_failing_command() {
        let result = execute("exit 3", &CommandOptions::captured(None)).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[test]
    fn execute_with_cwd() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("marker.txt"), "").unwrap();

        let cmd = if cfg!(target_os = "windows") {
            "dir /b"
        } else {
            "ls"
        };

        let result = execute(cmd, &CommandOptions::captured(Some(temp.path()))).unwrap();

        assert!(result.success);
        assert!(result.stdout.contains("marker.txt"));
    }

    #[test]
    fn execute_program_trims_output() {
        let result =
            execute_program("echo", &["  padded  "], &CommandOptions::captured(None)).unwrap();
        assert_eq!(result.stdout, "padded");
    }

    #[test]
    fn execute_program_missing_binary_is_failed_result() {
        let result = execute_program(
            "wr-definitely-not-installed",
            &["--version"],
            &CommandOptions::captured(None),
        )
        .unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, None);
        assert_eq!(
            result.stderr,
            "Command not found: wr-definitely-not-installed"
        );
    }

    #[cfg(unix)]
    #[test]
    fn execute_program_spawn_error_keeps_io_kind() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::TempDir::new().unwrap();
        let script = temp.path().join("not-executable");
        std::fs::write(&script, "#!/bin/sh\necho hi\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o644)).unwrap();

        let err = execute_program(
            script.to_str().unwrap(),
            &[],
            &CommandOptions::captured(None),
        )
        .unwrap_err();

        match err {
            WrError::CommandFailed { command, reason } => {
                assert_eq!(command, script.display().to_string());
                assert_eq!(reason.kind(), ErrorKind::PermissionDenied);
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn shell_flag_drops_interactive_mode_in_ci() {
        assert_eq!(shell_flag(true), "-lc");
        assert_eq!(shell_flag(false), "-lic");
    }

    #[test]
    fn not_found_result_has_no_exit_code() {
        let result = CommandResult::not_found("uv");
        assert!(!result.success);
        assert_eq!(result.exit_code, None);
        assert_eq!(result.stderr, "Command not found: uv");
    }
}
