//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::cli::args::{Cli, Commands};
use crate::config::resolve_config_path;
use crate::error::Result;
use crate::shell::{ProcessRunner, SystemProcess};
use crate::ui::SharedUi;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &SharedUi) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Exit status for the `wr` process.
    ///
    /// Codes that do not fit a process exit status become 1 rather than
    /// wrapping around to a value that could read as success.
    pub fn exit_status(&self) -> u8 {
        u8::try_from(self.exit_code).unwrap_or(1)
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    process: Rc<dyn ProcessRunner>,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            process: Rc::new(SystemProcess::new()),
        }
    }

    /// Use a different process runner (for tests).
    pub fn with_process(mut self, process: Rc<dyn ProcessRunner>) -> Self {
        self.process = process;
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &SharedUi) -> Result<CommandResult> {
        let config_path = resolve_config_path(&self.project_root, cli.config.as_deref());

        match &cli.command {
            Commands::Setup(args) => {
                let cmd = super::setup::SetupCommand::new(
                    &self.project_root,
                    &config_path,
                    args.clone(),
                    self.process.clone(),
                )
                .with_verbose(cli.verbose);
                cmd.execute(ui)
            }
            Commands::Run(args) => {
                let cmd = super::run::RunCommand::new(
                    &self.project_root,
                    &config_path,
                    args.clone(),
                    self.process.clone(),
                );
                cmd.execute(ui)
            }
            Commands::List => {
                let cmd = super::list::ListCommand::new(
                    &self.project_root,
                    &config_path,
                    self.process.clone(),
                );
                cmd.execute(ui)
            }
            Commands::Completions(args) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }
}
