//! Setup steps.
//!
//! A setup step is a named, idempotent unit of environment work:
//! verify a toolchain, install a tool, write an auth file, sync
//! dependencies. Every step implements [`SetupStep`]:
//!
//! - [`SetupStep::is_completed`] is a cheap, side-effect-free probe used
//!   by the runner to skip work that is already done
//! - [`SetupStep::execute`] performs the work and reports an expected
//!   failure through [`StepExecution::Failed`]
//!
//! An `Err` from `execute` is a defect, not an expected failure. The
//! [`SetupRunner`](crate::runner::SetupRunner) contains it and records
//! the step as failed.
//!
//! Concrete steps receive their collaborators through a [`StepContext`].
//! [`steps_for`] builds the ordered step list for a project profile.
//!
//! # Example
//!
//! ```
//! use wr_cli::steps::{SetupStep, StepExecution};
//!
//! struct Greet;
//!
//! impl SetupStep for Greet {
//!     fn name(&self) -> &str { "Greet" }
//!     fn description(&self) -> &str { "Say hello" }
//!     fn execute(&self) -> wr_cli::Result<StepExecution> {
//!         Ok(StepExecution::success())
//!     }
//! }
//!
//! assert!(!Greet.is_completed());
//! assert!(Greet.execute().unwrap().is_success());
//! ```

pub mod ghstack;
pub mod registry;
pub mod toolchain;
pub mod uv;

pub use ghstack::{InstallGhstack, SetupGhstack};
pub use registry::{steps_for, ProjectProfile};
pub use toolchain::{CheckNode, CheckPython};
pub use uv::{InstallLocalPackages, InstallUv, LockPythonVersion, SyncDependencies};

use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::Result;
use crate::shell::{CommandResult, Platform, ProcessRunner};
use crate::ui::{Prompt, SharedUi};

/// A unit of idempotent setup work.
pub trait SetupStep {
    /// Short display name, e.g. `Install uv`.
    fn name(&self) -> &str;

    /// One-line description shown when the step runs.
    fn description(&self) -> &str;

    /// Whether the step's goal is already met.
    ///
    /// Must not mutate the environment and must be safe to call any
    /// number of times.
    fn is_completed(&self) -> bool {
        false
    }

    /// Perform the step.
    fn execute(&self) -> Result<StepExecution>;
}

/// Result of executing a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepExecution {
    /// The step reached its goal.
    Succeeded,
    /// The step could not reach its goal.
    Failed {
        /// Diagnostic such as captured stderr.
        detail: Option<String>,
    },
}

impl StepExecution {
    /// Successful execution.
    pub fn success() -> Self {
        Self::Succeeded
    }

    /// Failed execution with a diagnostic.
    pub fn failure(detail: impl Into<String>) -> Self {
        Self::Failed {
            detail: Some(detail.into()),
        }
    }

    /// Map a plain boolean result.
    pub fn from_bool(success: bool) -> Self {
        if success {
            Self::Succeeded
        } else {
            Self::Failed { detail: None }
        }
    }

    /// Check whether the execution succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// The failure diagnostic, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Succeeded => None,
            Self::Failed { detail } => detail.as_deref(),
        }
    }
}

/// Collaborators handed to every concrete step.
#[derive(Clone)]
pub struct StepContext {
    /// Where steps report progress and ask questions.
    pub ui: SharedUi,
    /// Runs external programs.
    pub process: Rc<dyn ProcessRunner>,
    /// Directory the project files live in.
    pub project_root: PathBuf,
    /// The user's home directory.
    pub home_dir: PathBuf,
    /// Host operating system, for install hints.
    pub platform: Platform,
    /// Print extra diagnostics.
    pub verbose: bool,
}

impl StepContext {
    /// Create a context for the current host.
    ///
    /// Falls back to the project root when no home directory can be
    /// determined.
    pub fn new(ui: SharedUi, process: Rc<dyn ProcessRunner>, project_root: &Path) -> Self {
        let home_dir = dirs::home_dir().unwrap_or_else(|| project_root.to_path_buf());
        Self {
            ui,
            process,
            project_root: project_root.to_path_buf(),
            home_dir,
            platform: Platform::current(),
            verbose: false,
        }
    }

    /// Override the home directory.
    pub fn with_home_dir(mut self, home_dir: impl Into<PathBuf>) -> Self {
        self.home_dir = home_dir.into();
        self
    }

    /// Override the platform.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Set verbose output.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Path relative to the project root.
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.join(relative)
    }

    pub fn message(&self, msg: &str) {
        self.ui.borrow_mut().message(msg);
    }

    pub fn warning(&self, msg: &str) {
        self.ui.borrow_mut().warning(msg);
    }

    pub fn error(&self, msg: &str) {
        self.ui.borrow_mut().error(msg);
    }

    /// Print a message only when verbose.
    pub fn detail(&self, msg: &str) {
        if self.verbose {
            self.ui.borrow_mut().message(&format!("  {}", msg));
        }
    }

    /// Ask the user a question.
    pub fn prompt(&self, prompt: &Prompt) -> Result<String> {
        self.ui.borrow_mut().prompt(prompt)
    }

    /// Check whether a tool is on PATH.
    pub fn has_tool(&self, tool: &str) -> bool {
        self.process.command_exists(tool)
    }

    /// Run a program and capture its output, in the project root.
    pub fn capture(&self, program: &str, args: &[&str]) -> Result<CommandResult> {
        self.process
            .capture(program, args, Some(&self.project_root))
    }

    /// Run a command line with the terminal attached, in the project root.
    pub fn interactive(&self, command: &str) -> Result<CommandResult> {
        self.process.interactive(command, Some(&self.project_root))
    }
}

impl std::fmt::Debug for StepContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepContext")
            .field("project_root", &self.project_root)
            .field("home_dir", &self.home_dir)
            .field("platform", &self.platform)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

/// Fail with `<tool> not installed` unless `tool` is on PATH.
pub(crate) fn require_tool(ctx: &StepContext, tool: &str) -> Option<StepExecution> {
    if ctx.has_tool(tool) {
        return None;
    }
    let msg = format!("{} not installed", tool);
    ctx.error(&msg);
    Some(StepExecution::failure(msg))
}

/// Best available diagnostic for a failed command.
pub(crate) fn failure_detail(result: &CommandResult) -> String {
    if !result.stderr.is_empty() {
        return result.stderr.clone();
    }
    match result.exit_code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Shared fixtures for step tests.
#[cfg(test)]
pub(crate) mod test_support {
    use std::cell::RefCell;
    use std::rc::Rc;

    use tempfile::TempDir;

    use super::StepContext;
    use crate::shell::{MockProcess, Platform};
    use crate::ui::{shared, MockUI};

    pub struct Fixture {
        pub ui: Rc<RefCell<MockUI>>,
        pub process: Rc<MockProcess>,
        pub project: TempDir,
        pub home: TempDir,
    }

    impl Fixture {
        pub fn new(process: MockProcess) -> Self {
            Self {
                ui: shared(MockUI::new()),
                process: Rc::new(process),
                project: TempDir::new().unwrap(),
                home: TempDir::new().unwrap(),
            }
        }

        pub fn context(&self) -> StepContext {
            StepContext::new(self.ui.clone(), self.process.clone(), self.project.path())
                .with_home_dir(self.home.path())
                .with_platform(Platform::Linux)
        }
    }
}
