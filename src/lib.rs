//! wr - Development environment bootstrapper.
//!
//! wr runs an ordered list of idempotent setup steps (toolchain checks,
//! tool installs, auth configuration, dependency sync) and runs named
//! shell commands defined in a project's `wr.yml`.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `wr.yml` loading and schema
//! - [`error`] - Error types and result aliases
//! - [`runner`] - Setup step orchestration and run reports
//! - [`shell`] - Process execution
//! - [`steps`] - The setup step trait and concrete steps
//! - [`tasks`] - Named command execution
//! - [`ui`] - Prompts and terminal output
//!
//! # Example
//!
//! ```
//! use wr_cli::runner::{run_steps, RunConfiguration};
//! use wr_cli::steps::{SetupStep, StepExecution};
//!
//! struct AlreadyDone;
//!
//! impl SetupStep for AlreadyDone {
//!     fn name(&self) -> &str { "Already done" }
//!     fn description(&self) -> &str { "Nothing to do" }
//!     fn is_completed(&self) -> bool { true }
//!     fn execute(&self) -> wr_cli::Result<StepExecution> {
//!         Ok(StepExecution::success())
//!     }
//! }
//!
//! let steps: Vec<Box<dyn SetupStep>> = vec![Box::new(AlreadyDone)];
//! let report = run_steps(steps, RunConfiguration::default());
//! assert!(report.success());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod shell;
pub mod steps;
pub mod tasks;
pub mod ui;

pub use error::{Result, WrError};
