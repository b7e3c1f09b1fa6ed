//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`wr setup`, `wr run`)
//! - Shared config path resolution
//! - Consistent global flag handling

pub mod completions;
pub mod dispatcher;
pub mod list;
pub mod run;
pub mod setup;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
