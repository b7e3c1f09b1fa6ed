//! Shell command execution and host detection.

pub mod command;
pub mod mock;
pub mod platform;
pub mod process;

pub use command::{execute, execute_program, CommandOptions, CommandResult};
pub use mock::MockProcess;
pub use platform::{is_ci, parse_system_path, resolve_tool_path, Platform};
pub use process::{ProcessRunner, SystemProcess};
