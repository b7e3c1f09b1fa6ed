//! Scripted process runner for testing.
//!
//! `MockProcess` implements [`ProcessRunner`] without spawning anything.
//! Tools are "installed" by name, command lines can be given queued
//! results, and every invocation is recorded for later assertion.
//!
//! # Example
//!
//! ```
//! use wr_cli::shell::{CommandResult, MockProcess, ProcessRunner};
//!
//! let shell = MockProcess::new().with_tool("uv");
//! shell.respond("uv sync", CommandResult::success(String::new(), String::new(), Default::default()));
//!
//! assert!(shell.command_exists("uv"));
//! assert!(shell.capture("uv", &["sync"], None).unwrap().success);
//! assert_eq!(shell.calls(), vec!["uv sync".to_string()]);
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;

use super::command::CommandResult;
use super::process::ProcessRunner;

/// Mock process runner for testing.
#[derive(Debug, Default)]
pub struct MockProcess {
    tools: RefCell<HashSet<String>>,
    responses: RefCell<HashMap<String, VecDeque<CommandResult>>>,
    installs: RefCell<HashMap<String, String>>,
    calls: RefCell<Vec<String>>,
}

impl MockProcess {
    /// Create a mock with no tools installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a tool as present on PATH.
    pub fn with_tool(self, tool: &str) -> Self {
        self.add_tool(tool);
        self
    }

    /// Mark a tool as present on PATH.
    pub fn add_tool(&self, tool: &str) {
        self.tools.borrow_mut().insert(tool.to_string());
    }

    /// Queue a result for a command line.
    ///
    /// For [`ProcessRunner::capture`] the key is the program and its
    /// arguments joined by spaces. Queued results are consumed in order;
    /// the last one is repeated once the queue is drained.
    pub fn respond(&self, command: &str, result: CommandResult) {
        self.responses
            .borrow_mut()
            .entry(command.to_string())
            .or_default()
            .push_back(result);
    }

    /// Queue a successful result with the given stdout.
    pub fn respond_stdout(&self, command: &str, stdout: &str) {
        self.respond(
            command,
            CommandResult::success(stdout.to_string(), String::new(), Duration::ZERO),
        );
    }

    /// Queue a failed result with the given exit code and stderr.
    pub fn respond_failure(&self, command: &str, code: i32, stderr: &str) {
        self.respond(
            command,
            CommandResult::failure(Some(code), String::new(), stderr.to_string(), Duration::ZERO),
        );
    }

    /// Make `tool` appear on PATH after `command` runs successfully.
    pub fn installs(&self, command: &str, tool: &str) {
        self.installs
            .borrow_mut()
            .insert(command.to_string(), tool.to_string());
    }

    /// All command lines run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Check whether a command line was run.
    pub fn was_called(&self, command: &str) -> bool {
        self.calls.borrow().iter().any(|c| c == command)
    }

    fn dispatch(&self, command: &str) -> CommandResult {
        self.calls.borrow_mut().push(command.to_string());

        let scripted = {
            let mut responses = self.responses.borrow_mut();
            responses.get_mut(command).and_then(|queue| {
                if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                }
            })
        };

        let result = scripted.unwrap_or_else(|| {
            let program = command.split_whitespace().next().unwrap_or_default();
            if self.tools.borrow().contains(program) {
                CommandResult::success(String::new(), String::new(), Duration::ZERO)
            } else {
                CommandResult::not_found(program)
            }
        });

        if result.success {
            if let Some(tool) = self.installs.borrow().get(command) {
                self.tools.borrow_mut().insert(tool.clone());
            }
        }

        result
    }
}

impl ProcessRunner for MockProcess {
    fn capture(&self, program: &str, args: &[&str], _cwd: Option<&Path>) -> Result<CommandResult> {
        let line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        Ok(self.dispatch(&line))
    }

    fn interactive(&self, command: &str, _cwd: Option<&Path>) -> Result<CommandResult> {
        Ok(self.dispatch(command))
    }

    fn shell(&self, command: &str, _cwd: Option<&Path>) -> Result<CommandResult> {
        Ok(self.dispatch(command))
    }

    fn which(&self, tool: &str) -> Option<PathBuf> {
        if self.tools.borrow().contains(tool) {
            Some(PathBuf::from("/mock/bin").join(tool))
        } else {
            None
        }
    }
}
