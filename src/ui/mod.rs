//! User interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI/headless environments
//! - [`MockUI`] for capturing output in tests
//!
//! Setup steps receive the UI as a [`SharedUi`] handle at construction
//! instead of reaching for a process-wide console.
//!
//! # Example
//!
//! ```
//! use wr_cli::ui::{shared, MockUI, UserInterface};
//!
//! let ui = shared(MockUI::new());
//! ui.borrow_mut().success("Setup complete!");
//! assert!(ui.borrow().has_success("Setup complete!"));
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod progress;
pub mod prompts;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use progress::{format_counter, format_duration};
pub use prompts::prompt_user;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, WrTheme};

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;
use crate::runner::RunReport;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a prompt and get user input.
    fn prompt(&mut self, prompt: &Prompt) -> Result<String>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Announce a step about to run, e.g. `(3/6) → Install uv - ...`.
    fn show_step(&mut self, current: usize, total: usize, name: &str, description: &str);

    /// Show a step that was skipped because it is already complete.
    fn show_skipped(&mut self, current: usize, total: usize, name: &str);

    /// Show a boxed command + output block for a failed command.
    fn show_error_block(&mut self, command: &str, output: &str, hint: Option<&str>);

    /// Show the per-step summary of a setup run.
    fn show_run_summary(&mut self, report: &RunReport);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Shared handle to the UI.
///
/// Execution is single-threaded; steps and the CLI layer take turns
/// borrowing the same UI.
pub type SharedUi = Rc<RefCell<dyn UserInterface>>;

/// Wrap a UI so it can be handed out as a [`SharedUi`].
///
/// Returns the concrete handle; it coerces to `SharedUi` on use, and
/// tests keep the concrete type to inspect captured output.
pub fn shared<U: UserInterface + 'static>(ui: U) -> Rc<RefCell<U>> {
    Rc::new(RefCell::new(ui))
}

/// A prompt to show to the user.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Unique key for the prompt (used for env overrides and mocks).
    pub key: String,
    /// The question to display.
    pub question: String,
    /// The type of prompt.
    pub prompt_type: PromptType,
    /// Default value if user just presses enter.
    pub default: Option<String>,
}

impl Prompt {
    /// Free-form text prompt.
    pub fn input(key: &str, question: &str) -> Self {
        Self {
            key: key.to_string(),
            question: question.to_string(),
            prompt_type: PromptType::Input,
            default: None,
        }
    }

    /// Hidden-input prompt for tokens and passwords.
    pub fn secret(key: &str, question: &str) -> Self {
        Self {
            key: key.to_string(),
            question: question.to_string(),
            prompt_type: PromptType::Secret,
            default: None,
        }
    }
}

/// The type of prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptType {
    /// Free-form text input.
    Input,
    /// Input that is not echoed to the terminal.
    Secret,
}
