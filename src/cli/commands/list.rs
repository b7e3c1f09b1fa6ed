//! List command implementation.
//!
//! The `wr list` command lists configured commands and the setup steps
//! for the project's profile.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::config::load_config;
use crate::error::Result;
use crate::shell::ProcessRunner;
use crate::steps::{steps_for, ProjectProfile, StepContext};
use crate::ui::SharedUi;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    project_root: PathBuf,
    config_path: PathBuf,
    process: Rc<dyn ProcessRunner>,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(project_root: &Path, config_path: &Path, process: Rc<dyn ProcessRunner>) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.to_path_buf(),
            process,
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &SharedUi) -> Result<CommandResult> {
        let config = load_config(&self.config_path)?;
        let profile = ProjectProfile::from_project_name(config.project_name());
        let ctx = StepContext::new(ui.clone(), self.process.clone(), &self.project_root);
        let steps = steps_for(profile, &ctx);

        let mut ui = ui.borrow_mut();

        ui.message("Commands:");
        if config.commands.is_empty() {
            ui.message("  (none defined)");
        }
        for (name, command) in &config.commands {
            ui.message(&format!("  {:<16} {}", name, command));
        }

        ui.message("");
        ui.message(&format!(
            "Setup steps for {} ({} profile):",
            config.project_name(),
            profile
        ));
        for (i, step) in steps.iter().enumerate() {
            ui.message(&format!(
                "  {}. {} - {}",
                i + 1,
                step.name(),
                step.description()
            ));
        }

        Ok(CommandResult::success())
    }
}
