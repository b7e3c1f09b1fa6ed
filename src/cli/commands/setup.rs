//! Setup command implementation.
//!
//! The `wr setup` command runs the project's setup steps.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::info;

use crate::cli::args::SetupArgs;
use crate::config::load_config;
use crate::error::Result;
use crate::runner::{OutcomeStatus, RunConfiguration, RunProgress, RunReport, SetupRunner};
use crate::shell::ProcessRunner;
use crate::steps::{steps_for, ProjectProfile, StepContext};
use crate::ui::SharedUi;

use super::dispatcher::{Command, CommandResult};

/// The setup command implementation.
pub struct SetupCommand {
    project_root: PathBuf,
    config_path: PathBuf,
    args: SetupArgs,
    process: Rc<dyn ProcessRunner>,
    verbose: bool,
    home_dir: Option<PathBuf>,
}

impl SetupCommand {
    /// Create a new setup command.
    pub fn new(
        project_root: &Path,
        config_path: &Path,
        args: SetupArgs,
        process: Rc<dyn ProcessRunner>,
    ) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.to_path_buf(),
            args,
            process,
            verbose: false,
            home_dir: None,
        }
    }

    /// Record full diagnostics for failed steps.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Override the home directory steps write to.
    pub fn with_home_dir(mut self, home_dir: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(home_dir.into());
        self
    }

    /// Get the command arguments.
    pub fn args(&self) -> &SetupArgs {
        &self.args
    }

    fn context(&self, ui: &SharedUi) -> StepContext {
        let ctx = StepContext::new(ui.clone(), self.process.clone(), &self.project_root)
            .with_verbose(self.verbose);
        match &self.home_dir {
            Some(home) => ctx.with_home_dir(home),
            None => ctx,
        }
    }

    fn show_progress(ui: &SharedUi, verbose: bool, progress: RunProgress<'_>) {
        let mut ui = ui.borrow_mut();
        match progress {
            RunProgress::StepStarting {
                name,
                description,
                index,
                total,
            } => ui.show_step(index + 1, total, name, description),
            RunProgress::StepFinished {
                index,
                total,
                outcome,
            } => match outcome.status {
                OutcomeStatus::Skipped => ui.show_skipped(index + 1, total, &outcome.name),
                OutcomeStatus::Succeeded => ui.success(&format!("{} completed", outcome.name)),
                OutcomeStatus::Failed => {
                    ui.error(&format!("{} failed", outcome.name));
                    if verbose {
                        if let Some(detail) = &outcome.detail {
                            ui.message(&format!("  {}", detail));
                        }
                    }
                }
            },
        }
    }

    fn show_result(&self, ui: &SharedUi, report: &RunReport) {
        let mut ui = ui.borrow_mut();
        ui.show_run_summary(report);

        if report.success() {
            ui.success("All setup steps completed successfully!");
            return;
        }

        ui.error(&format!(
            "Failed steps: {}",
            report.failed_steps().join(", ")
        ));
        if self.verbose {
            for outcome in report.outcomes().iter().filter(|o| o.is_failure()) {
                if let Some(detail) = &outcome.detail {
                    ui.message(&format!("  {}: {}", outcome.name, detail));
                }
            }
        }
    }
}

impl Command for SetupCommand {
    fn execute(&self, ui: &SharedUi) -> Result<CommandResult> {
        let config = load_config(&self.config_path)?;
        let project_name = config.project_name();
        let profile = ProjectProfile::from_project_name(project_name);
        info!("Setting up {} with the {} profile", project_name, profile);

        ui.borrow_mut().show_header(&format!(
            "WR CLI Setup\nSetting up {} development environment...",
            project_name
        ));

        let steps = steps_for(profile, &self.context(ui));
        ui.borrow_mut()
            .message(&format!("Running {} setup steps...", steps.len()));

        let run_config = RunConfiguration {
            force: self.args.force,
            verbose: self.verbose,
        };
        let mut runner = SetupRunner::new(steps, run_config);
        let verbose = self.verbose;
        let report = runner.run_with_progress(|progress| Self::show_progress(ui, verbose, progress));

        self.show_result(ui, &report);

        if report.success() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(report.exit_code()))
        }
    }
}
