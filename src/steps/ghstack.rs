//! ghstack installation and GitHub authentication.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::ui::Prompt;

use super::{failure_detail, require_tool, SetupStep, StepContext, StepExecution};

/// ghstack's config file name, relative to the home directory.
pub const GHSTACKRC: &str = ".ghstackrc";

/// Installs ghstack as a uv tool.
#[derive(Debug)]
pub struct InstallGhstack {
    ctx: StepContext,
}

impl InstallGhstack {
    pub fn new(ctx: StepContext) -> Self {
        Self { ctx }
    }
}

impl SetupStep for InstallGhstack {
    fn name(&self) -> &str {
        "Install ghstack"
    }

    fn description(&self) -> &str {
        "Install ghstack for GitHub workflow"
    }

    fn is_completed(&self) -> bool {
        self.ctx.has_tool("ghstack")
    }

    fn execute(&self) -> Result<StepExecution> {
        if self.is_completed() {
            return Ok(StepExecution::success());
        }

        if !self.ctx.has_tool("uv") {
            let msg = "uv not installed, cannot install ghstack";
            self.ctx.error(msg);
            return Ok(StepExecution::failure(msg));
        }

        let result = self.ctx.interactive("uv tool install ghstack")?;
        if result.success {
            return Ok(StepExecution::success());
        }

        let detail = failure_detail(&result);
        self.ctx
            .error(&format!("Failed to install ghstack: {}", detail));
        Ok(StepExecution::failure(detail))
    }
}

/// Writes `~/.ghstackrc` with a GitHub token.
#[derive(Debug)]
pub struct SetupGhstack {
    ctx: StepContext,
}

impl SetupGhstack {
    pub fn new(ctx: StepContext) -> Self {
        Self { ctx }
    }

    pub fn config_path(&self) -> PathBuf {
        self.ctx.home_dir.join(GHSTACKRC)
    }

    /// Ask for a value; `None` when unanswered or blank.
    fn ask(&self, prompt: Prompt) -> Option<String> {
        match self.ctx.prompt(&prompt) {
            Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
            Ok(_) => None,
            Err(e) => {
                debug!("prompt '{}' unanswered: {}", prompt.key, e);
                None
            }
        }
    }
}

/// Render the ghstack config file.
pub fn render_config(token: &str, username: &str) -> String {
    format!(
        "[ghstack]\ngithub_url = github.com\ngithub_oauth = {}\ngithub_username = {}\n",
        token, username
    )
}

fn write_private(path: &Path, contents: &str) -> io::Result<()> {
    fs::write(path, contents)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}

impl SetupStep for SetupGhstack {
    fn name(&self) -> &str {
        "Setup ghstack"
    }

    fn description(&self) -> &str {
        "Configure ghstack with GitHub authentication"
    }

    fn is_completed(&self) -> bool {
        self.config_path().exists()
    }

    fn execute(&self) -> Result<StepExecution> {
        if let Some(missing) = require_tool(&self.ctx, "ghstack") {
            return Ok(missing);
        }

        let path = self.config_path();

        // ghstack asks for credentials itself on first run.
        self.ctx.interactive("ghstack")?;
        if path.exists() {
            return Ok(StepExecution::success());
        }

        self.ctx
            .warning("GitHub Personal Access Token required for ghstack");
        self.ctx
            .warning("Please create a token at: https://github.com/settings/tokens");
        self.ctx.warning("Required permissions: repo (full control)");

        let Some(token) = self.ask(Prompt::secret(
            "github_token",
            "Enter your GitHub Personal Access Token",
        )) else {
            let msg = "No token provided, skipping ghstack setup";
            self.ctx.error(msg);
            return Ok(StepExecution::failure(msg));
        };

        let Some(username) = self.ask(Prompt::input(
            "github_username",
            "Enter your GitHub username",
        )) else {
            let msg = "No username provided, skipping ghstack setup";
            self.ctx.error(msg);
            return Ok(StepExecution::failure(msg));
        };

        if let Err(e) = write_private(&path, &render_config(&token, &username)) {
            let msg = format!("Failed to create {}: {}", GHSTACKRC, e);
            self.ctx.error(&msg);
            return Ok(StepExecution::failure(msg));
        }

        self.ctx.detail(&format!("Created {}", path.display()));
        Ok(StepExecution::success())
    }
}
