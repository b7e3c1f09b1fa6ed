//! Steps built on the uv package manager.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::Context;
use tracing::debug;

use crate::error::{Result, WrError};
use crate::shell::Platform;

use super::{failure_detail, require_tool, SetupStep, StepContext, StepExecution};

/// Arguments that print the interpreter uv resolves, without downloading one.
const CURRENT_PYTHON_ARGS: &[&str] = &[
    "run",
    "--no-project",
    "--no-python-downloads",
    "python",
    "--version",
];

/// Python version used when the project has no `.python-version`.
pub const DEFAULT_PYTHON_VERSION: &str = "3.11";

/// Local packages installed by default.
pub const DEFAULT_LOCAL_PACKAGES: &[&str] = &["omnibus", "parsley"];

const UV_INSTALL_UNIX: &str = "curl -LsSf https://astral.sh/uv/install.sh | sh";
const UV_INSTALL_WINDOWS: &str = "powershell -c \"irm https://astral.sh/uv/install.ps1 | iex\"";

/// Installs uv with the official installer.
#[derive(Debug)]
pub struct InstallUv {
    ctx: StepContext,
}

impl InstallUv {
    pub fn new(ctx: StepContext) -> Self {
        Self { ctx }
    }

    fn installer(&self) -> &'static str {
        match self.ctx.platform {
            Platform::Windows => UV_INSTALL_WINDOWS,
            _ => UV_INSTALL_UNIX,
        }
    }

    /// A uv binary the installer left outside PATH.
    fn stray_binary(&self) -> Option<PathBuf> {
        let binary = match self.ctx.platform {
            Platform::Windows => "uv.exe",
            _ => "uv",
        };
        [".local/bin", ".cargo/bin"]
            .iter()
            .map(|dir| self.ctx.home_dir.join(dir).join(binary))
            .find(|path| path.is_file())
    }
}

impl SetupStep for InstallUv {
    fn name(&self) -> &str {
        "Install uv"
    }

    fn description(&self) -> &str {
        "Install uv package manager"
    }

    fn is_completed(&self) -> bool {
        self.ctx.has_tool("uv")
    }

    fn execute(&self) -> Result<StepExecution> {
        if self.is_completed() {
            return Ok(StepExecution::success());
        }

        let result = self.ctx.interactive(self.installer())?;
        if !result.success {
            let detail = failure_detail(&result);
            self.ctx.error("Failed to install uv");
            self.ctx.detail(&format!("Error: {}", detail));
            return Ok(StepExecution::failure(detail));
        }

        if self.ctx.has_tool("uv") {
            return Ok(StepExecution::success());
        }

        if let Some(path) = self.stray_binary() {
            let dir = path.parent().unwrap_or(path.as_path()).display().to_string();
            self.ctx.warning(&format!(
                "uv was installed to {} but is not on PATH. Add {} to PATH and restart your shell.",
                path.display(),
                dir
            ));
            return Ok(StepExecution::failure(format!("{} is not on PATH", dir)));
        }

        Ok(StepExecution::failure("uv not found on PATH after install"))
    }
}

/// Whether `current` satisfies the `.python-version` target.
///
/// A full `major.minor.patch` target must match exactly; a shorter one
/// matches any release in that series.
pub fn version_matches(current: &str, target: &str) -> bool {
    if current.is_empty() {
        return false;
    }
    if target.matches('.').count() >= 2 {
        current == target
    } else {
        current.starts_with(&format!("{}.", target))
    }
}

/// Installs and pins the project's Python version through uv.
#[derive(Debug)]
pub struct LockPythonVersion {
    ctx: StepContext,
}

impl LockPythonVersion {
    pub fn new(ctx: StepContext) -> Self {
        Self { ctx }
    }

    /// Version named by `.python-version`, or the default when the file
    /// is missing or blank.
    ///
    /// A file that exists but cannot be read is a [`WrError::StepDefect`].
    pub fn target_version(&self) -> Result<String> {
        let path = self.ctx.project_path(".python-version");
        match fs::read_to_string(&path) {
            Ok(content) if !content.trim().is_empty() => Ok(content.trim().to_string()),
            Ok(_) => Ok(DEFAULT_PYTHON_VERSION.to_string()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(DEFAULT_PYTHON_VERSION.to_string()),
            Err(e) => Err(WrError::StepDefect {
                step: self.name().to_string(),
                message: format!("cannot read {}: {}", path.display(), e),
            }),
        }
    }

    /// Version of the interpreter uv currently resolves, e.g. `3.11.13`.
    pub fn current_version(&self) -> Option<String> {
        let result = self
            .ctx
            .capture("uv", CURRENT_PYTHON_ARGS)
            .ok()?;
        if !result.success {
            return None;
        }
        result
            .stdout
            .split_whitespace()
            .nth(1)
            .map(|v| v.to_string())
    }
}

impl SetupStep for LockPythonVersion {
    fn name(&self) -> &str {
        "Lock Python version"
    }

    fn description(&self) -> &str {
        "Install and pin Python version from .python-version file"
    }

    fn is_completed(&self) -> bool {
        if !self.ctx.has_tool("uv") {
            return false;
        }
        let Ok(target) = self.target_version() else {
            return false;
        };
        let current = self.current_version().unwrap_or_default();
        debug!("Python target {} current {:?}", target, current);
        version_matches(&current, &target)
    }

    fn execute(&self) -> Result<StepExecution> {
        if let Some(missing) = require_tool(&self.ctx, "uv") {
            return Ok(missing);
        }

        let target = self.target_version()?;

        let install = self.ctx.capture("uv", &["python", "install", &target])?;
        if !install.success && !install.stderr.to_lowercase().contains("already installed") {
            let detail = failure_detail(&install);
            self.ctx
                .error(&format!("Failed to install Python {}: {}", target, detail));
            return Ok(StepExecution::failure(detail));
        }

        let pin = self.ctx.capture("uv", &["python", "pin", &target])?;
        if pin.success {
            self.ctx
                .detail(&format!("Pinned Python version to {}", target));
            return Ok(StepExecution::success());
        }

        let detail = failure_detail(&pin);
        self.ctx
            .error(&format!("Failed to pin Python version: {}", detail));
        Ok(StepExecution::failure(detail))
    }
}

/// Runs `uv sync` when the lockfile is older than `pyproject.toml`.
#[derive(Debug)]
pub struct SyncDependencies {
    ctx: StepContext,
}

impl SyncDependencies {
    pub fn new(ctx: StepContext) -> Self {
        Self { ctx }
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

impl SetupStep for SyncDependencies {
    fn name(&self) -> &str {
        "Sync dependencies"
    }

    fn description(&self) -> &str {
        "Install and sync project dependencies"
    }

    fn is_completed(&self) -> bool {
        let lock = modified(&self.ctx.project_path("uv.lock"));
        let pyproject = modified(&self.ctx.project_path("pyproject.toml"));
        match (lock, pyproject) {
            (Some(lock), Some(pyproject)) => lock >= pyproject,
            _ => false,
        }
    }

    fn execute(&self) -> Result<StepExecution> {
        if let Some(missing) = require_tool(&self.ctx, "uv") {
            return Ok(missing);
        }

        let result = self.ctx.interactive("uv sync")?;
        if result.success {
            return Ok(StepExecution::success());
        }

        let detail = failure_detail(&result);
        self.ctx
            .error(&format!("Failed to sync dependencies: {}", detail));
        Ok(StepExecution::failure(detail))
    }
}

/// Adds sibling package directories as editable dependencies.
#[derive(Debug)]
pub struct InstallLocalPackages {
    ctx: StepContext,
    packages: Vec<String>,
    description: String,
}

impl InstallLocalPackages {
    /// Install the default package set.
    pub fn new(ctx: StepContext) -> Self {
        let packages = DEFAULT_LOCAL_PACKAGES.iter().map(|p| p.to_string()).collect();
        Self::with_packages(ctx, packages)
    }

    pub fn with_packages(ctx: StepContext, packages: Vec<String>) -> Self {
        let description = format!("Install {} from local directories", packages.join(", "));
        Self {
            ctx,
            packages,
            description,
        }
    }

    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    fn add_package(&self, package: &str) -> Result<bool> {
        let dir = self.ctx.project_path(package);
        if !dir.exists() {
            self.ctx
                .detail(&format!("{}/ directory not found, skipping", package));
            return Ok(false);
        }

        let is_package = dir
            .join("pyproject.toml")
            .try_exists()
            .with_context(|| format!("Failed to inspect {}", dir.display()))?;
        if !is_package {
            self.ctx
                .detail(&format!("{}/ has no pyproject.toml, skipping", package));
            return Ok(false);
        }

        let result = self
            .ctx
            .interactive(&format!("uv add --editable ./{}", package))?;
        if result.success {
            self.ctx
                .detail(&format!("Added {} as editable dependency", package));
            return Ok(true);
        }

        self.ctx.error(&format!(
            "Failed to add {}: {}",
            package,
            failure_detail(&result)
        ));
        Ok(false)
    }
}

impl SetupStep for InstallLocalPackages {
    fn name(&self) -> &str {
        "Install local packages"
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn execute(&self) -> Result<StepExecution> {
        if let Some(missing) = require_tool(&self.ctx, "uv") {
            return Ok(missing);
        }

        let mut added = 0;
        for package in &self.packages {
            if self.add_package(package)? {
                added += 1;
            }
        }

        let none_present = self
            .packages
            .iter()
            .all(|p| !self.ctx.project_path(p).exists());

        if added > 0 || none_present {
            Ok(StepExecution::success())
        } else {
            Ok(StepExecution::failure(format!(
                "no local packages could be added ({})",
                self.packages.join(", ")
            )))
        }
    }
}
