//! Host platform detection and PATH lookup.

use std::fmt;
use std::path::{Path, PathBuf};

/// Operating system family of the host.
///
/// Install hints differ per platform (Homebrew on macOS, apt on Linux,
/// installers on Windows), so steps branch on this rather than on
/// `cfg!` directly. That keeps the hint logic testable on any host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
    Other,
}

impl Platform {
    /// Detect the platform this binary is running on.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value to a platform.
    pub fn from_os(os: &str) -> Self {
        match os {
            "macos" => Platform::MacOs,
            "linux" => Platform::Linux,
            "windows" => Platform::Windows,
            _ => Platform::Other,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Platform::MacOs => "macos",
            Platform::Linux => "linux",
            Platform::Windows => "windows",
            Platform::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// Check if running in a CI environment.
///
/// Used to force non-interactive mode in `main()` and to pick
/// non-interactive shell flags. Checks common CI environment variables:
/// `CI`, `GITHUB_ACTIONS`, `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Split the current `PATH` into its entries.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable. Does NOT use
/// the `which` command, whose behavior varies across systems.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    let candidates: Vec<String> = if cfg!(target_os = "windows") {
        vec![
            tool.to_string(),
            format!("{}.exe", tool),
            format!("{}.cmd", tool),
        ]
    } else {
        vec![tool.to_string()]
    };

    for dir in path_entries {
        for name in &candidates {
            let candidate = dir.join(name);
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn create_fake_binary(path: &Path) {
        use std::os::unix::fs::PermissionsExt;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn platform_from_os() {
        assert_eq!(Platform::from_os("macos"), Platform::MacOs);
        assert_eq!(Platform::from_os("linux"), Platform::Linux);
        assert_eq!(Platform::from_os("windows"), Platform::Windows);
        assert_eq!(Platform::from_os("freebsd"), Platform::Other);
    }

    #[test]
    fn platform_display() {
        assert_eq!(Platform::MacOs.to_string(), "macos");
        assert_eq!(Platform::Other.to_string(), "other");
    }

    #[test]
    fn is_ci_detects_environment() {
        // Just ensure function doesn't panic
        let _ = is_ci();
    }

    #[cfg(unix)]
    #[test]
    fn resolve_tool_path_finds_executable() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        create_fake_binary(&bin.join("uv"));

        let found = resolve_tool_path("uv", &[temp.path().join("empty"), bin.clone()]);
        assert_eq!(found, Some(bin.join("uv")));
    }

    #[cfg(unix)]
    #[test]
    fn resolve_tool_path_ignores_non_executable() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("node"), "").unwrap();

        assert!(resolve_tool_path("node", &[temp.path().to_path_buf()]).is_none());
    }

    #[test]
    fn resolve_tool_path_returns_none_when_missing() {
        let temp = TempDir::new().unwrap();
        assert!(resolve_tool_path("ghstack", &[temp.path().to_path_buf()]).is_none());
    }

    #[test]
    fn is_executable_returns_false_for_nonexistent_file() {
        assert!(!is_executable(Path::new("/nonexistent/path/to/file")));
    }
}
