//! Toolchain presence checks: Node.js and Python.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::Result;
use crate::shell::Platform;

use super::{SetupStep, StepContext, StepExecution};

/// Minimum supported Python as (major, minor).
pub const MIN_PYTHON: (u32, u32) = (3, 11);

/// Interpreter names tried in order.
pub const PYTHON_CANDIDATES: &[&str] = &["python3.11", "python3", "python"];

static PYTHON_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Python (\d+)\.(\d+)").expect("PYTHON_VERSION must compile")
});

/// Extract `(major, minor)` from `python --version` output.
pub fn parse_python_version(output: &str) -> Option<(u32, u32)> {
    let caps = PYTHON_VERSION.captures(output)?;
    let major = caps.get(1)?.as_str().parse().ok()?;
    let minor = caps.get(2)?.as_str().parse().ok()?;
    Some((major, minor))
}

/// Verifies Node.js is on PATH.
#[derive(Debug)]
pub struct CheckNode {
    ctx: StepContext,
}

impl CheckNode {
    pub fn new(ctx: StepContext) -> Self {
        Self { ctx }
    }

    fn install_hint(&self) -> &'static str {
        match self.ctx.platform {
            Platform::MacOs => "Node.js not found. Install with: brew install node",
            Platform::Linux => "Node.js not found. Install with: sudo apt-get install nodejs npm",
            Platform::Windows => "Node.js not found. Download from https://nodejs.org/",
            Platform::Other => "Node.js not found. Please install Node.js from https://nodejs.org/",
        }
    }
}

impl SetupStep for CheckNode {
    fn name(&self) -> &str {
        "Check Node.js"
    }

    fn description(&self) -> &str {
        "Verify Node.js is installed"
    }

    fn is_completed(&self) -> bool {
        self.ctx.has_tool("node")
    }

    fn execute(&self) -> Result<StepExecution> {
        if self.is_completed() {
            let version = self.ctx.capture("node", &["--version"])?;
            if version.success {
                self.ctx.detail(&format!("Found Node.js {}", version.stdout));
            }
            return Ok(StepExecution::success());
        }

        let hint = self.install_hint();
        self.ctx.warning(hint);
        Ok(StepExecution::failure(hint))
    }
}

/// Verifies a Python 3.11+ interpreter is on PATH.
#[derive(Debug)]
pub struct CheckPython {
    ctx: StepContext,
}

impl CheckPython {
    pub fn new(ctx: StepContext) -> Self {
        Self { ctx }
    }

    /// First candidate interpreter that reports a supported version,
    /// together with its version line.
    pub fn find_interpreter(&self) -> Option<(&'static str, String)> {
        PYTHON_CANDIDATES.iter().find_map(|&candidate| {
            if !self.ctx.has_tool(candidate) {
                return None;
            }
            let result = self.ctx.capture(candidate, &["--version"]).ok()?;
            if !result.success {
                return None;
            }
            // Python 2 prints its version on stderr.
            let output = format!("{}\n{}", result.stdout, result.stderr);
            let version = parse_python_version(&output)?;
            debug!("{} reports Python {}.{}", candidate, version.0, version.1);
            if version >= MIN_PYTHON {
                Some((candidate, output.trim().to_string()))
            } else {
                None
            }
        })
    }

    fn install_hint(&self) -> &'static str {
        match self.ctx.platform {
            Platform::MacOs => "Python 3.11+ not found. Install with: brew install python@3.11",
            Platform::Linux => "Python 3.11+ not found. Install with: sudo apt-get install python3.11",
            Platform::Windows => "Python 3.11+ not found. Download from https://python.org/",
            Platform::Other => "Python 3.11+ not found. Please install Python 3.11+",
        }
    }
}

impl SetupStep for CheckPython {
    fn name(&self) -> &str {
        "Check Python"
    }

    fn description(&self) -> &str {
        "Verify Python 3.11+ is installed"
    }

    fn is_completed(&self) -> bool {
        self.find_interpreter().is_some()
    }

    fn execute(&self) -> Result<StepExecution> {
        if let Some((_, version)) = self.find_interpreter() {
            self.ctx.detail(&format!("Found {}", version));
            return Ok(StepExecution::success());
        }

        let hint = self.install_hint();
        self.ctx.warning(hint);
        Ok(StepExecution::failure(hint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockProcess;
    use crate::steps::test_support::Fixture;

    #[test]
    fn parses_python_versions() {
        assert_eq!(parse_python_version("Python 3.11.13"), Some((3, 11)));
        assert_eq!(parse_python_version("Python 3.9.1"), Some((3, 9)));
        assert_eq!(parse_python_version("\nPython 2.7.18"), Some((2, 7)));
        assert_eq!(parse_python_version("command not found"), None);
    }

    #[test]
    fn python_3_10_is_rejected() {
        // Would pass a naive "Python 3.1" substring test.
        assert!(parse_python_version("Python 3.10.4").unwrap() < MIN_PYTHON);
        assert!(parse_python_version("Python 3.12.0").unwrap() >= MIN_PYTHON);
    }

    #[test]
    fn check_node_completed_when_on_path() {
        let fx = Fixture::new(MockProcess::new().with_tool("node"));
        assert!(CheckNode::new(fx.context()).is_completed());

        let fx = Fixture::new(MockProcess::new());
        assert!(!CheckNode::new(fx.context()).is_completed());
    }

    #[test]
    fn check_node_reports_version_when_verbose() {
        let process = MockProcess::new().with_tool("node");
        process.respond_stdout("node --version", "v20.11.0");
        let fx = Fixture::new(process);

        let step = CheckNode::new(fx.context().with_verbose(true));
        assert!(step.execute().unwrap().is_success());
        assert!(fx.ui.borrow().has_message("Found Node.js v20.11.0"));
    }

    #[test]
    fn check_node_fails_with_platform_hint() {
        let fx = Fixture::new(MockProcess::new());
        let step = CheckNode::new(fx.context().with_platform(Platform::MacOs));

        let outcome = step.execute().unwrap();
        assert!(!outcome.is_success());
        assert!(outcome.detail().unwrap().contains("brew install node"));
        assert!(fx.ui.borrow().has_warning("brew install node"));
    }

    #[test]
    fn check_python_skips_old_interpreters() {
        let process = MockProcess::new().with_tool("python3").with_tool("python");
        process.respond_stdout("python3 --version", "Python 3.10.12");
        process.respond_stdout("python --version", "Python 3.12.1");
        let fx = Fixture::new(process);

        let step = CheckPython::new(fx.context());
        let (found, version) = step.find_interpreter().unwrap();
        assert_eq!(found, "python");
        assert_eq!(version, "Python 3.12.1");
        assert!(step.is_completed());
    }

    #[test]
    fn check_python_reads_version_from_stderr() {
        let process = MockProcess::new().with_tool("python3.11");
        process.respond(
            "python3.11 --version",
            crate::shell::CommandResult::success(
                String::new(),
                "Python 3.11.9".to_string(),
                Default::default(),
            ),
        );
        let fx = Fixture::new(process);

        assert!(CheckPython::new(fx.context()).is_completed());
    }

    #[test]
    fn check_python_fails_when_none_qualify() {
        let process = MockProcess::new().with_tool("python");
        process.respond_stdout("python --version", "Python 2.7.18");
        let fx = Fixture::new(process);

        let step = CheckPython::new(fx.context());
        assert!(!step.is_completed());

        let outcome = step.execute().unwrap();
        assert!(outcome
            .detail()
            .unwrap()
            .contains("sudo apt-get install python3.11"));
    }
}
