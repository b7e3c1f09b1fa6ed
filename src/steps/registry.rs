//! Ordered step lists per project.

use std::fmt;

use super::{
    CheckNode, CheckPython, InstallGhstack, InstallLocalPackages, InstallUv, LockPythonVersion,
    SetupGhstack, SetupStep, StepContext, SyncDependencies,
};

/// Which step list a project gets, chosen by `project_name` in `wr.yml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectProfile {
    /// Any project without a dedicated list.
    #[default]
    Default,
    /// The wr CLI itself: adds ghstack.
    WrCli,
    /// Omnibus: adds dependency sync and local packages.
    Omnibus,
}

impl ProjectProfile {
    /// Pick the profile for a project name.
    pub fn from_project_name(name: &str) -> Self {
        match name {
            "wr-cli" => Self::WrCli,
            "omnibus" => Self::Omnibus,
            _ => Self::Default,
        }
    }
}

impl fmt::Display for ProjectProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Default => "default",
            Self::WrCli => "wr-cli",
            Self::Omnibus => "omnibus",
        };
        write!(f, "{}", s)
    }
}

/// Build the ordered steps for `profile`.
pub fn steps_for(profile: ProjectProfile, ctx: &StepContext) -> Vec<Box<dyn SetupStep>> {
    let mut steps: Vec<Box<dyn SetupStep>> = vec![
        Box::new(CheckNode::new(ctx.clone())),
        Box::new(CheckPython::new(ctx.clone())),
        Box::new(InstallUv::new(ctx.clone())),
    ];

    match profile {
        ProjectProfile::Default => {
            steps.push(Box::new(LockPythonVersion::new(ctx.clone())));
        }
        ProjectProfile::WrCli => {
            steps.push(Box::new(InstallGhstack::new(ctx.clone())));
            steps.push(Box::new(SetupGhstack::new(ctx.clone())));
            steps.push(Box::new(LockPythonVersion::new(ctx.clone())));
        }
        ProjectProfile::Omnibus => {
            steps.push(Box::new(LockPythonVersion::new(ctx.clone())));
            steps.push(Box::new(SyncDependencies::new(ctx.clone())));
            steps.push(Box::new(InstallLocalPackages::new(ctx.clone())));
        }
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockProcess;
    use crate::steps::test_support::Fixture;

    fn names(profile: ProjectProfile) -> Vec<String> {
        let fx = Fixture::new(MockProcess::new());
        steps_for(profile, &fx.context())
            .iter()
            .map(|s| s.name().to_string())
            .collect()
    }

    #[test]
    fn profile_from_project_name() {
        assert_eq!(ProjectProfile::from_project_name("wr-cli"), ProjectProfile::WrCli);
        assert_eq!(
            ProjectProfile::from_project_name("omnibus"),
            ProjectProfile::Omnibus
        );
        assert_eq!(
            ProjectProfile::from_project_name("unknown-project"),
            ProjectProfile::Default
        );
    }

    #[test]
    fn default_steps() {
        assert_eq!(
            names(ProjectProfile::Default),
            vec!["Check Node.js", "Check Python", "Install uv", "Lock Python version"]
        );
    }

    #[test]
    fn wr_cli_steps() {
        assert_eq!(
            names(ProjectProfile::WrCli),
            vec![
                "Check Node.js",
                "Check Python",
                "Install uv",
                "Install ghstack",
                "Setup ghstack",
                "Lock Python version",
            ]
        );
    }

    #[test]
    fn omnibus_steps() {
        assert_eq!(
            names(ProjectProfile::Omnibus),
            vec![
                "Check Node.js",
                "Check Python",
                "Install uv",
                "Lock Python version",
                "Sync dependencies",
                "Install local packages",
            ]
        );
    }

    #[test]
    fn profile_display() {
        assert_eq!(ProjectProfile::WrCli.to_string(), "wr-cli");
    }
}
