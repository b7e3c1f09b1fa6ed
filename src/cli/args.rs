//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// wr - Bootstrap development environments and run project commands.
#[derive(Debug, Parser)]
#[command(name = "wr")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true, arg_required_else_help = true)]
pub struct Cli {
    /// Path to wr.yml (relative paths resolve against the project root)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Set up the development environment
    Setup(SetupArgs),

    /// Run a command defined in wr.yml
    Run(RunArgs),

    /// List configured commands and setup steps
    List,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `setup` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SetupArgs {
    /// Force re-run setup steps even if already completed
    #[arg(short, long)]
    pub force: bool,

    /// Never prompt; answer prompts from WR_PROMPT_* variables
    #[arg(long, env = "WR_NON_INTERACTIVE")]
    pub non_interactive: bool,
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RunArgs {
    /// Name of the command under `commands:` in wr.yml
    pub name: String,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_setup_with_force() {
        let cli = Cli::try_parse_from(["wr", "setup", "--force"]).unwrap();
        match cli.command {
            Commands::Setup(args) => assert!(args.force),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["wr", "run", "test", "-v", "-c", "alt.yml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("alt.yml")));
        match cli.command {
            Commands::Run(args) => assert_eq!(args.name, "test"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn run_requires_a_name() {
        assert!(Cli::try_parse_from(["wr", "run"]).is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["wr", "list", "-q", "-v"]).is_err());
    }

    #[test]
    fn parses_completions_shell() {
        let cli = Cli::try_parse_from(["wr", "completions", "zsh"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Completions(CompletionsArgs { shell: Shell::Zsh })
        ));
    }
}
