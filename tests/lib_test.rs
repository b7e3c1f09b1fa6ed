//! Library integration tests.

use wr_cli::WrError;

#[test]
fn error_types_are_public() {
    let err = WrError::UnknownCommand {
        name: "deploy".into(),
        available: vec!["test".into(), "lint".into()],
    };
    assert_eq!(
        err.to_string(),
        "Command 'deploy' not found. Available commands: test, lint"
    );
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> wr_cli::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use wr_cli::cli::{Cli, Commands};

    let cli = Cli::parse_from(["wr", "setup", "--force"]);

    if let Commands::Setup(args) = cli.command {
        assert!(args.force);
        assert!(!args.non_interactive);
    } else {
        panic!("Expected Setup command");
    }
}

#[test]
fn config_api_is_public() {
    use wr_cli::config::{parse_config, UNKNOWN_PROJECT};

    let config = parse_config(
        "commands:\n  test: pytest\n  lint: ruff check .\n",
        std::path::Path::new("wr.yml"),
    )
    .unwrap();
    assert_eq!(config.project_name(), UNKNOWN_PROJECT);
    assert_eq!(config.command_names(), vec!["test", "lint"]);
}
