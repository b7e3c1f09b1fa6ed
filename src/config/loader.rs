//! Configuration file loading.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::schema::WrConfig;
use crate::error::{Result, WrError};

/// Default config file name.
pub const CONFIG_FILE: &str = "wr.yml";

/// Resolve the config path for a project.
///
/// Relative paths are taken relative to the project root.
pub fn resolve_config_path(project_root: &Path, config: Option<&Path>) -> PathBuf {
    let path = config.unwrap_or_else(|| Path::new(CONFIG_FILE));
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}

/// Load `wr.yml` from disk.
pub fn load_config(path: &Path) -> Result<WrConfig> {
    if !path.exists() {
        return Err(WrError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    let config = parse_config(&content, path)?;
    debug!(
        "Loaded {} with {} commands",
        path.display(),
        config.commands.len()
    );
    Ok(config)
}

/// Parse `wr.yml` content. Empty content is an empty config.
pub fn parse_config(content: &str, path: &Path) -> Result<WrConfig> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| WrError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if value.is_null() {
        return Ok(WrConfig::default());
    }

    serde_yaml::from_value(value).map_err(|e| WrError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_missing_config_errors() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("wr.yml");

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, WrError::ConfigNotFound { .. }));
    }

    #[test]
    fn load_config_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("wr.yml");
        fs::write(&path, "project_name: wr-cli\ncommands:\n  hello: echo hi\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.project_name(), "wr-cli");
        assert_eq!(config.command("hello"), Some("echo hi"));
    }

    #[test]
    fn empty_file_is_empty_config() {
        let config = parse_config("", Path::new("wr.yml")).unwrap();
        assert_eq!(config, WrConfig::default());

        let config = parse_config("# just a comment\n", Path::new("wr.yml")).unwrap();
        assert_eq!(config, WrConfig::default());
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let err = parse_config("commands: [unclosed", Path::new("wr.yml")).unwrap_err();
        assert!(matches!(err, WrError::ConfigParseError { .. }));
    }

    #[test]
    fn wrong_shape_is_parse_error() {
        let err = parse_config("commands: just-a-string\n", Path::new("wr.yml")).unwrap_err();
        assert!(err.to_string().contains("wr.yml"));
    }

    #[test]
    fn resolve_relative_and_absolute_paths() {
        let root = Path::new("/work/project");
        assert_eq!(
            resolve_config_path(root, None),
            PathBuf::from("/work/project/wr.yml")
        );
        assert_eq!(
            resolve_config_path(root, Some(Path::new("conf/dev.yml"))),
            PathBuf::from("/work/project/conf/dev.yml")
        );
        assert_eq!(
            resolve_config_path(root, Some(Path::new("/etc/wr.yml"))),
            PathBuf::from("/etc/wr.yml")
        );
    }
}
