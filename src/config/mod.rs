//! Project configuration (`wr.yml`).
//!
//! - Schema definitions in [`schema`]
//! - File loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use wr_cli::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("wr.yml");
//! fs::write(&path, "project_name: omnibus\ncommands:\n  test: pytest\n").unwrap();
//!
//! let config = load_config(&path).unwrap();
//! assert_eq!(config.project_name(), "omnibus");
//! assert_eq!(config.command("test"), Some("pytest"));
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, parse_config, resolve_config_path, CONFIG_FILE};
pub use schema::{WrConfig, UNKNOWN_PROJECT};
