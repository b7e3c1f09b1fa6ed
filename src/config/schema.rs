//! `wr.yml` schema.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Project name used when `wr.yml` does not set one.
pub const UNKNOWN_PROJECT: &str = "unknown-project";

/// Root configuration loaded from `wr.yml`.
///
/// Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrConfig {
    /// Selects the setup profile.
    pub project_name: Option<String>,

    /// Named shell commands, in file order.
    #[serde(deserialize_with = "null_as_empty")]
    pub commands: IndexMap<String, String>,
}

/// A bare `commands:` key means no commands.
fn null_as_empty<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

impl WrConfig {
    /// Project name, or `unknown-project`.
    pub fn project_name(&self) -> &str {
        self.project_name.as_deref().unwrap_or(UNKNOWN_PROJECT)
    }

    /// Look up a named command.
    pub fn command(&self, name: &str) -> Option<&str> {
        self.commands.get(name).map(String::as_str)
    }

    /// Command names, in file order.
    pub fn command_names(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }
}
