use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{AnsibleSettings, GalaxyConfig, PlaybookConfig};
use crate::error::{Error, Result};

pub const CONFIG_FILE_NAMES: [&str; 2] = [".ansible-run.json", "ansible-run.json"];

/// The command-specific part of a run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunKind {
    Galaxy(GalaxyConfig),
    Playbook(PlaybookConfig),
}

impl RunKind {
    pub fn label(&self) -> &'static str {
        match self {
            RunKind::Galaxy(_) => "galaxy",
            RunKind::Playbook(_) => "playbook",
        }
    }
}

/// A named run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfiguration {
    pub name: String,
    #[serde(flatten)]
    pub kind: RunKind,
}

/// Contents of an `.ansible-run.json` file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RunFile {
    #[serde(default)]
    pub settings: AnsibleSettings,
    #[serde(default)]
    pub configurations: Vec<RunConfiguration>,
}

impl RunFile {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let run_file = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse {}: {e}", path.display())))?;
        Ok(run_file)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&RunConfiguration> {
        self.configurations
            .iter()
            .find(|config| config.name == name)
            .ok_or_else(|| Error::UnknownConfiguration(name.to_string()))
    }

    /// Search `start_path` and its ancestors for a run file.
    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        start_path.ancestors().find_map(|dir| {
            CONFIG_FILE_NAMES
                .iter()
                .map(|name| dir.join(name))
                .find(|path| path.exists())
        })
    }
}
