use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::command::{BaseEnv, DockerRun, PosixCommand};
use crate::error::Result;

/// How Ansible is installed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallType {
    /// Executables live next to `location`
    #[default]
    System,
    /// `location` is a Python virtualenv
    Virtualenv,
    /// Ansible runs inside `docker_image`
    Docker,
}

/// Project-wide Ansible settings shared by all run configurations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct AnsibleSettings {
    pub install_type: InstallType,
    /// Path of the `ansible` executable (system) or virtualenv directory
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<String>,
    pub docker_exe: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_image: Option<String>,
    /// Virtualenv directory inside the docker image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_venv: Option<String>,
}

impl Default for AnsibleSettings {
    fn default() -> Self {
        Self {
            install_type: InstallType::System,
            location: "ansible".to_string(),
            config_file: None,
            docker_exe: "docker".to_string(),
            docker_image: None,
            docker_venv: None,
        }
    }
}

impl AnsibleSettings {
    /// Resolve the executable to use for an Ansible command.
    ///
    /// A system install looks for `command` in the same directory as the
    /// configured `ansible` executable. Virtualenv and docker installs rely
    /// on `PATH`, see [`AnsibleSettings::apply`].
    pub fn resolve_executable(&self, command: &str) -> String {
        match self.install_type {
            InstallType::System => Path::new(&self.location)
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .map(|dir| dir.join(command).to_string_lossy().into_owned())
                .unwrap_or_else(|| command.to_string()),
            InstallType::Virtualenv | InstallType::Docker => command.to_string(),
        }
    }

    /// Apply the install and config file settings to a command.
    pub fn apply(&self, command: PosixCommand, base: &BaseEnv) -> Result<PosixCommand> {
        let mut command = command;
        if self.install_type == InstallType::Virtualenv {
            command = command.with_python_venv(&self.location, base);
        }
        if let Some(config_file) = self.config_file.as_deref().filter(|s| !s.is_empty()) {
            command = command.with_config_file(config_file);
        }
        if self.install_type == InstallType::Docker {
            let mut run = DockerRun::new(self.docker_image.clone().unwrap_or_default())
                .with_docker_exe(self.docker_exe.clone());
            if let Some(venv) = self.docker_venv.as_deref().filter(|s| !s.is_empty()) {
                run = run.with_venv(venv);
            }
            debug!("Running in docker image {:?}", run.image);
            command = command.as_docker_run(&run, base)?;
        }
        Ok(command)
    }
}
