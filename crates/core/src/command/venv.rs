//! Python virtualenv activation and Ansible config file selection

use std::path::Path;

use tracing::debug;

use super::env::{BaseEnv, EnvValue, PATH_LIST_SEPARATOR};
use super::posix::PosixCommand;

/// Variable Ansible reads its config file location from.
pub const ANSIBLE_CONFIG: &str = "ANSIBLE_CONFIG";

impl PosixCommand {
    /// Activate a Python virtualenv for execution.
    ///
    /// Activation prepends the environment's `bin/` directory to `PATH`,
    /// records the environment in `VIRTUAL_ENV`, and unsets `PYTHONHOME` if
    /// it is set. No activation script is run. Relative paths are resolved
    /// against the base environment's working directory.
    pub fn with_python_venv(mut self, venv_path: impl AsRef<Path>, base: &BaseEnv) -> Self {
        let venv = base.absolute(venv_path);
        let bin = venv.join("bin").to_string_lossy().into_owned();
        let venv = venv.to_string_lossy().into_owned();

        let current_path = match self.env().get("PATH") {
            Some(EnvValue::Set(path)) => Some(path.clone()),
            Some(EnvValue::Unset) => None,
            None => base.var("PATH").map(str::to_string),
        };
        let path = match current_path {
            Some(path) if path.split(PATH_LIST_SEPARATOR).next() == Some(bin.as_str()) => path,
            Some(path) if !path.is_empty() => format!("{bin}{PATH_LIST_SEPARATOR}{path}"),
            _ => bin,
        };

        let home_is_set = match self.env().get("PYTHONHOME") {
            Some(value) => value.as_set().is_some(),
            None => base.var("PYTHONHOME").is_some(),
        };

        debug!("Activating virtualenv {} (PATH={})", venv, path);
        let env = self.env_mut();
        env.set("VIRTUAL_ENV", venv);
        env.set("PATH", path);
        if home_is_set {
            env.unset("PYTHONHOME");
        }
        self
    }

    /// Point Ansible at a specific config file.
    pub fn with_config_file(self, config_path: impl AsRef<Path>) -> Self {
        let config_path = config_path.as_ref().to_string_lossy().into_owned();
        self.with_env(ANSIBLE_CONFIG, config_path)
    }
}
