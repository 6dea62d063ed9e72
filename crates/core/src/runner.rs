//! Main runner that turns named run configurations into commands

use crate::{
    command::{BaseEnv, InputFile, PosixCommand},
    config::{RunFile, RunKind},
    error::{Error, Result},
};
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_TERM: &str = "xterm-256color";

/// A command ready to spawn, with the input file it reads from (if any)
#[derive(Debug)]
pub struct Prepared {
    pub command: PosixCommand,
    /// Keep alive until the process has been spawned
    pub input: Option<InputFile>,
}

pub struct AnsibleRunner {
    run_file: RunFile,
    run_file_path: Option<PathBuf>,
    base: BaseEnv,
}

impl AnsibleRunner {
    /// Load the run file found from the current directory upwards.
    pub fn new() -> Result<Self> {
        let base = BaseEnv::from_process()?;
        let path = RunFile::find_config_file(base.current_dir()).ok_or_else(|| {
            Error::ConfigError(format!(
                "No run configuration file found from {}",
                base.current_dir().display()
            ))
        })?;
        Self::from_path(&path, base)
    }

    pub fn from_path(path: &Path, base: BaseEnv) -> Result<Self> {
        debug!("Loading run configurations from {:?}", path);
        let run_file = RunFile::load_from_file(path)?;
        Ok(Self {
            run_file,
            run_file_path: Some(path.to_path_buf()),
            base,
        })
    }

    pub fn with_run_file(run_file: RunFile, base: BaseEnv) -> Self {
        Self {
            run_file,
            run_file_path: None,
            base,
        }
    }

    pub fn run_file(&self) -> &RunFile {
        &self.run_file
    }

    pub fn run_file_path(&self) -> Option<&Path> {
        self.run_file_path.as_deref()
    }

    /// Whether the named configuration needs a become password.
    pub fn needs_password(&self, name: &str) -> Result<bool> {
        Ok(match &self.run_file.get(name)?.kind {
            RunKind::Playbook(playbook) => playbook.ask_become_pass,
            RunKind::Galaxy(_) => false,
        })
    }

    /// Build the command for a named configuration.
    pub fn prepare(&self, name: &str, password: Option<&str>) -> Result<Prepared> {
        let config = self.run_file.get(name)?;
        let settings = &self.run_file.settings;
        debug!("Preparing {} configuration '{}'", config.kind.label(), name);

        let (command, input) = match &config.kind {
            RunKind::Galaxy(galaxy) => (galaxy.build(settings)?, None),
            RunKind::Playbook(playbook) => {
                if playbook.ask_become_pass && password.is_none() {
                    return Err(Error::ConfigError(format!(
                        "Configuration '{name}' needs a become password"
                    )));
                }
                playbook.build(settings, password.filter(|_| playbook.ask_become_pass))?
            }
        };

        // Before the install settings, so a container gets it as well.
        let command = if command.env().contains("TERM") {
            command
        } else {
            command.with_env("TERM", DEFAULT_TERM)
        };
        let command = settings.apply(command, &self.base)?;
        Ok(Prepared { command, input })
    }
}
