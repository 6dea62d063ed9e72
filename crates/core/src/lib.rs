//! ansible-run - build command lines for Ansible run configurations
//!
//! This crate provides functionality to:
//! - Build POSIX-style argument vectors from option mappings
//! - Split and join free-text argument strings
//! - Activate Python virtualenvs, select config files and wrap commands in `docker run`
//! - Chain several commands through one shell invocation
//! - Turn `ansible-galaxy` and `ansible-playbook` run configurations into commands
pub mod command;
pub mod config;
pub mod error;
pub mod runner;

// Re-export commonly used types
pub use error::{Error, Result};

// Re-export main API components
pub use command::{
    BaseEnv, DockerRun, EnvValue, Environment, InputFile, OptionValue, Options, PosixCommand,
    and_commands, shell,
};
pub use config::{AnsibleSettings, GalaxyConfig, InstallType, PlaybookConfig, RunFile};
pub use runner::{AnsibleRunner, Prepared};
