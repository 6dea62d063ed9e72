pub mod list;
pub mod run;

pub use list::list_command;
pub use run::run_command;

use ansible_run_core::{AnsibleRunner, BaseEnv};
use anyhow::{Context, Result};
use std::path::Path;

/// Load the runner from an explicit run file, or the nearest one.
pub(crate) fn load_runner(file: Option<&Path>) -> Result<AnsibleRunner> {
    match file {
        Some(path) => {
            let base = BaseEnv::from_process().context("Failed to read the process environment")?;
            AnsibleRunner::from_path(path, base)
                .with_context(|| format!("Failed to load {}", path.display()))
        }
        None => Ok(AnsibleRunner::new()?),
    }
}
