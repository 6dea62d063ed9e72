use anyhow::{Context, Result, bail};
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info};

use super::load_runner;
use crate::display::print_command_breakdown;

pub fn run_command(file: Option<&Path>, name: &str, dry_run: bool, become_pass_stdin: bool) -> Result<()> {
    let runner = load_runner(file)?;
    debug!("Running configuration: {}", name);

    let password = if become_pass_stdin && runner.needs_password(name)? {
        Some(read_password()?)
    } else {
        None
    };
    let prepared = runner.prepare(name, password.as_deref())?;
    let command = &prepared.command;

    if dry_run {
        print_command_breakdown(command);
        return Ok(());
    }

    let line = command.to_command_string();
    info!("Running: {}", line);
    if let Some(dir) = command.working_dir() {
        info!("Working directory: {}", dir.display());
    }
    let status = command
        .to_process()?
        .status()
        .with_context(|| format!("Failed to execute: {line}"))?;
    // The input file has to live until the process is done with it.
    drop(prepared);

    if !status.success() {
        std::process::exit(status.code().unwrap_or(1));
    }
    Ok(())
}

fn read_password() -> Result<String> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("Empty become password on stdin");
    }
    Ok(password)
}
