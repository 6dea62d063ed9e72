//! Running several commands through one shell invocation

use super::env::Environment;
use super::posix::PosixCommand;
use crate::error::{Error, Result};

/// Shell used for chained and wrapped commands.
pub const SHELL: &str = "sh";

/// Wrap a shell script as `sh -c <script>`.
pub fn shell_command(script: impl Into<String>) -> Result<PosixCommand> {
    PosixCommand::new(SHELL, ["-c".to_string(), script.into()])
}

/// Combine commands into one that runs them in order with `&&`.
///
/// A failing command stops the rest of the chain. Environments are merged
/// in order, later commands winning on conflicts. The first working
/// directory and the first stdin file found are used for the whole chain;
/// the shell hands that input to whichever command reads it first.
pub fn and_commands<I>(commands: I) -> Result<PosixCommand>
where
    I: IntoIterator<Item = PosixCommand>,
{
    let mut lines = Vec::new();
    let mut env = Environment::new();
    let mut working_dir = None;
    let mut stdin = None;
    for command in commands {
        lines.push(command.to_command_string());
        env.merge(command.env());
        if working_dir.is_none() {
            working_dir = command.working_dir().map(|dir| dir.to_path_buf());
        }
        if stdin.is_none() {
            stdin = command.stdin().map(|path| path.to_path_buf());
        }
    }
    if lines.is_empty() {
        return Err(Error::EmptyChain);
    }
    tracing::debug!("Chaining {} command(s)", lines.len());

    let mut chained = shell_command(lines.join(" && "))?.with_environment(&env);
    if let Some(dir) = working_dir {
        chained = chained.with_working_dir(dir);
    }
    if let Some(path) = stdin {
        chained = chained.with_stdin_file(path);
    }
    Ok(chained)
}
