use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::env::{EnvValue, Environment};
use super::option::Options;
use super::shell;
use crate::error::{Error, Result};

/// An external process that takes POSIX-style command line arguments
///
/// This is a description of a process, not a running one. Use
/// [`PosixCommand::to_process`] to turn it into a [`std::process::Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosixCommand {
    executable: String,
    args: Vec<String>,
    env: Environment,
    working_dir: Option<PathBuf>,
    stdin: Option<PathBuf>,
}

impl PosixCommand {
    /// Create a command from an executable and its leading subcommand tokens.
    pub fn new<I, S>(executable: impl Into<String>, subcommands: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let executable = executable.into();
        if executable.is_empty() {
            return Err(Error::EmptyExecutable);
        }
        Ok(Self {
            executable,
            args: subcommands.into_iter().map(Into::into).collect(),
            env: Environment::new(),
            working_dir: None,
            stdin: None,
        })
    }

    /// Build a complete command in one step.
    ///
    /// The argument order is `[executable, subcommands..., options...,
    /// arguments...]`.
    pub fn build<I, S, A, T>(
        executable: impl Into<String>,
        subcommands: I,
        options: &Options,
        arguments: A,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        A: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Ok(Self::new(executable, subcommands)?
            .add_options(options)
            .add_args(arguments))
    }

    /// Append POSIX-style options.
    ///
    /// Switches are emitted as a bare flag when on and ignored when off.
    /// Absent options are ignored.
    pub fn add_options(mut self, options: &Options) -> Self {
        self.args.extend(options.to_args());
        self
    }

    /// Append positional arguments.
    pub fn add_args<A, T>(mut self, arguments: A) -> Self
    where
        A: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.args.extend(arguments.into_iter().map(Into::into));
        self
    }

    /// Append arguments parsed from a free-text string.
    pub fn add_raw_args(self, raw: &str) -> Self {
        self.add_args(shell::split(raw))
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<EnvValue>) -> Self {
        self.env.set(key, value);
        self
    }

    pub fn without_env(mut self, key: impl Into<String>) -> Self {
        self.env.unset(key);
        self
    }

    /// Overlay several variables at once; later values win.
    pub fn with_environment(mut self, env: &Environment) -> Self {
        self.env.merge(env);
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Read process input from an existing file.
    pub fn with_stdin_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdin = Some(path.into());
        self
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Arguments following the executable.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The full argument vector, executable first.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 1);
        argv.push(self.executable.clone());
        argv.extend(self.args.iter().cloned());
        argv
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    pub fn stdin(&self) -> Option<&Path> {
        self.stdin.as_deref()
    }

    /// Render the command as a single string that splits back into `argv()`.
    pub fn to_command_string(&self) -> String {
        shell::join(self.argv())
    }

    /// Convert to a process ready to spawn.
    ///
    /// `Unset` overlay entries are removed from the inherited environment.
    pub fn to_process(&self) -> Result<Command> {
        let mut command = Command::new(&self.executable);
        command.args(&self.args);
        for (key, value) in self.env.iter() {
            match value {
                EnvValue::Set(value) => {
                    command.env(key, value);
                }
                EnvValue::Unset => {
                    command.env_remove(key);
                }
            }
        }
        if let Some(ref dir) = self.working_dir {
            command.current_dir(dir);
        }
        if let Some(ref path) = self.stdin {
            command.stdin(Stdio::from(File::open(path)?));
        }
        Ok(command)
    }

    pub(crate) fn into_parts(self) -> (String, Vec<String>, Environment, Option<PathBuf>) {
        (self.executable, self.args, self.env, self.working_dir)
    }

    pub(crate) fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }
}

impl fmt::Display for PosixCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_command_string())
    }
}
