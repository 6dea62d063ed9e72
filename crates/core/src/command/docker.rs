//! Wrapping a command in `docker run`

use tracing::debug;

use super::env::{BaseEnv, EnvValue};
use super::option::Options;
use super::posix::PosixCommand;
use crate::error::{Error, Result};

pub const DEFAULT_DOCKER_EXE: &str = "docker";

/// Mount point of the local working directory inside the container.
pub const REMOTE_WORK_DIR: &str = "/tmp/ansible";

/// Container settings for [`PosixCommand::as_docker_run`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DockerRun {
    pub image: String,
    /// Python virtualenv directory inside the container
    pub venv: Option<String>,
    /// Local docker executable, `docker` by default
    pub docker_exe: Option<String>,
    /// Container working directory, [`REMOTE_WORK_DIR`] by default
    pub remote_work_dir: Option<String>,
}

impl DockerRun {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            ..Default::default()
        }
    }

    pub fn with_venv(mut self, venv: impl Into<String>) -> Self {
        self.venv = Some(venv.into());
        self
    }

    pub fn with_docker_exe(mut self, exe: impl Into<String>) -> Self {
        self.docker_exe = Some(exe.into());
        self
    }

    pub fn with_remote_work_dir(mut self, dir: impl Into<String>) -> Self {
        self.remote_work_dir = Some(dir.into());
        self
    }
}

/// Whether a variable has to be assigned by a shell inside the container
/// instead of a `--env` flag.
///
/// Passing `PATH` through `--env` breaks permissions in common Ansible
/// images, and docker does not expand `$VAR` references in flag values.
fn needs_shell(key: &str, value: &str) -> bool {
    key == "PATH" || value.contains('$')
}

/// Quote a value for a POSIX shell assignment.
///
/// Values holding a `$` reference are double quoted so the reference expands
/// inside the container. Anything else is taken literally.
fn sh_quote(value: &str) -> String {
    if value.contains('$') {
        let mut quoted = String::with_capacity(value.len() + 2);
        quoted.push('"');
        for ch in value.chars() {
            if matches!(ch, '"' | '\\' | '`') {
                quoted.push('\\');
            }
            quoted.push(ch);
        }
        quoted.push('"');
        quoted
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}

/// Script tail that replaces the shell with the wrapped command, which is
/// passed after the script as `$0 $@` so its arguments are never re-parsed.
const EXEC_ARGS: &str = r#"exec "$0" "$@""#;

impl PosixCommand {
    /// Convert this command to a `docker run` command.
    ///
    /// The command's environment is passed into the container. Variables
    /// for the local `docker` process itself belong on the returned command.
    /// The local working directory (or the base working directory) is mounted
    /// at the remote working directory.
    pub fn as_docker_run(self, run: &DockerRun, base: &BaseEnv) -> Result<PosixCommand> {
        if run.image.is_empty() {
            return Err(Error::EmptyImage);
        }
        let stdin = self.stdin().map(|p| p.to_path_buf());
        let (executable, args, mut env, working_dir) = self.into_parts();

        if let Some(ref venv) = run.venv {
            // The container's paths are POSIX regardless of the local host,
            // and PYTHONHOME is only known inside the container.
            let venv_dir = venv.trim_end_matches('/');
            env.set("VIRTUAL_ENV", venv.as_str());
            env.set("PATH", format!("{venv_dir}/bin:$PATH"));
            env.set("PYTHONHOME", "$PYTHONHOME");
        }

        let mut env_flags = Vec::new();
        let mut prelude = Vec::new();
        for (key, value) in env.iter() {
            match value {
                EnvValue::Unset => prelude.push(format!("unset {key}")),
                EnvValue::Set(value) if needs_shell(key, value) => {
                    prelude.push(format!("export {key}={}", sh_quote(value)))
                }
                EnvValue::Set(value) => env_flags.push(format!("{key}={value}")),
            }
        }

        let (entrypoint, entry_args) = if prelude.is_empty() {
            (executable, args)
        } else {
            prelude.push(EXEC_ARGS.to_string());
            let mut entry_args = vec!["-c".to_string(), prelude.join(" && "), executable];
            entry_args.extend(args);
            ("sh".to_string(), entry_args)
        };

        let local_work_dir = match working_dir {
            Some(ref dir) => base.absolute(dir),
            None => base.current_dir().to_path_buf(),
        };
        let remote_work_dir = run.remote_work_dir.as_deref().unwrap_or(REMOTE_WORK_DIR);
        let docker_exe = run.docker_exe.as_deref().unwrap_or(DEFAULT_DOCKER_EXE);

        let mut command = PosixCommand::new(docker_exe, ["run", "--rm"])?;
        if stdin.is_some() {
            command = command.add_args(["--interactive"]);
        }
        for flag in env_flags {
            command = command.add_args(["--env".to_string(), flag]);
        }
        let options = Options::new()
            .with("workdir", remote_work_dir)
            .with(
                "volume",
                format!("{}:{remote_work_dir}", local_work_dir.display()),
            )
            .with("entrypoint", entrypoint);
        command = command
            .add_options(&options)
            .add_args([run.image.as_str()])
            .add_args(entry_args);

        if let Some(dir) = working_dir {
            command = command.with_working_dir(dir);
        }
        if let Some(path) = stdin {
            command = command.with_stdin_file(path);
        }
        debug!("Docker command: {}", command);
        Ok(command)
    }
}
