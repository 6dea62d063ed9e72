//! `ansible-galaxy install` run configurations

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::command::{OptionValue, Options, PosixCommand, and_commands};
use crate::error::Result;

use super::settings::AnsibleSettings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct GalaxyConfig {
    pub command: String,
    /// Requirements file, relative to `work_dir`
    pub requirements: String,
    /// Install dependencies of the requested roles and collections
    pub deps: bool,
    pub collections_dir: String,
    pub roles_dir: String,
    pub force: bool,
    /// Whether the requirements file lists collections
    pub collections: bool,
    /// Whether the requirements file lists roles
    pub roles: bool,
    pub raw_opts: String,
    pub work_dir: String,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            command: "ansible-galaxy".to_string(),
            requirements: String::new(),
            deps: true,
            collections_dir: String::new(),
            roles_dir: String::new(),
            force: false,
            collections: true,
            roles: true,
            raw_opts: String::new(),
            work_dir: String::new(),
        }
    }
}

impl GalaxyConfig {
    /// Build the install command.
    ///
    /// With no custom install directory a single `ansible-galaxy install`
    /// is enough. A custom directory needs the specific `collection install`
    /// and `role install` commands, so those run one after the other in a
    /// shell.
    pub fn build(&self, settings: &AnsibleSettings) -> Result<PosixCommand> {
        let collections_dir = non_blank(&self.collections_dir);
        let roles_dir = non_blank(&self.roles_dir);

        let command = if collections_dir.is_none() && roles_dir.is_none() {
            self.install_command(settings, None, None)?
        } else {
            let mut commands = Vec::new();
            if self.collections {
                commands.push(self.install_command(settings, Some("collection"), collections_dir)?);
            }
            if self.roles {
                commands.push(self.install_command(settings, Some("role"), roles_dir)?);
            }
            debug!("Installing collections and roles separately");
            let mut chained = and_commands(commands)?;
            // Silences warnings about unconfigured directories.
            if let Some(dir) = collections_dir {
                chained = chained.with_env("ANSIBLE_COLLECTIONS_PATHS", dir);
            }
            if let Some(dir) = roles_dir {
                chained = chained.with_env("ANSIBLE_ROLES_PATH", dir);
            }
            chained
        };

        Ok(match non_blank(&self.work_dir) {
            Some(dir) => command.with_working_dir(dir),
            None => command,
        })
    }

    fn install_command(
        &self,
        settings: &AnsibleSettings,
        kind: Option<&str>,
        path: Option<&str>,
    ) -> Result<PosixCommand> {
        let force_option = if self.deps { "force-with-deps" } else { "force" };
        let options = Options::new()
            .with("no-deps", !self.deps)
            .with(force_option, self.force)
            .with("r", OptionValue::non_empty(self.requirements.as_str()))
            .with("p", path);
        let subcommands = kind.into_iter().chain(["install"]);
        Ok(PosixCommand::new(settings.resolve_executable(&self.command), subcommands)?
            .add_options(&options)
            .add_raw_args(&self.raw_opts))
    }
}

fn non_blank(value: &str) -> Option<&str> {
    if value.trim().is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::EnvValue;
    use std::path::Path;

    fn config() -> GalaxyConfig {
        GalaxyConfig {
            requirements: "requirements.yml".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_install_all() {
        let command = config().build(&AnsibleSettings::default()).unwrap();
        insta::assert_snapshot!(command.to_command_string(), @"ansible-galaxy install -r requirements.yml");
    }

    #[test]
    fn test_install_options() {
        let config = GalaxyConfig {
            deps: false,
            force: true,
            raw_opts: "--timeout 30 -vv".to_string(),
            work_dir: "/project".to_string(),
            ..config()
        };
        let command = config.build(&AnsibleSettings::default()).unwrap();
        assert_eq!(
            command.argv(),
            vec![
                "ansible-galaxy",
                "install",
                "--no-deps",
                "--force",
                "-r",
                "requirements.yml",
                "--timeout",
                "30",
                "-vv",
            ]
        );
        assert_eq!(command.working_dir(), Some(Path::new("/project")));
    }

    #[test]
    fn test_force_with_deps() {
        let config = GalaxyConfig { force: true, ..config() };
        let command = config.build(&AnsibleSettings::default()).unwrap();
        assert_eq!(command.args(), ["install", "--force-with-deps", "-r", "requirements.yml"]);
    }

    #[test]
    fn test_separate_install_dirs() {
        let config = GalaxyConfig {
            collections_dir: "collections".to_string(),
            roles_dir: "roles".to_string(),
            ..config()
        };
        let command = config.build(&AnsibleSettings::default()).unwrap();
        assert_eq!(command.executable(), "sh");
        assert_eq!(
            command.args(),
            [
                "-c",
                "ansible-galaxy collection install -r requirements.yml -p collections && ansible-galaxy role install -r requirements.yml -p roles",
            ]
        );
        assert_eq!(
            command.env().get("ANSIBLE_COLLECTIONS_PATHS"),
            Some(&EnvValue::Set("collections".into()))
        );
        assert_eq!(command.env().get("ANSIBLE_ROLES_PATH"), Some(&EnvValue::Set("roles".into())));
    }

    #[test]
    fn test_roles_only() {
        let config = GalaxyConfig {
            roles_dir: "roles".to_string(),
            collections: false,
            ..config()
        };
        let command = config.build(&AnsibleSettings::default()).unwrap();
        assert_eq!(
            command.args(),
            ["-c", "ansible-galaxy role install -r requirements.yml -p roles"]
        );
        assert!(!command.env().contains("ANSIBLE_COLLECTIONS_PATHS"));
    }

    #[test]
    fn test_nothing_to_install() {
        let config = GalaxyConfig {
            roles_dir: "roles".to_string(),
            collections: false,
            roles: false,
            ..config()
        };
        assert!(config.build(&AnsibleSettings::default()).is_err());
    }
}
