//! `ansible-playbook` run configurations

use serde::{Deserialize, Serialize};

use crate::command::{InputFile, OptionValue, Options, PosixCommand};
use crate::error::Result;

use super::settings::AnsibleSettings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct PlaybookConfig {
    pub command: String,
    pub playbooks: Vec<String>,
    pub inventory: Vec<String>,
    /// Host pattern passed as `--limit`
    pub host: String,
    pub tags: Vec<String>,
    /// `key=value` pairs passed as `--extra-vars`
    pub variables: Vec<String>,
    pub raw_opts: String,
    pub work_dir: String,
    /// Whether the run needs a become password
    pub ask_become_pass: bool,
}

impl Default for PlaybookConfig {
    fn default() -> Self {
        Self {
            command: "ansible-playbook".to_string(),
            playbooks: Vec::new(),
            inventory: Vec::new(),
            host: String::new(),
            tags: Vec::new(),
            variables: Vec::new(),
            raw_opts: String::new(),
            work_dir: String::new(),
            ask_become_pass: false,
        }
    }
}

impl PlaybookConfig {
    /// Build the playbook command.
    ///
    /// A become password is fed to the process on stdin; the returned
    /// [`InputFile`] backs it and must outlive the spawn.
    pub fn build(
        &self,
        settings: &AnsibleSettings,
        password: Option<&str>,
    ) -> Result<(PosixCommand, Option<InputFile>)> {
        let mut options = Options::new()
            .with("limit", OptionValue::non_empty(self.host.as_str()))
            .with("inventory", OptionValue::non_empty(self.inventory.join(",")))
            .with("tags", OptionValue::non_empty(self.tags.join(",")))
            .with("extra-vars", OptionValue::non_empty(self.variables.join(" ")));

        let mut command = PosixCommand::new(settings.resolve_executable(&self.command), None::<String>)?;
        let mut input = None;
        if let Some(password) = password {
            let (with_input, file) = command.with_input(password)?;
            command = with_input;
            input = Some(file);
            options.insert("ask-become-pass", true);
        }

        command = command
            .add_options(&options)
            .add_raw_args(&self.raw_opts)
            .add_args(self.playbooks.iter().cloned());
        if !self.work_dir.trim().is_empty() {
            command = command.with_working_dir(&self.work_dir);
        }
        Ok((command, input))
    }
}
