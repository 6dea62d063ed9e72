//! Run configurations and project settings

pub mod file;
pub mod galaxy;
pub mod playbook;
pub mod settings;

pub use file::{RunConfiguration, RunFile, RunKind};
pub use galaxy::GalaxyConfig;
pub use playbook::PlaybookConfig;
pub use settings::{AnsibleSettings, InstallType};
