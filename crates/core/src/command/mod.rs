//! Command line construction

pub mod chain;
pub mod docker;
pub mod env;
pub mod input;
pub mod option;
pub mod posix;
pub mod shell;
pub mod venv;

// Re-export commonly used types
pub use chain::{and_commands, shell_command};
pub use docker::DockerRun;
pub use env::{BaseEnv, EnvValue, Environment};
pub use input::InputFile;
pub use option::{OptionValue, Options};
pub use posix::PosixCommand;
