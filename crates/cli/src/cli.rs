use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{list_command, run_command};

#[derive(Parser, Debug)]
#[command(name = "ansible-run")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    /// Run configuration file (defaults to the nearest .ansible-run.json)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the run configurations in the run file
    #[command(visible_alias = "l")]
    List,
    /// Run a named configuration
    #[command(visible_alias = "r")]
    Run {
        /// Name of the run configuration
        name: String,

        /// Print the command without executing it
        #[arg(short, long)]
        dry_run: bool,

        /// Read the become password from the first line of stdin
        #[arg(long)]
        become_pass_stdin: bool,
    },
}

impl Cli {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        let file = self.file.as_deref();
        match self.command {
            Commands::List => list_command(file),
            Commands::Run {
                name,
                dry_run,
                become_pass_stdin,
            } => run_command(file, &name, dry_run, become_pass_stdin),
        }
    }
}
