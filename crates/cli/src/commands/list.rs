use anyhow::Result;

use super::load_runner;
use std::path::Path;

pub fn list_command(file: Option<&Path>) -> Result<()> {
    let runner = load_runner(file)?;
    let configurations = &runner.run_file().configurations;
    if configurations.is_empty() {
        println!("No run configurations defined.");
        return Ok(());
    }
    for config in configurations {
        println!("{:<10} {}", config.kind.label(), config.name);
    }
    Ok(())
}
