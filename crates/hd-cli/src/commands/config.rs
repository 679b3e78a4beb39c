//! Config command
//!
//! Inspect and validate configuration.

use anyhow::Result;
use clap::Subcommand;

use super::Workspace;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the configuration
    Validate,

    /// Print the configuration and data paths
    Path,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, workspace: &Workspace) -> Result<()> {
    use colored::Colorize;

    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&workspace.config)?);
            } else {
                print!("{}", workspace.config.to_toml_string()?);
            }
        }
        ConfigCommand::Validate => {
            workspace.config.validate()?;
            println!(
                "{} {} is valid",
                "✓".green(),
                workspace.config_path.display()
            );
        }
        ConfigCommand::Path => {
            println!("config: {}", workspace.config_path.display());
            println!("data:   {}", workspace.data_dir.display());
        }
    }

    Ok(())
}
