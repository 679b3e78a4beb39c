//! Init command
//!
//! Initialize help-docs configuration in a project.

use anyhow::{Context, Result};
use clap::Args;
use hd_core::config::Config;
use std::fs;
use std::path::{Path, PathBuf};

use super::PROJECT_DIR;

/// Arguments for the init command
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(long)]
    pub force: bool,

    /// Directory to initialize (default: current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

/// Execute the init command
pub fn execute(args: InitArgs) -> Result<()> {
    use colored::Colorize;

    let project_dir = args
        .path
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    println!("Initializing help-docs in {}...", project_dir.display());

    let help_docs_dir = project_dir.join(PROJECT_DIR);
    if help_docs_dir.exists() && !args.force {
        eprintln!(
            "{} help-docs already initialized. Use --force to reinitialize.",
            "⚠".yellow()
        );
        return Ok(());
    }

    create_directory_structure(&help_docs_dir)?;
    println!("{} Created {}/ directory", "✓".green(), PROJECT_DIR);

    let config = Config::default().to_toml_string()?;
    let config_path = help_docs_dir.join("config.toml");
    fs::write(&config_path, config).context("Failed to write config.toml")?;
    println!("{} Generated config.toml", "✓".green());

    println!("\n{}", "Next steps:".bold());
    println!("  1. Review and customize {}/config.toml", PROJECT_DIR);
    println!("  2. Add a documentation view:");
    println!("     ");
    println!(
        "     {}",
        "help-docs view add help-faq --key website.help_faq --arch '<t>FAQ</t>'".cyan()
    );
    println!("     ");
    println!("  3. Export it:");
    println!("     ");
    println!("     {}", "help-docs export 1 --output view.xml".cyan());

    Ok(())
}

fn create_directory_structure(help_docs_dir: &Path) -> Result<()> {
    fs::create_dir_all(help_docs_dir)?;
    fs::create_dir_all(help_docs_dir.join("views"))?;
    fs::create_dir_all(help_docs_dir.join("attachments"))?;
    Ok(())
}
