//! Import command
//!
//! Read views back from an exported XML document.

use anyhow::{Context, Result};
use clap::Args;
use hd_core::export::{import_views, parse_export};
use std::fs;
use std::path::PathBuf;

use super::Workspace;

/// Arguments for the import command
#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Exported XML file
    pub file: PathBuf,

    /// Only report what would be imported
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the import command
pub fn execute(args: ImportArgs, workspace: &Workspace) -> Result<()> {
    use colored::Colorize;

    let content = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let views = parse_export(&content)
        .with_context(|| format!("Invalid export document {}", args.file.display()))?;

    if args.dry_run {
        println!("{} view(s) in {}:", views.len(), args.file.display());
        for view in &views {
            println!("  {} ({})", view.name.cyan(), view.key);
        }
        return Ok(());
    }

    let store = workspace.views()?;
    let report = import_views(&store, views)?;
    println!(
        "{} Imported views: {} created, {} updated",
        "✓".green(),
        report.created,
        report.updated
    );
    Ok(())
}
