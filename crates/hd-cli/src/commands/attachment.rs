//! Attachment command
//!
//! Inspect stored attachments.

use anyhow::{Context, Result};
use clap::Subcommand;
use hd_core::export::AttachmentStore;
use hd_core::types::AttachmentId;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use super::Workspace;

/// Attachment subcommands
#[derive(Debug, Subcommand)]
pub enum AttachmentCommand {
    /// List stored attachments
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print or save the content of an attachment
    Show {
        /// Attachment ID
        id: AttachmentId,

        /// Write the content to this file
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

/// Execute the attachment command
pub fn execute(cmd: AttachmentCommand, workspace: &Workspace) -> Result<()> {
    use colored::Colorize;

    let store = workspace.attachments()?;

    match cmd {
        AttachmentCommand::List { json } => {
            let attachments = store.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&attachments)?);
                return Ok(());
            }
            if attachments.is_empty() {
                println!("No attachments found.");
                return Ok(());
            }
            for info in &attachments {
                println!(
                    "{:>5}  {:<20}  {:<18}  {:>8} B  {}",
                    info.id.to_string().cyan(),
                    info.name,
                    info.mimetype,
                    info.file_size,
                    info.created_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
                );
            }
        }
        AttachmentCommand::Show { id, output } => {
            let attachment = store
                .get(id)
                .with_context(|| format!("Attachment '{}' not found", id))?;
            let content = attachment.decoded()?;
            match output {
                Some(path) => {
                    fs::write(&path, &content)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("{} Wrote {}", "✓".green(), path.display());
                }
                None => std::io::stdout().write_all(&content)?,
            }
        }
    }

    Ok(())
}
