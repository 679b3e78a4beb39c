//! Export command
//!
//! Export selected views into an XML attachment.

use anyhow::{bail, Context, Result};
use clap::Args;
use hd_core::export::{AttachmentStore, Selection, ViewExporter};
use hd_core::types::ViewId;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use super::Workspace;

/// Arguments for the export command
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Selected view IDs, exported in this order
    pub ids: Vec<ViewId>,

    /// View used when no IDs are selected
    #[arg(long)]
    pub current: Option<ViewId>,

    /// Also write the XML document to this file
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Print the XML document instead of storing an attachment
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    /// Print the resulting action as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the export command
pub fn execute(args: ExportArgs, workspace: &Workspace) -> Result<()> {
    use colored::Colorize;

    let attachments = Arc::new(workspace.attachments()?);
    let exporter = ViewExporter::with_stores(Arc::new(workspace.views()?), attachments.clone())
        .with_config(workspace.config.export.clone());

    let mut selection = Selection::new(args.ids);
    if let Some(current) = args.current {
        selection = selection.with_current(current);
    }

    if args.stdout {
        print!("{}", exporter.render(&selection)?);
        return Ok(());
    }

    let action = match exporter.export_views(&selection) {
        Ok(action) => action,
        Err(e) if e.is_export_rejection() => bail!("Export blocked: {}", e),
        Err(e) => return Err(anyhow::Error::new(e).context("Failed to export views")),
    };

    if let Some(output) = &args.output {
        let attachment = attachments.get(action.res_id)?;
        fs::write(output, attachment.decoded()?)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!("{} Wrote {}", "✓".green(), output.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&action)?);
    } else {
        println!(
            "{} Exported to attachment {} ({})",
            "✓".green(),
            action.res_id.to_string().cyan(),
            workspace.config.export.attachment_name
        );
        println!(
            "  Open with {} in {}",
            action.view_id.dimmed(),
            action.res_model
        );
    }

    Ok(())
}
