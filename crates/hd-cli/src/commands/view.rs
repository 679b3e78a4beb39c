//! View command
//!
//! Manage stored views.

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use hd_core::types::ViewId;
use hd_core::view::{ViewFilter, ViewRecord, ViewRepository};
use hd_core::xml::Element;
use std::fs;
use std::path::PathBuf;

use super::Workspace;

/// View subcommands
#[derive(Debug, Subcommand)]
pub enum ViewCommand {
    /// Store a new view
    Add {
        /// View name; names starting with `help-` are documentation
        name: String,

        /// Namespacing key
        #[arg(long, short)]
        key: String,

        /// Template markup
        #[arg(long, conflicts_with = "arch_file")]
        arch: Option<String>,

        /// File holding the template markup
        #[arg(long)]
        arch_file: Option<PathBuf>,
    },

    /// List views
    List {
        /// Only documentation views
        #[arg(long, short)]
        documentation: bool,

        /// Only views whose name contains this text
        #[arg(long)]
        name: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a view
    Show {
        /// View ID
        id: ViewId,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rename a view
    Rename {
        /// View ID
        id: ViewId,

        /// New name
        name: String,
    },

    /// Delete a view
    Delete {
        /// View ID
        id: ViewId,

        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,
    },
}

/// Execute the view command
pub fn execute(cmd: ViewCommand, workspace: &Workspace) -> Result<()> {
    let store = workspace.views()?;

    match cmd {
        ViewCommand::Add {
            name,
            key,
            arch,
            arch_file,
        } => add_view(&store, name, key, arch, arch_file),
        ViewCommand::List {
            documentation,
            name,
            json,
        } => list_views(&store, documentation, name, json),
        ViewCommand::Show { id, json } => show_view(&store, id, json),
        ViewCommand::Rename { id, name } => rename_view(&store, id, name),
        ViewCommand::Delete { id, yes } => delete_view(&store, id, yes),
    }
}

fn add_view(
    store: &dyn ViewRepository,
    name: String,
    key: String,
    arch: Option<String>,
    arch_file: Option<PathBuf>,
) -> Result<()> {
    use colored::Colorize;

    let arch = match (arch, arch_file) {
        (Some(arch), _) => arch,
        (None, Some(path)) => fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => bail!("Provide the template markup with --arch or --arch-file"),
    };

    if let Err(e) = Element::parse(&arch) {
        eprintln!(
            "{} Markup is not well-formed and will fail to export: {}",
            "⚠".yellow(),
            e
        );
    }

    let view = store.save(ViewRecord::new(name, key, arch))?;
    println!(
        "{} Stored view {} '{}'{}",
        "✓".green(),
        view.id.to_string().cyan(),
        view.name(),
        if view.is_documentation() {
            " (documentation)".dimmed().to_string()
        } else {
            String::new()
        }
    );
    Ok(())
}

fn list_views(
    store: &dyn ViewRepository,
    documentation: bool,
    name: Option<String>,
    json: bool,
) -> Result<()> {
    use colored::Colorize;

    let mut filter = if documentation {
        ViewFilter::documentation()
    } else {
        ViewFilter::all()
    };
    if let Some(name) = name {
        filter = filter.name_contains(name);
    }
    let views = store.list(&filter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    if views.is_empty() {
        println!("No views found.");
        return Ok(());
    }

    println!("{:>5}  {:<30}  {:<30}  {}", "ID".bold(), "NAME".bold(), "KEY".bold(), "DOC".bold());
    for view in &views {
        println!(
            "{:>5}  {:<30}  {:<30}  {}",
            view.id.to_string().cyan(),
            view.name(),
            view.key,
            if view.is_documentation() { "✓".green() } else { "".normal() }
        );
    }
    println!("\n{} view(s)", views.len());
    Ok(())
}

fn show_view(store: &dyn ViewRepository, id: ViewId, json: bool) -> Result<()> {
    use colored::Colorize;

    let view = store.get(id).with_context(|| format!("View '{}' not found", id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("{}", format!("View {}", view.id).bold().underline());
    println!("  Name:          {}", view.name());
    println!("  Key:           {}", view.key);
    println!("  Type:          {}", view.view_type);
    println!("  Documentation: {}", view.is_documentation());
    println!();
    println!("{}", view.arch);
    Ok(())
}

fn rename_view(store: &dyn ViewRepository, id: ViewId, name: String) -> Result<()> {
    use colored::Colorize;

    let mut view = store.get(id).with_context(|| format!("View '{}' not found", id))?;
    view.set_name(name);
    let view = store.save(view)?;
    println!(
        "{} Renamed view {} to '{}' (documentation: {})",
        "✓".green(),
        view.id,
        view.name(),
        view.is_documentation()
    );
    Ok(())
}

fn delete_view(store: &dyn ViewRepository, id: ViewId, yes: bool) -> Result<()> {
    use colored::Colorize;

    let view = store.get(id).with_context(|| format!("View '{}' not found", id))?;

    if !yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete view {} '{}'?", view.id, view.name()))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.delete(id)?;
    println!("{} Deleted view {}", "✓".green(), id);
    Ok(())
}
