//! Menu command
//!
//! Fuzzy search over an exported menu tree.

use anyhow::{Context, Result};
use clap::Subcommand;
use hd_core::menu::{MenuEntry, SearchableMenus};
use std::fs;
use std::path::PathBuf;

use super::Workspace;

/// Menu subcommands
#[derive(Debug, Subcommand)]
pub enum MenuCommand {
    /// Search menus by full path
    Search {
        /// JSON file holding the top-level menu entries
        #[arg(long, short)]
        menus: PathBuf,

        /// Search text
        query: String,

        /// Maximum number of results (default from config)
        #[arg(long, short)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Execute the menu command
pub fn execute(cmd: MenuCommand, workspace: &Workspace) -> Result<()> {
    use colored::Colorize;

    match cmd {
        MenuCommand::Search {
            menus,
            query,
            limit,
            json,
        } => {
            let content = fs::read_to_string(&menus)
                .with_context(|| format!("Failed to read {}", menus.display()))?;
            let roots: Vec<MenuEntry> = serde_json::from_str(&content)
                .with_context(|| format!("Invalid menu file {}", menus.display()))?;

            let config = &workspace.config.menu;
            let searchable = SearchableMenus::from_roots(&roots);
            let mut matches =
                searchable.search(&query, &config.highlight_pre, &config.highlight_post);
            matches.truncate(limit.unwrap_or(config.max_results));

            if json {
                println!("{}", serde_json::to_string_pretty(&matches)?);
                return Ok(());
            }

            if matches.is_empty() {
                println!("No menus match '{}'.", query);
                return Ok(());
            }

            for found in &matches {
                let app = SearchableMenus::owning_app(&found.item.path, &roots)
                    .map(|app| app.name.as_str())
                    .unwrap_or("");
                println!(
                    "{:>4}  {}  {}",
                    found.score.to_string().dimmed(),
                    found.highlighted,
                    app.dimmed()
                );
            }
        }
    }

    Ok(())
}
