//! Help page command
//!
//! Locate, and optionally create, the documentation page of a model.

use anyhow::Result;
use clap::Args;
use hd_core::help::HelpLocator;

use super::Workspace;

/// Arguments for the help-page command
#[derive(Debug, Args)]
pub struct HelpPageArgs {
    /// Technical model name, e.g. `res.partner`
    pub model: String,

    /// View type, e.g. `form`
    pub view_type: String,

    /// Create the page when it does not exist
    #[arg(long)]
    pub create: bool,

    /// Skip confirmation
    #[arg(long, short)]
    pub yes: bool,
}

/// Execute the help-page command
pub fn execute(args: HelpPageArgs, workspace: &Workspace) -> Result<()> {
    use colored::Colorize;

    let store = workspace.views()?;
    let locator = HelpLocator::new(workspace.config.help.clone());

    let Some(page) = locator.locate(&store, &args.model, &args.view_type)? else {
        println!(
            "{} '{}' views have no help page",
            "⚠".yellow(),
            args.view_type
        );
        return Ok(());
    };

    if page.exists {
        println!("{} {}", "✓".green(), page.url.cyan());
        return Ok(());
    }

    if !args.create {
        println!("{} Page '{}' does not exist", "⚠".yellow(), page.name);
        println!("  Create it with {}", page.create_url().cyan());
        return Ok(());
    }

    if !args.yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt("Page does not exist. Do you want to create?")
            .default(true)
            .interact()?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let view = locator.create_page(&store, &page)?;
    println!(
        "{} Created page '{}' as view {}",
        "✓".green(),
        view.name(),
        view.id
    );
    println!("  {}", page.url.cyan());
    Ok(())
}
