//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod attachment;
pub mod config;
pub mod export;
pub mod help_page;
pub mod import;
pub mod init;
pub mod menu;
pub mod view;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hd_core::config::Config;
use hd_storage::{default_data_dir, FileSystemAttachmentStore, FileSystemViewStore};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project directory created by `help-docs init`
pub const PROJECT_DIR: &str = ".help-docs";

/// help-docs - documentation views and view export
#[derive(Debug, Parser)]
#[command(name = "help-docs")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "HELP_DOCS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Data directory holding views and attachments
    #[arg(long, global = true, env = "HELP_DOCS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize help-docs in current project
    Init(init::InitArgs),

    /// Manage views
    #[command(subcommand)]
    View(view::ViewCommand),

    /// Export views into an XML attachment
    Export(export::ExportArgs),

    /// Import views from an exported XML file
    Import(import::ImportArgs),

    /// Inspect stored attachments
    #[command(subcommand)]
    Attachment(attachment::AttachmentCommand),

    /// Find the help page of a model and view type
    HelpPage(help_page::HelpPageArgs),

    /// Search the application menu
    #[command(subcommand)]
    Menu(menu::MenuCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Resolved configuration and data location
pub struct Workspace {
    /// Loaded configuration
    pub config: Config,
    /// Path the configuration was read from
    pub config_path: PathBuf,
    /// Directory holding views and attachments
    pub data_dir: PathBuf,
}

impl Workspace {
    /// Resolve configuration and data directory from the global flags
    pub fn resolve(config: Option<&Path>, data_dir: Option<&Path>) -> Result<Self> {
        let config_path = config
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(PROJECT_DIR).join("config.toml"));
        let config = Config::load(&config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()))?;

        let data_dir = data_dir
            .map(Path::to_path_buf)
            .or_else(|| config.storage.data_dir.clone())
            .unwrap_or_else(|| {
                let project = PathBuf::from(PROJECT_DIR);
                if project.exists() {
                    project
                } else {
                    default_data_dir()
                }
            });
        debug!("Using data directory {:?}", data_dir);

        Ok(Self {
            config,
            config_path,
            data_dir,
        })
    }

    /// Open the view store
    pub fn views(&self) -> Result<FileSystemViewStore> {
        FileSystemViewStore::new(&self.data_dir).context("Failed to open view store")
    }

    /// Open the attachment store
    pub fn attachments(&self) -> Result<FileSystemAttachmentStore> {
        FileSystemAttachmentStore::new(&self.data_dir).context("Failed to open attachment store")
    }
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Dispatch to command handler
    match cli.command {
        Commands::Init(args) => init::execute(args),
        command => {
            let workspace = Workspace::resolve(cli.config.as_deref(), cli.data_dir.as_deref())?;
            dispatch(command, &workspace)
        }
    }
}

fn dispatch(command: Commands, workspace: &Workspace) -> Result<()> {
    match command {
        Commands::Init(args) => init::execute(args),
        Commands::View(cmd) => view::execute(cmd, workspace),
        Commands::Export(args) => export::execute(args, workspace),
        Commands::Import(args) => import::execute(args, workspace),
        Commands::Attachment(cmd) => attachment::execute(cmd, workspace),
        Commands::HelpPage(args) => help_page::execute(args, workspace),
        Commands::Menu(cmd) => menu::execute(cmd, workspace),
        Commands::Config(cmd) => config::execute(cmd, workspace),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
