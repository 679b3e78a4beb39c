//! Configuration management for help-docs

use crate::error::{HelpDocsError, Result};
use crate::view::DOCUMENTATION_PREFIX;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Export settings
    pub export: ExportConfig,
    /// Help page settings
    pub help: HelpConfig,
    /// Menu search settings
    pub menu: MenuConfig,
    /// Storage settings
    pub storage: StorageConfig,
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, falling back to defaults when it is missing
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No configuration at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| e.with_context(format!("{}", path.display())))
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| HelpDocsError::Toml(e.to_string()))
    }

    /// Check values that serde alone cannot reject
    pub fn validate(&self) -> Result<()> {
        if self.export.attachment_name.trim().is_empty() {
            return Err(HelpDocsError::Config(
                "export.attachment_name cannot be empty".to_string(),
            ));
        }
        if !self.export.mimetype.contains('/') {
            return Err(HelpDocsError::Config(format!(
                "export.mimetype '{}' is not a MIME type",
                self.export.mimetype
            )));
        }
        if self.export.indent > 8 {
            return Err(HelpDocsError::Config(
                "export.indent must be between 0 and 8".to_string(),
            ));
        }
        if !self.help.page_prefix.starts_with(DOCUMENTATION_PREFIX) {
            return Err(HelpDocsError::Config(format!(
                "help.page_prefix '{}' must start with '{}' so created pages are documentation",
                self.help.page_prefix, DOCUMENTATION_PREFIX
            )));
        }
        if !self.help.page_route.starts_with('/') {
            return Err(HelpDocsError::Config(format!(
                "help.page_route '{}' must start with '/'",
                self.help.page_route
            )));
        }
        Ok(())
    }
}

/// Export-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// File name of the created attachment
    pub attachment_name: String,
    /// MIME type of the created attachment
    pub mimetype: String,
    /// Form view used to display the attachment
    pub form_view: String,
    /// Spaces per indentation level in the exported document
    pub indent: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            attachment_name: "view.xml".to_string(),
            mimetype: "application/xml".to_string(),
            form_view: "help_docs.view_attachment_simplified_form".to_string(),
            indent: 2,
        }
    }
}

/// Help page lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpConfig {
    /// Name prefix of generated help pages; starts with `help-`
    pub page_prefix: String,
    /// Route under which help pages are served
    pub page_route: String,
    /// View types that never get a help button
    pub forbidden_view_types: Vec<String>,
}

impl Default for HelpConfig {
    fn default() -> Self {
        Self {
            page_prefix: "help-".to_string(),
            page_route: "/page".to_string(),
            forbidden_view_types: vec!["base_settings".to_string()],
        }
    }
}

/// Menu search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Markup inserted before each matched character
    pub highlight_pre: String,
    /// Markup inserted after each matched character
    pub highlight_post: String,
    /// Maximum number of results shown
    pub max_results: usize,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            highlight_pre: "<b>".to_string(),
            highlight_post: "</b>".to_string(),
            max_results: 20,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Data directory holding views and attachments
    pub data_dir: Option<PathBuf>,
}
