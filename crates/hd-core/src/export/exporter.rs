//! View exporter

use super::action::WindowAction;
use super::attachment::{AttachmentStore, NewAttachment};
use super::document::{build_document, render_document};
use super::selection::Selection;
use crate::config::ExportConfig;
use crate::error::Result;
use crate::view::{ViewRecord, ViewRepository};
use std::sync::Arc;
use tracing::{debug, info};

/// Exports selected views into an XML attachment
pub struct ViewExporter {
    /// View source
    views: Arc<dyn ViewRepository>,
    /// Attachment sink
    attachments: Arc<dyn AttachmentStore>,
    /// Export settings
    config: ExportConfig,
}

impl ViewExporter {
    /// Create an exporter over shared stores
    pub fn with_stores(views: Arc<dyn ViewRepository>, attachments: Arc<dyn AttachmentStore>) -> Self {
        Self {
            views,
            attachments,
            config: ExportConfig::default(),
        }
    }

    /// Replace the export settings
    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the selected views in selection order
    pub fn selected_views(&self, selection: &Selection) -> Result<Vec<ViewRecord>> {
        let ids = selection.resolve()?;
        self.views.get_by_ids(&ids)
    }

    /// Render the export document without storing it
    pub fn render(&self, selection: &Selection) -> Result<String> {
        let views = self.selected_views(selection)?;
        let root = build_document(&views)?;
        render_document(&root, self.config.indent)
    }

    /// Export the selection into a new attachment and return the action
    /// displaying it.
    ///
    /// Nothing is stored unless every selected view renders.
    pub fn export_views(&self, selection: &Selection) -> Result<WindowAction> {
        let xml = self.render(selection)?;
        debug!("Rendered export document ({} bytes)", xml.len());

        let attachment = self.attachments.create(NewAttachment::from_bytes(
            self.config.attachment_name.as_str(),
            self.config.mimetype.as_str(),
            xml.as_bytes(),
        ))?;
        info!(
            "Exported views to attachment {} ({})",
            attachment.id, attachment.name
        );

        Ok(WindowAction::open_attachment(
            attachment.id,
            self.config.form_view.as_str(),
        ))
    }
}
