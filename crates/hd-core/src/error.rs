//! Error types for help-docs

use crate::types::{AttachmentId, ViewId};
use thiserror::Error;

/// Main error type for help-docs
#[derive(Debug, Error)]
pub enum HelpDocsError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Malformed XML
    #[error("XML error: {0}")]
    Xml(String),

    /// Invalid base64 payload
    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Export invoked without any view to export
    #[error("No views selected for export")]
    EmptySelection,

    /// A selected view's stored markup is not well-formed XML
    #[error("Invalid markup in view '{view}': {reason}")]
    InvalidMarkup { view: String, reason: String },

    /// View not found
    #[error("View not found: {0}")]
    ViewNotFound(ViewId),

    /// Attachment not found
    #[error("Attachment not found: {0}")]
    AttachmentNotFound(AttachmentId),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage backend rejected an operation
    #[error("Storage error: {0}")]
    Storage(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<HelpDocsError>,
    },
}

impl HelpDocsError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        HelpDocsError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Whether the error stems from the export selection or its markup
    pub fn is_export_rejection(&self) -> bool {
        match self {
            HelpDocsError::EmptySelection | HelpDocsError::InvalidMarkup { .. } => true,
            HelpDocsError::WithContext { source, .. } => source.is_export_rejection(),
            _ => false,
        }
    }
}

impl From<quick_xml::Error> for HelpDocsError {
    fn from(err: quick_xml::Error) -> Self {
        HelpDocsError::Xml(err.to_string())
    }
}

impl From<toml::de::Error> for HelpDocsError {
    fn from(err: toml::de::Error) -> Self {
        HelpDocsError::Toml(err.to_string())
    }
}

/// Result type alias for help-docs
pub type Result<T> = std::result::Result<T, HelpDocsError>;
