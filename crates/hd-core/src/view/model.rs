//! View record model

use crate::types::ViewId;
use serde::{Deserialize, Serialize};

/// Name prefix marking a view as documentation
pub const DOCUMENTATION_PREFIX: &str = "help-";

/// View type of exported templates
pub const DEFAULT_VIEW_TYPE: &str = "qweb";

/// Decide whether a view name denotes documentation.
///
/// True iff the name is non-empty and starts with `help-` (case-sensitive).
pub fn is_documentation(name: &str) -> bool {
    !name.is_empty() && name.starts_with(DOCUMENTATION_PREFIX)
}

/// A stored template definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewRecord {
    /// Repository identifier
    pub id: ViewId,
    /// Human label, also the record id in exports
    name: String,
    /// Namespacing key
    pub key: String,
    /// Template markup
    pub arch: String,
    /// View type
    #[serde(default = "default_view_type")]
    pub view_type: String,
    /// Cached result of [`is_documentation`] for `name`
    #[serde(default)]
    is_documentation: bool,
}

fn default_view_type() -> String {
    DEFAULT_VIEW_TYPE.to_string()
}

impl ViewRecord {
    /// Create an unsaved view
    pub fn new(name: impl Into<String>, key: impl Into<String>, arch: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: ViewId::NEW,
            is_documentation: is_documentation(&name),
            name,
            key: key.into(),
            arch: arch.into(),
            view_type: default_view_type(),
        }
    }

    /// Create a view with a known id
    pub fn with_id(
        id: ViewId,
        name: impl Into<String>,
        key: impl Into<String>,
        arch: impl Into<String>,
    ) -> Self {
        let mut view = Self::new(name, key, arch);
        view.id = id;
        view
    }

    /// View name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the view, recomputing the documentation flag
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.recompute_documentation();
    }

    /// Stored documentation flag
    pub fn is_documentation(&self) -> bool {
        self.is_documentation
    }

    /// Refresh the stored flag from the current name
    pub fn recompute_documentation(&mut self) {
        self.is_documentation = is_documentation(&self.name);
    }
}

/// Filter for listing views
#[derive(Debug, Clone, Default)]
pub struct ViewFilter {
    /// Only views flagged as documentation
    pub documentation_only: bool,
    /// Case-insensitive substring of the name
    pub name_contains: Option<String>,
}

impl ViewFilter {
    /// Filter matching every view
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter matching documentation views
    pub fn documentation() -> Self {
        Self {
            documentation_only: true,
            name_contains: None,
        }
    }

    /// Restrict to names containing `needle`
    pub fn name_contains(mut self, needle: impl Into<String>) -> Self {
        self.name_contains = Some(needle.into());
        self
    }

    /// Check if a view matches the filter
    pub fn matches(&self, view: &ViewRecord) -> bool {
        if self.documentation_only && !view.is_documentation() {
            return false;
        }
        if let Some(needle) = &self.name_contains {
            if !view.name().to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }
        true
    }
}
