//! Export selection

use crate::error::{HelpDocsError, Result};
use crate::types::ViewId;
use serde::{Deserialize, Serialize};

/// Views chosen for an export: the selected rows, or the current record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Explicitly selected views, in selection order
    pub active_ids: Vec<ViewId>,
    /// Record currently open, used when nothing is selected
    pub current: Option<ViewId>,
}

impl Selection {
    /// Selection of explicit ids
    pub fn new(active_ids: Vec<ViewId>) -> Self {
        Self {
            active_ids,
            current: None,
        }
    }

    /// Selection of the current record only
    pub fn current(id: ViewId) -> Self {
        Self {
            active_ids: Vec::new(),
            current: Some(id),
        }
    }

    /// Set the current record
    pub fn with_current(mut self, id: ViewId) -> Self {
        self.current = Some(id);
        self
    }

    /// Ids to export: the selected rows, else the current record.
    ///
    /// Fails with [`HelpDocsError::EmptySelection`] when both are missing.
    pub fn resolve(&self) -> Result<Vec<ViewId>> {
        if !self.active_ids.is_empty() {
            return Ok(self.active_ids.clone());
        }
        self.current
            .map(|id| vec![id])
            .ok_or(HelpDocsError::EmptySelection)
    }
}
