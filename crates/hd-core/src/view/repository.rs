//! View repository trait and abstractions

use super::model::{ViewFilter, ViewRecord};
use crate::error::Result;
use crate::types::ViewId;

/// Trait for view storage implementations
pub trait ViewRepository: Send + Sync {
    /// Load views in the requested order; any unknown id fails the batch
    fn get_by_ids(&self, ids: &[ViewId]) -> Result<Vec<ViewRecord>>;

    /// Find a view by its name
    fn find_by_name(&self, name: &str) -> Result<Option<ViewRecord>>;

    /// Insert or update a view; a new view is assigned the next free id
    fn save(&self, view: ViewRecord) -> Result<ViewRecord>;

    /// List views matching a filter, sorted by id
    fn list(&self, filter: &ViewFilter) -> Result<Vec<ViewRecord>>;

    /// Delete a view
    fn delete(&self, id: ViewId) -> Result<()>;

    /// Load a single view
    fn get(&self, id: ViewId) -> Result<ViewRecord> {
        let mut views = self.get_by_ids(&[id])?;
        views
            .pop()
            .ok_or(crate::HelpDocsError::ViewNotFound(id))
    }
}
