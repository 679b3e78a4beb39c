//! File system storage for views

use crate::fs_util::{
    atomic_write_json, create_with_next_id, ensure_dir, list_ids, read_json, record_path,
};
use hd_core::error::{HelpDocsError, Result};
use hd_core::types::ViewId;
use hd_core::view::{ViewFilter, ViewRecord, ViewRepository};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

/// File system based view repository, one JSON file per view
pub struct FileSystemViewStore {
    /// Directory holding `{id}.json` files
    views_dir: PathBuf,
    /// Serializes id allocation and writes
    write_lock: Mutex<()>,
}

impl FileSystemViewStore {
    /// Open the store under `base_dir/views`, creating it if needed
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let views_dir = base_dir.as_ref().join("views");
        ensure_dir(&views_dir)?;
        Ok(Self {
            views_dir,
            write_lock: Mutex::new(()),
        })
    }

    /// Get views directory
    pub fn views_dir(&self) -> &PathBuf {
        &self.views_dir
    }

    fn read(&self, id: ViewId) -> Result<Option<ViewRecord>> {
        let view: Option<ViewRecord> = read_json(&self.views_dir, id.0)?;
        // The stored flag may be missing or hand-edited
        Ok(view.map(|mut view| {
            view.recompute_documentation();
            view
        }))
    }

    fn read_all(&self) -> Result<Vec<ViewRecord>> {
        let mut views = Vec::new();
        for id in list_ids(&self.views_dir)? {
            match self.read(ViewId(id)) {
                Ok(Some(view)) => views.push(view),
                Ok(None) => {}
                Err(e) => warn!("Failed to read view {}: {}", id, e),
            }
        }
        Ok(views)
    }
}

impl ViewRepository for FileSystemViewStore {
    fn get_by_ids(&self, ids: &[ViewId]) -> Result<Vec<ViewRecord>> {
        ids.iter()
            .map(|id| self.read(*id)?.ok_or(HelpDocsError::ViewNotFound(*id)))
            .collect()
    }

    fn find_by_name(&self, name: &str) -> Result<Option<ViewRecord>> {
        Ok(self.read_all()?.into_iter().find(|v| v.name() == name))
    }

    fn save(&self, mut view: ViewRecord) -> Result<ViewRecord> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        view.recompute_documentation();
        if view.id.is_new() {
            let (view, path) = create_with_next_id(&self.views_dir, |id| {
                let mut new_view = view.clone();
                new_view.id = ViewId(id);
                Ok(new_view)
            })?;
            debug!("Created view {} at {:?}", view.id, path);
            return Ok(view);
        }
        let path = atomic_write_json(&self.views_dir, view.id.0, &view)?;
        debug!("Saved view {} to {:?}", view.id, path);
        Ok(view)
    }

    fn list(&self, filter: &ViewFilter) -> Result<Vec<ViewRecord>> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|v| filter.matches(v))
            .collect())
    }

    fn delete(&self, id: ViewId) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let path = record_path(&self.views_dir, id.0);
        if !path.exists() {
            return Err(HelpDocsError::ViewNotFound(id));
        }
        fs::remove_file(&path).map_err(|e| {
            HelpDocsError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to delete view file: {}", e),
            ))
        })?;
        debug!("Deleted view {} from {:?}", id, path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (FileSystemViewStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSystemViewStore::new(temp_dir.path()).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_store_creation() {
        let (store, _temp) = create_test_store();
        assert!(store.views_dir().exists());
    }

    #[test]
    fn test_save_and_load() {
        let (store, _temp) = create_test_store();
        let saved = store
            .save(ViewRecord::new("help-faq", "module.help_faq", "<t>FAQ</t>"))
            .unwrap();
        assert_eq!(saved.id, ViewId(1));

        let loaded = store.get(saved.id).unwrap();
        assert_eq!(loaded, saved);
        assert!(loaded.is_documentation());
    }

    #[test]
    fn test_get_by_ids_order_and_missing() {
        let (store, _temp) = create_test_store();
        store.save(ViewRecord::new("a", "m.a", "<t/>")).unwrap();
        store.save(ViewRecord::new("b", "m.b", "<t/>")).unwrap();

        let views = store.get_by_ids(&[ViewId(2), ViewId(1)]).unwrap();
        assert_eq!(views[0].name(), "b");
        assert_eq!(views[1].name(), "a");

        let err = store.get_by_ids(&[ViewId(1), ViewId(3)]).unwrap_err();
        assert!(matches!(err, HelpDocsError::ViewNotFound(ViewId(3))));
    }

    #[test]
    fn test_stored_flag_follows_rename() {
        let (store, temp) = create_test_store();
        let mut view = store.save(ViewRecord::new("faq", "m.faq", "<t/>")).unwrap();
        view.set_name("help-faq");
        store.save(view).unwrap();

        let content = fs::read_to_string(temp.path().join("views/1.json")).unwrap();
        assert!(content.contains("\"is_documentation\": true"));
        assert_eq!(store.list(&ViewFilter::documentation()).unwrap().len(), 1);
    }

    #[test]
    fn test_load_recomputes_hand_edited_flag() {
        let (store, temp) = create_test_store();
        fs::write(
            temp.path().join("views/1.json"),
            r#"{"id": 1, "name": "help-faq", "key": "m.faq", "arch": "<t/>"}"#,
        )
        .unwrap();
        fs::write(
            temp.path().join("views/2.json"),
            r#"{"id": 2, "name": "faq", "key": "m.faq2", "arch": "<t/>", "is_documentation": true}"#,
        )
        .unwrap();

        let docs = store.list(&ViewFilter::documentation()).unwrap();
        let names: Vec<_> = docs.iter().map(|v| v.name()).collect();
        assert_eq!(names, vec!["help-faq"]);
        assert!(!store.get(ViewId(2)).unwrap().is_documentation());
    }

    #[test]
    fn test_find_by_name() {
        let (store, _temp) = create_test_store();
        store.save(ViewRecord::new("help-x", "m.x", "<t/>")).unwrap();
        assert!(store.find_by_name("help-x").unwrap().is_some());
        assert!(store.find_by_name("help-y").unwrap().is_none());
    }

    #[test]
    fn test_delete() {
        let (store, _temp) = create_test_store();
        let view = store.save(ViewRecord::new("a", "m.a", "<t/>")).unwrap();
        store.delete(view.id).unwrap();
        assert!(store.get(view.id).is_err());
        assert!(store.delete(view.id).is_err());
    }

    #[test]
    fn test_ids_continue_after_highest() {
        let (store, _temp) = create_test_store();
        store.save(ViewRecord::with_id(ViewId(10), "a", "m.a", "<t/>")).unwrap();
        let next = store.save(ViewRecord::new("b", "m.b", "<t/>")).unwrap();
        assert_eq!(next.id, ViewId(11));
    }

    #[test]
    fn test_list_skips_corrupt_files() {
        let (store, temp) = create_test_store();
        store.save(ViewRecord::new("a", "m.a", "<t/>")).unwrap();
        fs::write(temp.path().join("views/5.json"), "not json").unwrap();
        assert_eq!(store.list(&ViewFilter::all()).unwrap().len(), 1);
    }
}
