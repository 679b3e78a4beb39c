//! File system storage for attachments

use crate::fs_util::{create_with_next_id, ensure_dir, list_ids, read_json};
use chrono::Utc;
use hd_core::error::{HelpDocsError, Result};
use hd_core::export::{Attachment, AttachmentInfo, AttachmentStore, NewAttachment};
use hd_core::types::AttachmentId;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

/// File system based attachment store, one JSON file per attachment
pub struct FileSystemAttachmentStore {
    /// Directory holding `{id}.json` files
    attachments_dir: PathBuf,
    /// Serializes id allocation
    write_lock: Mutex<()>,
}

impl FileSystemAttachmentStore {
    /// Open the store under `base_dir/attachments`, creating it if needed
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let attachments_dir = base_dir.as_ref().join("attachments");
        ensure_dir(&attachments_dir)?;
        Ok(Self {
            attachments_dir,
            write_lock: Mutex::new(()),
        })
    }

    /// Get attachments directory
    pub fn attachments_dir(&self) -> &PathBuf {
        &self.attachments_dir
    }
}

impl AttachmentStore for FileSystemAttachmentStore {
    fn create(&self, attachment: NewAttachment) -> Result<Attachment> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (stored, path) = create_with_next_id(&self.attachments_dir, |id| {
            attachment
                .clone()
                .into_attachment(AttachmentId(id), Utc::now())
        })?;
        debug!("Saved attachment {} to {:?}", stored.id, path);
        Ok(stored)
    }

    fn get(&self, id: AttachmentId) -> Result<Attachment> {
        read_json(&self.attachments_dir, id.0)?.ok_or(HelpDocsError::AttachmentNotFound(id))
    }

    fn list(&self) -> Result<Vec<AttachmentInfo>> {
        let mut infos = Vec::new();
        for id in list_ids(&self.attachments_dir)? {
            match self.get(AttachmentId(id)) {
                Ok(attachment) => infos.push(attachment.info()),
                Err(e) => warn!("Failed to read attachment {}: {}", id, e),
            }
        }
        Ok(infos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (FileSystemAttachmentStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSystemAttachmentStore::new(temp_dir.path()).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_create_and_get() {
        let (store, _temp) = create_test_store();
        let created = store
            .create(NewAttachment::from_bytes("view.xml", "application/xml", b"<odoo/>"))
            .unwrap();
        assert_eq!(created.id, AttachmentId(1));

        let loaded = store.get(created.id).unwrap();
        assert_eq!(loaded, created);
        assert_eq!(loaded.decoded().unwrap(), b"<odoo/>");
    }

    #[test]
    fn test_ids_increase() {
        let (store, _temp) = create_test_store();
        for expected in 1..=3 {
            let a = store
                .create(NewAttachment::from_bytes("a", "text/plain", b"a"))
                .unwrap();
            assert_eq!(a.id, AttachmentId(expected));
        }
        assert_eq!(store.list().unwrap().len(), 3);
    }

    #[test]
    fn test_concurrent_stores_never_share_an_id() {
        let temp = TempDir::new().unwrap();
        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let dir = temp.path().to_path_buf();
                std::thread::spawn(move || {
                    // Separate instances do not share the in-process lock
                    let store = FileSystemAttachmentStore::new(&dir).unwrap();
                    (0..10)
                        .map(|n| {
                            let body = format!("{}-{}", worker, n);
                            store
                                .create(NewAttachment::from_bytes("view.xml", "text/plain", body.as_bytes()))
                                .unwrap()
                                .id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<AttachmentId> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 40);

        let store = FileSystemAttachmentStore::new(temp.path()).unwrap();
        assert_eq!(store.list().unwrap().len(), 40);
    }

    #[test]
    fn test_get_missing() {
        let (store, _temp) = create_test_store();
        let err = store.get(AttachmentId(9)).unwrap_err();
        assert!(matches!(err, HelpDocsError::AttachmentNotFound(AttachmentId(9))));
    }

    #[test]
    fn test_invalid_payload_not_stored() {
        let (store, _temp) = create_test_store();
        let result = store.create(NewAttachment {
            name: "x".to_string(),
            mimetype: "text/plain".to_string(),
            datas: "***".to_string(),
        });
        assert!(result.is_err());
        assert!(store.list().unwrap().is_empty());
    }
}
