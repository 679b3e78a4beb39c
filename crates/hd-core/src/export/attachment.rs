//! Attachments: persisted binary payloads

use crate::error::Result;
use crate::types::{AttachmentId, Checksum};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Attachment data before it is stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttachment {
    /// File name
    pub name: String,
    /// MIME type
    pub mimetype: String,
    /// Base64-encoded payload
    pub datas: String,
}

impl NewAttachment {
    /// Build an attachment from raw bytes
    pub fn from_bytes(name: impl Into<String>, mimetype: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            name: name.into(),
            mimetype: mimetype.into(),
            datas: STANDARD.encode(bytes),
        }
    }

    /// Turn into a stored attachment; fails if the payload is not base64
    pub fn into_attachment(self, id: AttachmentId, created_at: DateTime<Utc>) -> Result<Attachment> {
        let raw = STANDARD.decode(self.datas.as_bytes())?;
        Ok(Attachment {
            id,
            name: self.name,
            mimetype: self.mimetype,
            checksum: Checksum::of(&raw),
            file_size: raw.len(),
            datas: self.datas,
            created_at,
        })
    }
}

/// A stored attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Store identifier
    pub id: AttachmentId,
    /// File name
    pub name: String,
    /// MIME type
    pub mimetype: String,
    /// Base64-encoded payload
    pub datas: String,
    /// Checksum of the decoded payload
    pub checksum: Checksum,
    /// Size of the decoded payload in bytes
    pub file_size: usize,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Attachment {
    /// Decode the payload
    pub fn decoded(&self) -> Result<Vec<u8>> {
        Ok(STANDARD.decode(self.datas.as_bytes())?)
    }

    /// Summary without the payload
    pub fn info(&self) -> AttachmentInfo {
        AttachmentInfo {
            id: self.id,
            name: self.name.clone(),
            mimetype: self.mimetype.clone(),
            checksum: self.checksum.clone(),
            file_size: self.file_size,
            created_at: self.created_at,
        }
    }
}

/// Attachment summary used in listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentInfo {
    /// Store identifier
    pub id: AttachmentId,
    /// File name
    pub name: String,
    /// MIME type
    pub mimetype: String,
    /// Checksum of the decoded payload
    pub checksum: Checksum,
    /// Size of the decoded payload in bytes
    pub file_size: usize,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Trait for attachment storage implementations
pub trait AttachmentStore: Send + Sync {
    /// Persist a new attachment and return it with its assigned id
    fn create(&self, attachment: NewAttachment) -> Result<Attachment>;

    /// Load an attachment
    fn get(&self, id: AttachmentId) -> Result<Attachment>;

    /// List stored attachments sorted by id
    fn list(&self) -> Result<Vec<AttachmentInfo>>;
}


#[cfg(test)]
mod tests {
    use super::memory::MemoryAttachmentStore;
    use super::*;
    use crate::HelpDocsError;

    #[test]
    fn test_payload_round_trip() {
        let new = NewAttachment::from_bytes("view.xml", "application/xml", b"<odoo/>");
        assert_eq!(new.datas, "PG9kb28vPg==");
        let stored = new.into_attachment(AttachmentId(1), Utc::now()).unwrap();
        assert_eq!(stored.decoded().unwrap(), b"<odoo/>");
        assert_eq!(stored.file_size, 7);
        assert_eq!(stored.checksum, Checksum::of(b"<odoo/>"));
    }

    #[test]
    fn test_invalid_base64_rejected() {
        let new = NewAttachment {
            name: "x".to_string(),
            mimetype: "text/plain".to_string(),
            datas: "not base64!".to_string(),
        };
        let err = new.into_attachment(AttachmentId(1), Utc::now()).unwrap_err();
        assert!(matches!(err, HelpDocsError::Base64(_)));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryAttachmentStore::new();
        let a = store
            .create(NewAttachment::from_bytes("a", "text/plain", b"a"))
            .unwrap();
        let b = store
            .create(NewAttachment::from_bytes("b", "text/plain", b"b"))
            .unwrap();
        assert_eq!(a.id, AttachmentId(1));
        assert_eq!(b.id, AttachmentId(2));
        assert_eq!(store.get(b.id).unwrap().name, "b");
        assert_eq!(store.list().unwrap().len(), 2);
        assert!(store.get(AttachmentId(5)).is_err());
    }
}
