//! hd-storage - Storage library for help-docs
//!
//! This crate provides file system implementations of the view repository
//! and the attachment store.

mod attachment_store;
mod fs_util;
mod view_store;

pub use attachment_store::FileSystemAttachmentStore;
pub use fs_util::default_data_dir;
pub use view_store::FileSystemViewStore;
