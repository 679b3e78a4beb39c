//! View export
//!
//! This module turns a selection of view records into a single XML
//! document in the host's generic import format, stores it as an
//! attachment and returns the action that displays the attachment.
//!
//! # Overview
//!
//! ```text
//! <odoo>
//!   <data>
//!     <record id="help-faq" model="ir.ui.view">
//!       <field name="name">help-faq</field>
//!       <field name="type">qweb</field>
//!       <field name="key">module.help_faq</field>
//!       <field name="arch" type="xml">
//!         <t>FAQ</t>
//!       </field>
//!     </record>
//!   </data>
//! </odoo>
//! ```
//!
//! Documents produced here can be read back with [`parse_export`] and
//! [`import_views`].
//!
//! # Example
//!
//! ```ignore
//! use hd_core::export::{Selection, ViewExporter};
//! use std::sync::Arc;
//!
//! let exporter = ViewExporter::with_stores(Arc::new(views), Arc::new(attachments));
//! let action = exporter.export_views(&Selection::new(vec![ViewId(4), ViewId(2)]))?;
//! println!("attachment {}", action.res_id);
//! ```

mod action;
mod attachment;
mod document;
mod exporter;
mod import;
mod selection;

pub use action::WindowAction;
pub use attachment::{Attachment, AttachmentInfo, AttachmentStore, NewAttachment};
pub use document::{build_document, render_document};
pub use exporter::ViewExporter;
pub use import::{import_views, parse_export, ImportReport, ImportedView};
pub use selection::Selection;

#[cfg(test)]
pub use attachment::memory::MemoryAttachmentStore;
