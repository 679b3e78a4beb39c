//! View records and their repository
//!
//! A view record is a stored template definition. Views whose name starts
//! with [`DOCUMENTATION_PREFIX`] are documentation views; the flag is
//! derived from the name and stored with the record so it can be used in
//! queries.
//!
//! # Example
//!
//! ```ignore
//! use hd_core::view::{ViewRecord, ViewFilter, ViewRepository};
//!
//! let view = repo.save(ViewRecord::new("help-faq", "website.help_faq", "<t>FAQ</t>"))?;
//! assert!(view.is_documentation());
//!
//! let docs = repo.list(&ViewFilter::documentation())?;
//! ```

mod model;
mod repository;

pub use model::{is_documentation, ViewFilter, ViewRecord, DEFAULT_VIEW_TYPE, DOCUMENTATION_PREFIX};
pub use repository::ViewRepository;

#[cfg(test)]
pub use repository::memory::MemoryViewRepository;
