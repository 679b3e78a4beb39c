//! Minimal XML element tree
//!
//! Stored view markup is parsed into an owned [`Element`] tree so it can be
//! validated and spliced into a new document structurally instead of being
//! concatenated as text. Reading and writing go through `quick-xml`.

mod tree;
mod writer;

pub use tree::{Element, Node};
pub use writer::Document;
