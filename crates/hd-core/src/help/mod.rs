//! Help page lookup
//!
//! Every model and view type can have a documentation page. Its name is
//! derived from the model and view type and always carries the
//! documentation prefix, so created pages show up as documentation views.

mod locator;

pub use locator::{HelpLocator, HelpPage};
