//! Menu search
//!
//! The application menu is a tree; only entries bound to an action can be
//! opened. [`SearchableMenus`] flattens the tree into full paths such as
//! `Settings/Technical/Actions/Actions`, fuzzy-searches them and
//! [`ResultCursor`] handles keyboard navigation through the results.

mod cursor;
mod model;
mod search;

pub use cursor::{NavKey, NavOutcome, ResultCursor};
pub use model::{MenuEntry, MenuItem};
pub use search::{MenuMatch, SearchableMenus};
