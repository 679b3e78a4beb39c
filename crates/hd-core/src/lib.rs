//! hd-core - Core library for help-docs
//!
//! This crate provides the core logic for documentation views: the
//! documentation classifier, the XML view export and import, help page
//! lookup, the cross-tab company switch notifier and menu search.

pub mod error;
pub mod types;
pub mod config;
pub mod xml;
pub mod view;
pub mod export;
pub mod help;
pub mod company;
pub mod menu;

pub use error::{HelpDocsError, Result};
pub use types::*;
