//! help-docs - documentation views and view export
//!
//! ## Quick Start
//!
//! ```bash
//! # Initialize in your project
//! help-docs init
//!
//! # Store a documentation view
//! help-docs view add help-faq --key website.help_faq --arch '<t>FAQ</t>'
//!
//! # Export views 1 and 2 into an XML attachment
//! help-docs export 1 2 --output view.xml
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
