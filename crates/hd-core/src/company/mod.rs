//! Company switch notifier
//!
//! Tabs of the same browser share a [`SwitchChannel`]. Each tab announces
//! the company context it works in; when another tab announces a different
//! context, the tab shows a warning banner asking the user to refresh. The
//! notifier never changes the company context itself.
//!
//! # Example
//!
//! ```ignore
//! use hd_core::company::{CompanySignature, SwitchChannel, TabSession};
//!
//! let channel = SwitchChannel::new();
//! let a = TabSession::open(&channel, CompanySignature::new(1, "prod"));
//! let b = TabSession::open(&channel, CompanySignature::new(1, "prod"));
//!
//! a.switch_company(CompanySignature::new(2, "prod"));
//! assert!(b.banner().visible);
//! ```

mod channel;
mod tab;

pub use channel::{Subscription, SwitchChannel, SwitchMessage};
pub use tab::{CompanySignature, TabSession, WarningBanner, WARNING_MESSAGE};
