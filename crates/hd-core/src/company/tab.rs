//! Tab sessions and the warning banner

use super::channel::{Subscription, SwitchChannel, SwitchMessage};
use crate::types::TabId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

/// Text of the warning banner
pub const WARNING_MESSAGE: &str =
    "The company has been switched in another tab or window. Refresh this page before continuing.";

/// Company context of a tab: active company and database
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanySignature {
    /// Active company
    pub company_id: u64,
    /// Database name
    pub database: String,
}

impl CompanySignature {
    /// Create a signature
    pub fn new(company_id: u64, database: impl Into<String>) -> Self {
        Self {
            company_id,
            database: database.into(),
        }
    }
}

impl fmt::Display for CompanySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.company_id, self.database)
    }
}

/// Dismissible warning shown when another tab switched company
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WarningBanner {
    /// Whether the banner is currently displayed
    pub visible: bool,
    /// How many times the banner was brought up
    pub times_shown: u32,
}

impl WarningBanner {
    /// Display the banner; returns false if it was already visible
    pub fn show(&mut self) -> bool {
        if self.visible {
            return false;
        }
        self.visible = true;
        self.times_shown += 1;
        true
    }

    /// Hide the banner
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Close the banner on user request
    pub fn dismiss(&mut self) {
        self.hide();
    }
}

#[derive(Debug)]
struct TabState {
    signature: CompanySignature,
    banner: WarningBanner,
}

/// One browser tab listening for company switches in other tabs
#[derive(Debug)]
pub struct TabSession {
    id: TabId,
    state: Arc<Mutex<TabState>>,
    channel: SwitchChannel,
    _subscription: Subscription,
}

impl TabSession {
    /// Join the channel and announce this tab's company context
    pub fn open(channel: &SwitchChannel, signature: CompanySignature) -> Self {
        let id = TabId::new();
        let state = Arc::new(Mutex::new(TabState {
            signature: signature.clone(),
            banner: WarningBanner::default(),
        }));

        let handler_state = state.clone();
        let subscription = channel.subscribe(move |message| {
            let SwitchMessage::NewContext { signature, .. } = message;
            let mut state = lock(&handler_state);
            if *signature == state.signature {
                state.banner.hide();
            } else if state.banner.show() {
                info!("Tab {} works in {} but {} is now active", id, state.signature, signature);
            }
        });

        let tab = Self {
            id,
            state,
            channel: channel.clone(),
            _subscription: subscription,
        };
        debug!("Opened tab {} in {}", id, signature);
        tab.announce(signature);
        tab
    }

    /// Tab identifier
    pub fn id(&self) -> TabId {
        self.id
    }

    /// Company context this tab works in
    pub fn signature(&self) -> CompanySignature {
        lock(&self.state).signature.clone()
    }

    /// Current banner state
    pub fn banner(&self) -> WarningBanner {
        lock(&self.state).banner
    }

    /// Switch this tab to another company and tell the other tabs
    pub fn switch_company(&self, signature: CompanySignature) {
        lock(&self.state).signature = signature.clone();
        self.announce(signature);
    }

    /// Close the banner
    pub fn dismiss_warning(&self) {
        lock(&self.state).banner.dismiss();
    }

    fn announce(&self, signature: CompanySignature) {
        self.channel.publish(SwitchMessage::NewContext {
            origin: self.id,
            signature,
        });
    }
}

fn lock(state: &Mutex<TabState>) -> MutexGuard<'_, TabState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prod(company_id: u64) -> CompanySignature {
        CompanySignature::new(company_id, "prod")
    }

    #[test]
    fn test_signature_display() {
        assert_eq!(prod(3).to_string(), "3,prod");
    }

    #[test]
    fn test_banner_suppresses_duplicates() {
        let mut banner = WarningBanner::default();
        assert!(banner.show());
        assert!(!banner.show());
        assert_eq!(banner.times_shown, 1);
        banner.dismiss();
        assert!(!banner.visible);
        assert!(banner.show());
        assert_eq!(banner.times_shown, 2);
    }

    #[test]
    fn test_same_company_tabs_stay_quiet() {
        let channel = SwitchChannel::new();
        let a = TabSession::open(&channel, prod(1));
        let b = TabSession::open(&channel, prod(1));
        assert!(!a.banner().visible);
        assert!(!b.banner().visible);
    }

    #[test]
    fn test_switch_warns_other_tab_once() {
        let channel = SwitchChannel::new();
        let a = TabSession::open(&channel, prod(1));
        let b = TabSession::open(&channel, prod(1));

        a.switch_company(prod(2));
        assert_eq!(b.banner(), WarningBanner { visible: true, times_shown: 1 });
        assert!(!a.banner().visible);

        // Another announcement of the same company adds no second banner
        let _c = TabSession::open(&channel, prod(2));
        assert_eq!(b.banner(), WarningBanner { visible: true, times_shown: 1 });
    }

    #[test]
    fn test_switching_back_hides_banner() {
        let channel = SwitchChannel::new();
        let a = TabSession::open(&channel, prod(1));
        let b = TabSession::open(&channel, prod(1));

        a.switch_company(prod(2));
        a.switch_company(prod(1));
        assert!(!b.banner().visible);
        assert_eq!(b.signature(), prod(1));
    }

    #[test]
    fn test_dismiss_warning() {
        let channel = SwitchChannel::new();
        let a = TabSession::open(&channel, prod(1));
        let b = TabSession::open(&channel, prod(1));

        a.switch_company(prod(2));
        b.dismiss_warning();
        assert!(!b.banner().visible);
        assert_eq!(b.signature(), prod(1));
    }

    #[test]
    fn test_closed_tab_unsubscribes() {
        let channel = SwitchChannel::new();
        let a = TabSession::open(&channel, prod(1));
        {
            let _b = TabSession::open(&channel, prod(1));
            assert_eq!(channel.subscriber_count(), 2);
        }
        assert_eq!(channel.subscriber_count(), 1);
        a.switch_company(CompanySignature::new(1, "staging"));
        assert!(!a.banner().visible);
    }
}
