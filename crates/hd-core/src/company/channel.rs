//! Broadcast channel shared by the tabs of one browser

use super::tab::CompanySignature;
use crate::types::TabId;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::{debug, trace};

/// Message exchanged between tabs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchMessage {
    /// A tab announces the company context it is working in
    NewContext {
        /// Announcing tab
        origin: TabId,
        /// Announced context
        signature: CompanySignature,
    },
}

type Handler = Arc<dyn Fn(&SwitchMessage) + Send + Sync>;

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    handlers: BTreeMap<u64, Handler>,
}

/// Cloneable handle to a browser-wide broadcast channel
#[derive(Clone, Default)]
pub struct SwitchChannel {
    subscribers: Arc<Mutex<Subscribers>>,
}

impl SwitchChannel {
    /// Create a channel with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; it stays registered while the returned
    /// [`Subscription`] is alive
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&SwitchMessage) + Send + Sync + 'static,
    {
        let mut subscribers = lock(&self.subscribers);
        let id = subscribers.next_id;
        subscribers.next_id += 1;
        subscribers.handlers.insert(id, Arc::new(handler));
        debug!("Subscriber {} joined the switch channel", id);

        Subscription {
            id,
            subscribers: Arc::downgrade(&self.subscribers),
        }
    }

    /// Deliver a message to every subscriber and return how many received it.
    ///
    /// Handlers run after the subscriber list is released, so a handler may
    /// publish or subscribe itself.
    pub fn publish(&self, message: SwitchMessage) -> usize {
        let handlers: Vec<Handler> = lock(&self.subscribers).handlers.values().cloned().collect();
        trace!("Publishing {:?} to {} subscribers", message, handlers.len());
        for handler in &handlers {
            handler(&message);
        }
        handlers.len()
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        lock(&self.subscribers).handlers.len()
    }
}

impl std::fmt::Debug for SwitchChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwitchChannel")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Registration of a handler on a [`SwitchChannel`]; dropping it unsubscribes
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    subscribers: Weak<Mutex<Subscribers>>,
}

impl Subscription {
    /// Unsubscribe explicitly
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            lock(&subscribers).handlers.remove(&self.id);
            debug!("Subscriber {} left the switch channel", self.id);
        }
    }
}

fn lock(subscribers: &Mutex<Subscribers>) -> MutexGuard<'_, Subscribers> {
    subscribers.lock().unwrap_or_else(PoisonError::into_inner)
}
