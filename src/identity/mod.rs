//! Identity signal.
//!
//! The authentication provider itself is an external collaborator; this
//! module only carries the identity it resolves and fans out identity
//! transitions to the managers. Subscribers are invoked synchronously, so a
//! manager has finished re-scoping before the next event is processed.

use crate::observer::{Subscribers, SubscriptionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::info;

/// The authenticated user as resolved by the auth provider. The core only
/// ever reads `user_id`; the rest is display data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

/// Identity transitions published by the signal.
///
/// `Resolved` is published at least once at startup (with the restored
/// identity, or None when logged out) and again when the provider refreshes
/// profile data for the same user.
#[derive(Debug, Clone, PartialEq)]
pub enum IdentityEvent {
    Resolved(Option<Identity>),
    LoggedIn(Identity),
    LoggedOut,
}

impl IdentityEvent {
    /// The identity in effect after this event.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            IdentityEvent::Resolved(identity) => identity.as_ref(),
            IdentityEvent::LoggedIn(identity) => Some(identity),
            IdentityEvent::LoggedOut => None,
        }
    }
}

/// Holds the current identity and publishes every transition to subscribers.
pub struct IdentitySignal {
    current: Mutex<Option<Identity>>,
    subscribers: Mutex<Subscribers<IdentityEvent>>,
}

impl IdentitySignal {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
            subscribers: Mutex::new(Subscribers::new()),
        }
    }

    pub fn current(&self) -> Option<Identity> {
        self.current.lock().unwrap().clone()
    }

    pub fn subscribe(
        &self,
        callback: Box<dyn Fn(&IdentityEvent) + Send>,
    ) -> SubscriptionId {
        self.subscribers.lock().unwrap().subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.lock().unwrap().unsubscribe(id);
    }

    /// Startup resolution, or a profile refresh for the already-active user.
    pub fn resolve(&self, identity: Option<Identity>) {
        match &identity {
            Some(identity) => info!("Identity resolved: {}", identity.user_id),
            None => info!("Identity resolved: logged out"),
        }
        *self.current.lock().unwrap() = identity.clone();
        self.publish(IdentityEvent::Resolved(identity));
    }

    pub fn login(&self, identity: Identity) {
        info!("Logged in as {}", identity.user_id);
        *self.current.lock().unwrap() = Some(identity.clone());
        self.publish(IdentityEvent::LoggedIn(identity));
    }

    pub fn logout(&self) {
        info!("Logged out");
        *self.current.lock().unwrap() = None;
        self.publish(IdentityEvent::LoggedOut);
    }

    fn publish(&self, event: IdentityEvent) {
        let subscribers = self.subscribers.lock().unwrap();
        subscribers.notify(&event);
    }
}

impl Default for IdentitySignal {
    fn default() -> Self {
        Self::new()
    }
}
