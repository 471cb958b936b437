use std::collections::HashMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::domain::models::auth::AuthResponse;

pub const CREDENTIAL_KEY: &str = "jwt";
pub const ORGANIZER_KEY: &str = "userId";
pub const LOGIN_ROUTE: &str = "/login";

/// Client-side key/value storage holding the session credential (browser
/// local storage in the web console). Only login and logout write to it.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

#[derive(Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.write().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }
}

/// Explicit context for organizer-scoped calls. Passed in, never read from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub credential: String,
    pub organizer_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// No credential: send the user to this route, never render the protected view.
    Redirect(&'static str),
    Authorized(Session),
}

pub fn has_credential(store: &dyn SessionStore) -> bool {
    store.get(CREDENTIAL_KEY).is_some_and(|c| !c.is_empty())
}

/// Gate for organizer-only views. Synchronous and offline: an invalid or
/// expired credential only surfaces as an authorization error on the first call.
pub fn authorize(store: &dyn SessionStore) -> GuardOutcome {
    match store.get(CREDENTIAL_KEY).filter(|c| !c.is_empty()) {
        Some(credential) => GuardOutcome::Authorized(Session {
            credential,
            organizer_id: store.get(ORGANIZER_KEY),
        }),
        None => {
            debug!("No session credential, redirecting to {}", LOGIN_ROUTE);
            GuardOutcome::Redirect(LOGIN_ROUTE)
        }
    }
}

pub fn persist_login(store: &dyn SessionStore, auth: &AuthResponse) {
    store.set(CREDENTIAL_KEY, &auth.access_token);
    store.set(ORGANIZER_KEY, &auth.user_id);
}

pub fn logout(store: &dyn SessionStore) {
    store.remove(CREDENTIAL_KEY);
    store.remove(ORGANIZER_KEY);
}
