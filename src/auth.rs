//! Token lookup and the login gate.

use std::sync::Arc;

use crate::config::{LEGACY_TOKEN_KEY, LOGIN_PAGE, TOKEN_KEY, USER_DATA_KEY};
use crate::error::Result;
use crate::host::Host;
use crate::models::UserProfile;
use crate::storage::KeyValueStore;

/// Reads and clears the session held in the key-value store.
#[derive(Clone)]
pub struct Auth {
    store: Arc<dyn KeyValueStore>,
}

impl Auth {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored token, if any.
    ///
    /// A token found only under the legacy key is moved to the canonical key.
    pub fn get_token(&self) -> Option<String> {
        if let Some(token) = self.store.get(TOKEN_KEY).filter(|t| !t.is_empty()) {
            return Some(token);
        }
        let legacy = self.store.get(LEGACY_TOKEN_KEY).filter(|t| !t.is_empty())?;
        match self.store.set(TOKEN_KEY, &legacy) {
            Ok(()) => {
                if let Err(e) = self.store.remove(LEGACY_TOKEN_KEY) {
                    tracing::warn!("Could not remove legacy token key: {}", e);
                }
                tracing::debug!("Migrated auth token to {}", TOKEN_KEY);
            }
            Err(e) => tracing::warn!("Could not migrate legacy auth token: {}", e),
        }
        Some(legacy)
    }

    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some()
    }

    /// Redirects to the login page and returns `false` when no token exists.
    pub fn require_auth(&self, host: &dyn Host) -> bool {
        if self.is_authenticated() {
            return true;
        }
        tracing::info!("Not authenticated; redirecting to {}", LOGIN_PAGE);
        host.redirect(LOGIN_PAGE);
        false
    }

    /// Clear the token (both keys) and the cached profile, then leave for the
    /// login page.
    pub fn logout(&self, host: &dyn Host) {
        for key in [TOKEN_KEY, LEGACY_TOKEN_KEY, USER_DATA_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!("Could not clear {}: {}", key, e);
            }
        }
        host.redirect(LOGIN_PAGE);
    }

    /// Persist a fresh session, as the login page does after signing in.
    pub fn store_session(&self, token: &str, profile: Option<&UserProfile>) -> Result<()> {
        self.store.set(TOKEN_KEY, token)?;
        if let Some(profile) = profile {
            self.cache_profile(profile)?;
        }
        Ok(())
    }

    pub fn cache_profile(&self, profile: &UserProfile) -> Result<()> {
        let blob = serde_json::to_string(profile)?;
        self.store.set(USER_DATA_KEY, &blob)
    }

    /// The cached profile; a malformed blob reads as `None`.
    pub fn cached_profile(&self) -> Option<UserProfile> {
        let raw = self.store.get(USER_DATA_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::warn!("Ignoring malformed cached user data: {}", e);
                None
            }
        }
    }
}
