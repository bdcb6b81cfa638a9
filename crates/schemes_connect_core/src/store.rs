//! crates/schemes_connect_core/src/store.rs
//!
//! Local session persistence: the saved profile draft and the auth record,
//! each JSON-encoded under a fixed key of an injected `KeyValueStore`.
//!
//! Reads never fail. A missing key, an unreadable store or a value that no
//! longer deserializes all come back as `None`.

use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::warn;

use crate::domain::{AuthSession, ProfileDraft};
use crate::ports::{KeyValueStore, PortError, PortResult};

pub const PROFILE_KEY: &str = "schemesconnect_profile";
pub const AUTH_KEY: &str = "schemesconnect_auth";

/// Typed access to the profile and auth records.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    // --- Profile ---

    pub fn save_profile(&self, profile: &ProfileDraft) -> PortResult<()> {
        self.write(PROFILE_KEY, profile)
    }

    pub fn load_profile(&self) -> Option<ProfileDraft> {
        self.read(PROFILE_KEY)
    }

    pub fn clear_profile(&self) -> PortResult<()> {
        self.store.remove(PROFILE_KEY)
    }

    // --- Auth ---

    pub fn save_auth(&self, auth: &AuthSession) -> PortResult<()> {
        self.write(AUTH_KEY, auth)
    }

    pub fn load_auth(&self) -> Option<AuthSession> {
        self.read(AUTH_KEY)
    }

    pub fn clear_auth(&self) -> PortResult<()> {
        self.store.remove(AUTH_KEY)
    }

    pub fn is_logged_in(&self) -> bool {
        self.load_auth().is_some_and(|auth| auth.is_logged_in)
    }

    /// Ends the session: both the auth record and the saved profile go.
    pub fn logout(&self) -> PortResult<()> {
        self.clear_auth()?;
        self.clear_profile()
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> PortResult<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| PortError::Unexpected(format!("Failed to serialize {key}: {e}")))?;
        self.store.set(key, &json)
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "Local store unreadable; treating as empty");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Discarding malformed stored value");
                None
            }
        }
    }
}

//=========================================================================================
// In-Memory Store
//=========================================================================================

/// A `KeyValueStore` held entirely in memory. Lives as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> PortResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| PortError::Unexpected("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> PortResult<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PortResult<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> PortResult<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}
