//! Session access.
//!
//! Login writes the authenticated user as JSON into browser session
//! storage under a well-known key; the expense components only ever read
//! it back. The storage itself sits behind a trait so tests and the dev
//! server can use a plain in-memory map.

use std::collections::HashMap;
use std::sync::Mutex;

use shared::SessionUser;
use thiserror::Error;

/// Storage key under which login serializes the current user
pub const USER_STORAGE_KEY: &str = "user";

/// Trait defining the interface for key-value session storage
pub trait SessionStorage: Send + Sync {
    /// Read the value stored under a key, if any
    fn read(&self, key: &str) -> Option<String>;

    /// Store a value under a key, replacing any previous value
    fn write(&self, key: &str, value: &str);
}

/// In-memory session storage for tests and non-browser hosts
#[derive(Default)]
pub struct MemorySessionStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with a logged-in user
    pub fn with_user(user: &SessionUser) -> Self {
        let storage = Self::new();
        storage.write(
            USER_STORAGE_KEY,
            &serde_json::to_string(user).expect("session user serializes"),
        );
        storage
    }
}

impl SessionStorage for MemorySessionStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}

/// Error raised when the current user cannot be loaded from storage
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no user in session storage")]
    Missing,
    #[error("malformed session user: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Load the logged-in user from session storage.
///
/// Both components call this at construction time, so a missing or
/// garbled session surfaces before any store traffic happens.
pub fn load_session_user(storage: &dyn SessionStorage) -> Result<SessionUser, SessionError> {
    let raw = storage.read(USER_STORAGE_KEY).ok_or(SessionError::Missing)?;
    Ok(serde_json::from_str(&raw)?)
}
