// SPDX-License-Identifier: MIT

//! Session token persistence.
//!
//! The backend client persists its session token through a pluggable
//! key/value store so host applications can back it with a secure on-device
//! keystore. Token refresh itself is handled by the backend; this layer only
//! stores and replays the current token.

use std::collections::HashMap;
use std::sync::Mutex;

/// Storage key under which the session token is persisted.
pub const SESSION_TOKEN_KEY: &str = "sendlog.session_token";

/// Get/set/delete of a string value by key.
///
/// Implementations must not panic; a broken store should behave as empty.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-process session store, used by default and in tests.
#[derive(Default)]
pub struct MemorySessionStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.values.lock() {
            Ok(values) => values.get(key).cloned(),
            Err(_) => None,
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemorySessionStore::new();
        assert_eq!(store.get(SESSION_TOKEN_KEY), None);

        store.set(SESSION_TOKEN_KEY, "token-abc");
        assert_eq!(store.get(SESSION_TOKEN_KEY), Some("token-abc".to_string()));

        store.remove(SESSION_TOKEN_KEY);
        assert_eq!(store.get(SESSION_TOKEN_KEY), None);
    }
}
