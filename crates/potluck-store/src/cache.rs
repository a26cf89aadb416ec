//! User Profile Cache
//!
//! Best-effort copy of the user profile in on-device storage, one key per
//! user id. Writes replace the whole record. Storage and JSON failures are
//! logged and swallowed: reads fall back to `None`, writes are dropped.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::error::StorageError;
use crate::models::User;

/// String key-value storage, shaped like the browser's `localStorage`
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// In-process storage with an optional byte quota over keys and values
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            quota: Some(quota),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(quota) = self.quota {
            let used: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if used + key.len() + value.len() > quota {
                return Err(StorageError::QuotaExceeded { key: key.to_string() });
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

pub const DEFAULT_KEY_PREFIX: &str = "user_";

pub struct UserCache<S> {
    storage: S,
    prefix: String,
}

impl<S: KeyValueStorage> UserCache<S> {
    pub fn new(storage: S) -> Self {
        Self::with_prefix(storage, DEFAULT_KEY_PREFIX)
    }

    pub fn with_prefix(storage: S, prefix: impl Into<String>) -> Self {
        Self {
            storage,
            prefix: prefix.into(),
        }
    }

    pub fn key_for(&self, user_id: &str) -> String {
        format!("{}{}", self.prefix, user_id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Store `user` under its id, replacing any previous record
    pub fn save(&self, user: &User) {
        let key = self.key_for(&user.id);
        let result = serde_json::to_string(user)
            .map_err(StorageError::from)
            .and_then(|json| self.storage.set_item(&key, &json));
        if let Err(e) = result {
            log::warn!("Failed to cache user profile {}: {}", key, e);
        }
    }

    pub fn load(&self, user_id: &str) -> Option<User> {
        let key = self.key_for(user_id);
        match self.try_load(&key) {
            Ok(user) => user,
            Err(e) => {
                log::warn!("Failed to read cached user profile {}: {}", key, e);
                None
            }
        }
    }

    fn try_load(&self, key: &str) -> Result<Option<User>, StorageError> {
        let Some(json) = self.storage.get_item(key)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    /// Read-modify-write of the cached record. Does nothing when no record
    /// is cached. Returns the record that was written.
    pub fn update<F>(&self, user_id: &str, f: F) -> Option<User>
    where
        F: FnOnce(&mut User),
    {
        let mut user = self.load(user_id)?;
        f(&mut user);
        self.save(&user);
        Some(user)
    }

    pub fn remove(&self, user_id: &str) {
        let key = self.key_for(user_id);
        if let Err(e) = self.storage.remove_item(&key) {
            log::warn!("Failed to remove cached user profile {}: {}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let cache = UserCache::new(MemoryStorage::new());
        let mut user = User::new("u1", "Dana");
        user.email = Some("dana@example.com".to_string());

        cache.save(&user);

        assert_eq!(cache.load("u1"), Some(user));
        assert_eq!(cache.load("u2"), None);
        assert!(cache.storage().get_item("user_u1").unwrap().is_some());
    }

    #[test]
    fn test_write_replaces_whole_record() {
        let cache = UserCache::new(MemoryStorage::new());
        let mut user = User::new("u1", "Dana");
        user.phone = Some("555".to_string());
        cache.save(&user);

        cache.save(&User::new("u1", "Dana K"));

        let loaded = cache.load("u1").unwrap();
        assert_eq!(loaded.name, "Dana K");
        assert_eq!(loaded.phone, None);
    }

    #[test]
    fn test_update_merges_into_cached_record() {
        let cache = UserCache::new(MemoryStorage::new());
        let mut user = User::new("u1", "Dana");
        user.phone = Some("555".to_string());
        cache.save(&user);

        let updated = cache.update("u1", |u| u.name = "Dana K".to_string()).unwrap();

        assert_eq!(updated.phone.as_deref(), Some("555"));
        assert_eq!(cache.load("u1").unwrap().name, "Dana K");
        assert_eq!(cache.update("missing", |u| u.name.clear()), None);
    }

    #[test]
    fn test_malformed_record_reads_as_missing() {
        let storage = MemoryStorage::new();
        storage.set_item("user_u1", "{not json").unwrap();
        let cache = UserCache::new(&storage);

        assert_eq!(cache.load("u1"), None);
    }

    #[test]
    fn test_quota_failure_is_swallowed() {
        let cache = UserCache::new(MemoryStorage::with_quota(16));

        cache.save(&User::new("u1", "A name long enough to blow the quota"));

        assert_eq!(cache.load("u1"), None);
        assert!(cache.storage().is_empty());
    }

    #[test]
    fn test_quota_keeps_prior_value() {
        let storage = MemoryStorage::with_quota(200);
        let cache = UserCache::new(&storage);
        let user = User::new("u1", "Dana");
        cache.save(&user);

        cache.save(&User::new("u1", &"x".repeat(300)));

        assert_eq!(cache.load("u1"), Some(user));
    }

    #[test]
    fn test_prefix_and_remove() {
        let cache = UserCache::with_prefix(MemoryStorage::new(), "potluck:user:");
        cache.save(&User::new("u1", "Dana"));
        assert_eq!(cache.key_for("u1"), "potluck:user:u1");

        cache.remove("u1");

        assert_eq!(cache.load("u1"), None);
    }
}
