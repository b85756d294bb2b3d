//! In-memory session store with real per-entry expiry.
//!
//! Backs the test suite and single-node development. Unlike a cache, the
//! TTL semantics here must match Redis exactly (idle expiry is how
//! sessions end), so every entry carries its own deadline and expired
//! entries are treated as absent on access.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use carelink_core::result::AppResult;
use carelink_core::traits::store::SessionStore;

/// A stored value with its expiry deadline.
#[derive(Debug, Clone)]
struct StoreEntry {
    value: String,
    expires_at: Instant,
}

impl StoreEntry {
    fn new(value: &str, ttl: Duration) -> Self {
        Self {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_live(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// In-memory session store provider.
#[derive(Debug, Clone, Default)]
pub struct MemoryStoreProvider {
    entries: Arc<DashMap<String, StoreEntry>>,
}

impl MemoryStoreProvider {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop an entry if it has lapsed, returning whether it is live.
    fn reap_if_expired(&self, key: &str) -> bool {
        self.entries.remove_if(key, |_, e| !e.is_live());
        self.entries.contains_key(key)
    }
}

#[async_trait]
impl SessionStore for MemoryStoreProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_live() {
                return Ok(Some(entry.value.clone()));
            }
        }
        self.reap_if_expired(key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.entries
            .insert(key.to_string(), StoreEntry::new(value, ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.reap_if_expired(key))
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        if !self.reap_if_expired(key) {
            return Ok(false);
        }
        match self.entries.get_mut(key) {
            Some(mut entry) => {
                entry.expires_at = Instant::now() + ttl;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_del(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self
            .entries
            .remove(key)
            .and_then(|(_, entry)| entry.is_live().then_some(entry.value)))
    }

    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_live() {
                    Ok(false)
                } else {
                    occupied.insert(StoreEntry::new(value, ttl));
                    Ok(true)
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(StoreEntry::new(value, ttl));
                Ok(true)
            }
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get() {
        let store = MemoryStoreProvider::new();
        store
            .set("key1", "value1", Duration::from_secs(60))
            .await
            .unwrap();
        let val = store.get("key1").await.unwrap();
        assert_eq!(val, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStoreProvider::new();
        store
            .set("key2", "value2", Duration::from_secs(60))
            .await
            .unwrap();
        store.delete("key2").await.unwrap();
        assert_eq!(store.get("key2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_entry_lapses_after_ttl() {
        let store = MemoryStoreProvider::new();
        store
            .set("ttl_key", "v", Duration::from_millis(40))
            .await
            .unwrap();
        assert!(store.exists("ttl_key").await.unwrap());
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(!store.exists("ttl_key").await.unwrap());
        assert_eq!(store.get("ttl_key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expire_renews_deadline() {
        let store = MemoryStoreProvider::new();
        store
            .set("renew", "v", Duration::from_millis(80))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(store.expire("renew", Duration::from_millis(300)).await.unwrap());
        tokio::time::sleep(Duration::from_millis(100)).await;
        // Would have lapsed under the original deadline.
        assert!(store.exists("renew").await.unwrap());
    }

    #[tokio::test]
    async fn test_expire_on_missing_key() {
        let store = MemoryStoreProvider::new();
        assert!(!store.expire("ghost", Duration::from_secs(1)).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_del_consumes() {
        let store = MemoryStoreProvider::new();
        store
            .set("once", "v", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(store.get_del("once").await.unwrap(), Some("v".to_string()));
        assert_eq!(store.get_del("once").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_nx() {
        let store = MemoryStoreProvider::new();
        assert!(store.set_nx("nx", "a", Duration::from_secs(60)).await.unwrap());
        assert!(!store.set_nx("nx", "b", Duration::from_secs(60)).await.unwrap());
        assert_eq!(store.get("nx").await.unwrap(), Some("a".to_string()));
    }

    #[tokio::test]
    async fn test_set_nx_replaces_expired() {
        let store = MemoryStoreProvider::new();
        store
            .set("nx2", "old", Duration::from_millis(20))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(store.set_nx("nx2", "new", Duration::from_secs(60)).await.unwrap());
        assert_eq!(store.get("nx2").await.unwrap(), Some("new".to_string()));
    }
}
