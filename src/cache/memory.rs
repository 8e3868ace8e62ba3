// In-memory cache backend — HashMap behind a Mutex.
//
// Stands in for Redis in tests and cache-less dev runs. Expiry is honored
// by storing a deadline per entry and evicting lazily on read.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

use super::traits::Cache;

#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some((value, deadline)) if Instant::now() < *deadline => Ok(Some(value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_with_expiry(&self, key: &str, value: &str, expiry_secs: u64) -> Result<()> {
        let deadline = Instant::now() + Duration::from_secs(expiry_secs);
        self.entries
            .lock()
            .await
            .insert(key.to_string(), (value.to_string(), deadline));
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let cache = MemoryCache::new();
        cache.set_with_expiry("k", "v", 60).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some("v".to_string()));
    }

    #[tokio::test]
    async fn missing_key_is_none() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn zero_ttl_expires_immediately() {
        let cache = MemoryCache::new();
        cache.set_with_expiry("k", "v", 0).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn overwrite_replaces_value() {
        let cache = MemoryCache::new();
        cache.set_with_expiry("k", "old", 60).await.unwrap();
        cache.set_with_expiry("k", "new", 60).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some("new".to_string()));
    }
}
