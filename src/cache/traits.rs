// Cache trait — backend-agnostic async interface for the key-value store.
//
// Implementors: RedisCache (wraps the redis crate), MemoryCache (HashMap
// behind a Mutex). All methods are async so network-backed and in-process
// backends fit behind a single `Arc<dyn Cache>`.

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Cache: Send + Sync {
    /// Fetch a value by key. Returns None on a miss (including expiry).
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value with an expiry in seconds.
    async fn set_with_expiry(&self, key: &str, value: &str, expiry_secs: u64) -> Result<()>;

    /// Connectivity check for the health endpoint.
    async fn ping(&self) -> Result<()>;
}
