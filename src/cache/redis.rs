// Redis cache backend.
//
// Holds a redis::Client and opens a multiplexed connection per operation.
// No connection is made at construction time: the service must come up (and
// /health must report unhealthy) when Redis is unreachable, not fail at
// startup.

use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::AsyncCommands;

use super::traits::Cache;

pub struct RedisCache {
    client: redis::Client,
}

impl RedisCache {
    /// Build a client for redis://host:port/db.
    pub fn new(host: &str, port: u16, db: u32) -> Result<Self> {
        let url = format!("redis://{host}:{port}/{db}");
        let client = redis::Client::open(url.as_str())
            .with_context(|| format!("Invalid Redis URL {url}"))?;
        Ok(Self { client })
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .context("Failed to connect to Redis")
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await.context("Redis GET failed")?;
        Ok(value)
    }

    async fn set_with_expiry(&self, key: &str, value: &str, expiry_secs: u64) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: () = conn
            .set_ex(key, value, expiry_secs)
            .await
            .context("Redis SETEX failed")?;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .context("Redis PING failed")?;
        Ok(())
    }
}
