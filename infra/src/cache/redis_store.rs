//! Redis-backed verification code store

use async_trait::async_trait;

use mv_core::services::verification::CacheStoreTrait;

use super::redis_client::RedisClient;

/// `CacheStoreTrait` over a shared Redis instance.
///
/// Keys are namespaced with the configured prefix, so several deployments
/// can share one database.
#[derive(Clone)]
pub struct RedisCacheStore {
    client: RedisClient,
}

impl RedisCacheStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }

    fn key(&self, key: &str) -> String {
        self.client.config().make_key(key)
    }
}

#[async_trait]
impl CacheStoreTrait for RedisCacheStore {
    async fn set_with_expiry(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), String> {
        self.client
            .set_with_expiry(&self.key(key), value, ttl_secs)
            .await
            .map_err(|e| e.to_string())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.client.get(&self.key(key)).await.map_err(|e| e.to_string())
    }

    async fn delete(&self, key: &str) -> Result<bool, String> {
        self.client.delete(&self.key(key)).await.map_err(|e| e.to_string())
    }

    async fn get_and_delete(&self, key: &str) -> Result<Option<String>, String> {
        self.client.get_del(&self.key(key)).await.map_err(|e| e.to_string())
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl_secs: u64) -> Result<bool, String> {
        self.client
            .set_nx_ex(&self.key(key), value, ttl_secs)
            .await
            .map_err(|e| e.to_string())
    }

    async fn compare_and_delete(&self, key: &str, expected: &str) -> Result<bool, String> {
        self.client
            .compare_and_delete(&self.key(key), expected)
            .await
            .map_err(|e| e.to_string())
    }

    async fn ttl(&self, key: &str) -> Result<Option<u64>, String> {
        let ttl = self.client.ttl(&self.key(key)).await.map_err(|e| e.to_string())?;
        // TTL rounds down; a key in its last second is still live
        Ok(ttl.map(|secs| secs.max(1) as u64))
    }

    async fn ping(&self) -> Result<(), String> {
        match self.client.health_check().await {
            Ok(true) => Ok(()),
            Ok(false) => Err("Unexpected PING reply".to_string()),
            Err(e) => Err(e.to_string()),
        }
    }
}
