//! Cache module for expiring verification code storage
//!
//! This module provides the Redis client, the Redis-backed store used in
//! production and an in-process store for development and tests.

pub mod memory_store;
pub mod redis_client;
pub mod redis_store;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use mv_core::services::verification::CacheStoreTrait;
use mv_shared::config::{CacheBackend, CacheConfig};

pub use memory_store::InMemoryCacheStore;
pub use redis_client::RedisClient;
pub use redis_store::RedisCacheStore;

use crate::InfrastructureError;

/// Build the store selected by `config.backend`
pub async fn create_cache_store(
    config: &CacheConfig,
) -> Result<Arc<dyn CacheStoreTrait>, InfrastructureError> {
    match config.backend {
        CacheBackend::Redis => {
            let client = RedisClient::new(config.clone()).await?;
            Ok(Arc::new(RedisCacheStore::new(client)))
        }
        CacheBackend::Memory => {
            tracing::warn!("Using in-process verification store; codes are not shared between instances");
            let store = match &config.key_prefix {
                Some(prefix) => InMemoryCacheStore::with_prefix(prefix.clone()),
                None => InMemoryCacheStore::new(),
            };
            Ok(Arc::new(store))
        }
    }
}
