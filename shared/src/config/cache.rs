//! Cache configuration module

use serde::{Deserialize, Serialize};

use super::{env_or, ConfigError, Environment};

/// Which expiring key-value store backs verification codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Shared Redis instance (required when running more than one process)
    Redis,
    /// Process-local store for development and tests
    Memory,
}

impl std::fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheBackend::Redis => write!(f, "redis"),
            CacheBackend::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(CacheBackend::Redis),
            "memory" | "in-memory" => Ok(CacheBackend::Memory),
            _ => Err(format!("Invalid cache backend: {}", s)),
        }
    }
}

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Store implementation
    #[serde(default = "default_backend")]
    pub backend: CacheBackend,

    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Attempts made when establishing the initial connection
    #[serde(default = "default_connect_retries")]
    pub connect_retries: u32,

    /// Enable cache key prefix
    #[serde(default)]
    pub key_prefix: Option<String>,

    /// Redis database number (0-15)
    #[serde(default)]
    pub database: u8,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            url: String::from("redis://localhost:6379"),
            connection_timeout: 5,
            connect_retries: default_connect_retries(),
            key_prefix: None,
            database: 0,
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: env_or("CACHE_BACKEND", defaults.backend),
            url: std::env::var("REDIS_URL").unwrap_or(defaults.url),
            connection_timeout: env_or("REDIS_CONNECTION_TIMEOUT", defaults.connection_timeout),
            connect_retries: env_or("REDIS_CONNECT_RETRIES", defaults.connect_retries),
            key_prefix: std::env::var("CACHE_KEY_PREFIX").ok().filter(|p| !p.is_empty()),
            database: env_or("REDIS_DATABASE", defaults.database).min(15),
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Set the database number
    pub fn with_database(mut self, db: u8) -> Self {
        self.database = db.min(15);
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }

    /// Production deployments must share one store across processes
    pub fn validate(&self, environment: Environment) -> Result<(), ConfigError> {
        if environment.is_production() && self.backend == CacheBackend::Memory {
            return Err(ConfigError::invalid(
                "CACHE_BACKEND",
                "the in-memory store is not shared between processes",
            ));
        }
        if self.backend == CacheBackend::Redis && !self.url.starts_with("redis") {
            return Err(ConfigError::invalid("REDIS_URL", "expected a redis:// or rediss:// URL"));
        }
        Ok(())
    }
}

fn default_backend() -> CacheBackend {
    CacheBackend::Redis
}

fn default_connect_retries() -> u32 {
    3
}
