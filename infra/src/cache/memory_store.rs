//! In-process verification code store
//!
//! Single-process only: codes issued by one instance are invisible to
//! another. Meant for development and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

use mv_core::services::verification::CacheStoreTrait;

/// Writes between sweeps of expired entries
pub(crate) const SWEEP_EVERY: u64 = 64;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    deadline: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.deadline > now
    }
}

/// `CacheStoreTrait` over a mutex-guarded map.
///
/// Each operation holds the lock for its whole duration, which makes the
/// check-and-act operations atomic. Expiry follows the tokio clock, so tests
/// can move time with `tokio::time::advance`. Expired entries are dropped
/// when read and swept every [`SWEEP_EVERY`] writes.
#[derive(Clone, Default)]
pub struct InMemoryCacheStore {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
    writes: Arc<AtomicU64>,
    key_prefix: Option<String>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            entries: Arc::default(),
            writes: Arc::default(),
            key_prefix: Some(prefix.into()),
        }
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.lock()
            .map(|entries| entries.values().filter(|e| e.is_live(now)).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop expired entries
    pub fn purge_expired(&self) -> Result<usize, String> {
        let now = Instant::now();
        let mut entries = self.lock()?;
        let before = entries.len();
        entries.retain(|_, e| e.is_live(now));
        Ok(before - entries.len())
    }

    fn key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Entry>>, String> {
        self.entries
            .lock()
            .map_err(|_| "In-memory store lock poisoned".to_string())
    }

    fn deadline(now: Instant, ttl_secs: u64) -> Result<Instant, String> {
        now.checked_add(Duration::from_secs(ttl_secs))
            .ok_or_else(|| format!("TTL of {} seconds is out of range", ttl_secs))
    }

    /// Insert `entry`, sweeping expired entries every `SWEEP_EVERY` writes
    fn insert_and_sweep(&self, entries: &mut HashMap<String, Entry>, key: String, entry: Entry, now: Instant) {
        entries.insert(key, entry);
        if (self.writes.fetch_add(1, Ordering::Relaxed) + 1) % SWEEP_EVERY == 0 {
            let before = entries.len();
            entries.retain(|_, e| e.is_live(now));
            tracing::trace!(swept = before - entries.len(), "Swept expired in-memory entries");
        }
    }

    /// Live entry for `key`, removing it first if it has expired
    fn live<'a>(entries: &'a mut HashMap<String, Entry>, key: &str, now: Instant) -> Option<&'a Entry> {
        if entries.get(key).is_some_and(|e| !e.is_live(now)) {
            entries.remove(key);
        }
        entries.get(key)
    }
}

#[async_trait]
impl CacheStoreTrait for InMemoryCacheStore {
    async fn set_with_expiry(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), String> {
        let now = Instant::now();
        let entry = Entry {
            value: value.to_string(),
            deadline: Self::deadline(now, ttl_secs)?,
        };
        let mut entries = self.lock()?;
        self.insert_and_sweep(&mut entries, self.key(key), entry, now);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        let mut entries = self.lock()?;
        Ok(Self::live(&mut entries, &self.key(key), Instant::now()).map(|e| e.value.clone()))
    }

    async fn delete(&self, key: &str) -> Result<bool, String> {
        let key = self.key(key);
        let mut entries = self.lock()?;
        let existed = Self::live(&mut entries, &key, Instant::now()).is_some();
        entries.remove(&key);
        Ok(existed)
    }

    async fn get_and_delete(&self, key: &str) -> Result<Option<String>, String> {
        let key = self.key(key);
        let mut entries = self.lock()?;
        let value = Self::live(&mut entries, &key, Instant::now()).map(|e| e.value.clone());
        entries.remove(&key);
        Ok(value)
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl_secs: u64) -> Result<bool, String> {
        let key = self.key(key);
        let now = Instant::now();
        let deadline = Self::deadline(now, ttl_secs)?;
        let mut entries = self.lock()?;
        if Self::live(&mut entries, &key, now).is_some() {
            return Ok(false);
        }
        let entry = Entry {
            value: value.to_string(),
            deadline,
        };
        self.insert_and_sweep(&mut entries, key, entry, now);
        Ok(true)
    }

    async fn compare_and_delete(&self, key: &str, expected: &str) -> Result<bool, String> {
        let key = self.key(key);
        let mut entries = self.lock()?;
        let matches = Self::live(&mut entries, &key, Instant::now()).is_some_and(|e| e.value == expected);
        if matches {
            entries.remove(&key);
        }
        Ok(matches)
    }

    async fn ttl(&self, key: &str) -> Result<Option<u64>, String> {
        let now = Instant::now();
        let mut entries = self.lock()?;
        Ok(Self::live(&mut entries, &self.key(key), now).map(|e| {
            let remaining = e.deadline.saturating_duration_since(now);
            // Round up so a live key never reports zero
            remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0)
        }))
    }
}
