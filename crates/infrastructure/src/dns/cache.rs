//! TTL-bounded response cache.
//!
//! Stores the serialized upstream answer under `"<domain>:<qtype>"`. Reads
//! never delete; expired entries only leave the map through [`ResponseCache::sweep`].

use async_trait::async_trait;
use dohgate_application::ports::{CacheMaintenancePort, CacheSweepOutcome};
use dohgate_domain::DomainError;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Arc<[u8]>,
    expires_at: Instant,
}

impl CacheEntry {
    #[inline]
    fn is_valid_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Arc<[u8]>> {
        self.get_at(key, Instant::now())
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<Arc<[u8]>>, ttl_secs: u32) {
        self.set_at(key, value, ttl_secs, Instant::now());
    }

    /// Removes every expired entry. Returns how many were dropped.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<Arc<[u8]>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(key)
            .filter(|entry| entry.is_valid_at(now))
            .map(|entry| Arc::clone(&entry.value))
    }

    fn set_at(
        &self,
        key: impl Into<String>,
        value: impl Into<Arc<[u8]>>,
        ttl_secs: u32,
        now: Instant,
    ) {
        let entry = CacheEntry {
            value: value.into(),
            expires_at: now + Duration::from_secs(ttl_secs as u64),
        };
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), entry);
    }

    fn sweep_at(&self, now: Instant) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, entry| entry.is_valid_at(now));
        before - entries.len()
    }
}

#[async_trait]
impl CacheMaintenancePort for ResponseCache {
    async fn run_sweep_cycle(&self) -> Result<CacheSweepOutcome, DomainError> {
        let entries_removed = self.sweep();
        let cache_size = self.len();
        debug!(entries_removed, cache_size, "Response cache swept");
        Ok(CacheSweepOutcome {
            entries_removed,
            cache_size,
        })
    }
}
