#![allow(dead_code)]

use async_trait::async_trait;
use dohgate_application::ports::{AuditLogStore, CacheMaintenancePort, CacheSweepOutcome};
use dohgate_domain::{AuditRecord, DomainError};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

pub struct MockCacheMaintenancePort {
    sweep_calls: AtomicU64,
    should_fail: AtomicBool,
}

impl MockCacheMaintenancePort {
    pub fn new() -> Self {
        Self {
            sweep_calls: AtomicU64::new(0),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn sweep_call_count(&self) -> u64 {
        self.sweep_calls.load(Ordering::SeqCst)
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl CacheMaintenancePort for MockCacheMaintenancePort {
    async fn run_sweep_cycle(&self) -> Result<CacheSweepOutcome, DomainError> {
        self.sweep_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::IoError("mock sweep failure".to_string()));
        }
        Ok(CacheSweepOutcome {
            entries_removed: 1,
            cache_size: 0,
        })
    }
}

pub struct MockAuditLogStore {
    prune_cutoffs: Mutex<Vec<i64>>,
    should_fail: AtomicBool,
}

impl MockAuditLogStore {
    pub fn new() -> Self {
        Self {
            prune_cutoffs: Mutex::new(Vec::new()),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn prune_call_count(&self) -> usize {
        self.prune_cutoffs.lock().unwrap().len()
    }

    pub fn prune_cutoffs(&self) -> Vec<i64> {
        self.prune_cutoffs.lock().unwrap().clone()
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl AuditLogStore for MockAuditLogStore {
    async fn put(&self, _record: &AuditRecord) -> Result<(), DomainError> {
        Ok(())
    }

    async fn scan(&self, _start: i64, _end: i64) -> Result<Vec<AuditRecord>, DomainError> {
        Ok(Vec::new())
    }

    async fn prune(&self, before: i64) -> Result<u64, DomainError> {
        self.prune_cutoffs.lock().unwrap().push(before);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("mock prune failure".to_string()));
        }
        Ok(0)
    }
}
