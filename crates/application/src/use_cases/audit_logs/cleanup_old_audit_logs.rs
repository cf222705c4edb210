use super::NANOS_PER_SECOND;
use crate::ports::AuditLogStore;
use dohgate_domain::{now_nanos, DomainError};
use std::sync::Arc;
use tracing::info;

const SECONDS_PER_DAY: i64 = 86_400;

pub struct CleanupOldAuditLogsUseCase {
    store: Arc<dyn AuditLogStore>,
}

impl CleanupOldAuditLogsUseCase {
    pub fn new(store: Arc<dyn AuditLogStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, retention_days: u32) -> Result<u64, DomainError> {
        let cutoff = Self::cutoff(now_nanos(), retention_days);
        let deleted = self.store.prune(cutoff).await?;
        info!(deleted, retention_days, "Old audit logs cleaned up");
        Ok(deleted)
    }

    fn cutoff(now: i64, retention_days: u32) -> i64 {
        let window = (retention_days as i64)
            .saturating_mul(SECONDS_PER_DAY)
            .saturating_mul(NANOS_PER_SECOND);
        now.saturating_sub(window)
    }
}
