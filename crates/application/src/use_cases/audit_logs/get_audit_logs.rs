use super::NANOS_PER_SECOND;
use crate::ports::AuditLogStore;
use dohgate_domain::{now_nanos, AuditRecord, DomainError};
use std::sync::Arc;

pub struct GetAuditLogsUseCase {
    store: Arc<dyn AuditLogStore>,
}

impl GetAuditLogsUseCase {
    pub fn new(store: Arc<dyn AuditLogStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, start: i64, end: i64) -> Result<Vec<AuditRecord>, DomainError> {
        if end <= start {
            return Ok(Vec::new());
        }
        self.store.scan(start, end).await
    }

    /// Everything logged in the last `minutes` minutes, oldest first.
    pub async fn recent(&self, minutes: u64) -> Result<Vec<AuditRecord>, DomainError> {
        let now = now_nanos();
        let window = (minutes as i64)
            .saturating_mul(60)
            .saturating_mul(NANOS_PER_SECOND);
        // `scan` has an exclusive end; include records stamped at `now`.
        self.execute(now.saturating_sub(window), now.saturating_add(1))
            .await
    }
}
