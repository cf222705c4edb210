use async_trait::async_trait;
use dohgate_domain::{AuditRecord, DomainError};

/// Append-only store for audit records, keyed so that key order is time order.
///
/// Implementations must accept concurrent `put` calls.
#[async_trait]
pub trait AuditLogStore: Send + Sync {
    async fn put(&self, record: &AuditRecord) -> Result<(), DomainError>;

    /// Records with `start <= timestamp < end` (Unix nanos), oldest first.
    async fn scan(&self, start: i64, end: i64) -> Result<Vec<AuditRecord>, DomainError>;

    /// Deletes every record with `timestamp < before`. Returns the count removed.
    async fn prune(&self, before: i64) -> Result<u64, DomainError>;
}
