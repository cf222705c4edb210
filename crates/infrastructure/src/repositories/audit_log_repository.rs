use async_trait::async_trait;
use dohgate_application::ports::AuditLogStore;
use dohgate_domain::{AuditRecord, DomainError};
use sqlx::SqlitePool;
use tracing::{error, instrument, warn};

/// Audit records keyed by `<20-digit nanos>_<client>_<query>`, so key order
/// is time order and range scans and pruning are plain key comparisons.
pub struct SqliteAuditLogStore {
    pool: SqlitePool,
}

impl SqliteAuditLogStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn db_error(context: &str, e: sqlx::Error) -> DomainError {
        error!(error = %e, "{}", context);
        DomainError::DatabaseError(format!("{}: {}", context, e))
    }
}

#[async_trait]
impl AuditLogStore for SqliteAuditLogStore {
    #[instrument(skip(self, record), fields(query = %record.query))]
    async fn put(&self, record: &AuditRecord) -> Result<(), DomainError> {
        let body = serde_json::to_string(record)
            .map_err(|e| DomainError::Serialization(format!("Failed to encode audit record: {}", e)))?;

        sqlx::query("INSERT OR REPLACE INTO audit_log (key, timestamp, record) VALUES (?, ?, ?)")
            .bind(record.store_key())
            .bind(record.timestamp)
            .bind(body)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::db_error("Failed to insert audit record", e))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn scan(&self, start: i64, end: i64) -> Result<Vec<AuditRecord>, DomainError> {
        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT key, record FROM audit_log WHERE key >= ? AND key < ? ORDER BY key ASC",
        )
        .bind(AuditRecord::key_prefix(start))
        .bind(AuditRecord::key_prefix(end))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Self::db_error("Failed to scan audit log", e))?;

        let records = rows
            .into_iter()
            .filter_map(|(key, body)| match serde_json::from_str::<AuditRecord>(&body) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(key = %key, error = %e, "Skipping unreadable audit record");
                    None
                }
            })
            .collect();

        Ok(records)
    }

    #[instrument(skip(self))]
    async fn prune(&self, before: i64) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM audit_log WHERE key < ?")
            .bind(AuditRecord::key_prefix(before))
            .execute(&self.pool)
            .await
            .map_err(|e| Self::db_error("Failed to prune audit log", e))?;

        Ok(result.rows_affected())
    }
}
