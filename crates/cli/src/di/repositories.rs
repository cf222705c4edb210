use dohgate_infrastructure::repositories::SqliteAuditLogStore;
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Repositories {
    pub audit_log: Arc<SqliteAuditLogStore>,
}

impl Repositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            audit_log: Arc::new(SqliteAuditLogStore::new(pool)),
        }
    }
}
