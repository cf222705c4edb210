pub mod cleanup_old_audit_logs;
pub mod get_audit_logs;

pub use cleanup_old_audit_logs::CleanupOldAuditLogsUseCase;
pub use get_audit_logs::GetAuditLogsUseCase;

const NANOS_PER_SECOND: i64 = 1_000_000_000;
