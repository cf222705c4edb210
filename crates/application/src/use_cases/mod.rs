pub mod audit_logs;

// Re-export use cases
pub use audit_logs::{CleanupOldAuditLogsUseCase, GetAuditLogsUseCase};
