use super::Repositories;
use dohgate_application::use_cases::{CleanupOldAuditLogsUseCase, GetAuditLogsUseCase};
use std::sync::Arc;

pub struct UseCases {
    pub cleanup_audit_logs: Arc<CleanupOldAuditLogsUseCase>,
    pub get_audit_logs: Arc<GetAuditLogsUseCase>,
}

impl UseCases {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            cleanup_audit_logs: Arc::new(CleanupOldAuditLogsUseCase::new(repos.audit_log.clone())),
            get_audit_logs: Arc::new(GetAuditLogsUseCase::new(repos.audit_log.clone())),
        }
    }
}
