use dohgate_application::use_cases::CleanupOldAuditLogsUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

pub struct AuditLogRetentionJob {
    cleanup: Arc<CleanupOldAuditLogsUseCase>,
    retention_days: u32,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl AuditLogRetentionJob {
    pub fn new(cleanup: Arc<CleanupOldAuditLogsUseCase>, retention_days: u32) -> Self {
        Self {
            cleanup,
            retention_days,
            interval_secs: 3600,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Retention of 0 days keeps everything and the job never starts.
    pub async fn start(self: Arc<Self>) {
        if self.retention_days == 0 {
            info!("Audit log retention disabled");
            return;
        }

        info!(
            retention_days = self.retention_days,
            interval_secs = self.interval_secs,
            "Starting audit log retention job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("AuditLogRetentionJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.cleanup.execute(self.retention_days).await {
                            Ok(deleted) => {
                                info!(deleted, "Audit log retention cleanup completed");
                            }
                            Err(e) => {
                                error!(error = %e, "Audit log retention cleanup failed");
                            }
                        }
                    }
                }
            }
        });
    }
}
