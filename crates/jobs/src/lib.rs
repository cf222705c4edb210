pub mod audit_log_retention;
pub mod cache_sweep;
pub mod runner;

pub use audit_log_retention::AuditLogRetentionJob;
pub use cache_sweep::CacheSweepJob;
pub use runner::JobRunner;
