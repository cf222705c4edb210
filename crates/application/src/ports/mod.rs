mod audit_log_store;
mod cache_maintenance_port;
mod upstream_resolver;

pub use audit_log_store::AuditLogStore;
pub use cache_maintenance_port::{CacheMaintenancePort, CacheSweepOutcome};
pub use upstream_resolver::{UpstreamResolution, UpstreamResolver};

// Re-export for convenience
pub use dohgate_domain::DnsQuery;
