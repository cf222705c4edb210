use async_trait::async_trait;
use dohgate_domain::{DnsQuery, DomainError, ResolverInfo, UpstreamAnswer};

#[derive(Debug, Clone)]
pub struct UpstreamResolution {
    pub answer: UpstreamAnswer,
    pub resolver: ResolverInfo,
}

/// Resolves a query against the DoH upstream pool.
///
/// Only answers carrying Answer or Authority data are returned; anything else
/// ends up as `DomainError::ExhaustedResolvers`.
#[async_trait]
pub trait UpstreamResolver: Send + Sync {
    async fn query(&self, query: &DnsQuery) -> Result<UpstreamResolution, DomainError>;
}
