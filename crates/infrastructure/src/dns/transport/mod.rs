pub mod https;

use async_trait::async_trait;
use dohgate_domain::{DomainError, Resolver, UpstreamAnswer};

pub use https::HttpsJsonTransport;

/// Parameters of one DNS-JSON lookup.
#[derive(Debug, Clone, Copy)]
pub struct DohRequest<'a> {
    /// Domain without trailing dot.
    pub name: &'a str,
    pub record_type: u16,
    pub client_subnet: Option<&'a str>,
}

/// One round trip to one DoH upstream.
#[async_trait]
pub trait DohTransport: Send + Sync {
    async fn fetch(
        &self,
        resolver: &Resolver,
        request: &DohRequest<'_>,
    ) -> Result<UpstreamAnswer, DomainError>;

    fn protocol_name(&self) -> &'static str;
}
