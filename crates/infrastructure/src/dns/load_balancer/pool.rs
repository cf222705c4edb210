use super::weighted::WeightedSelector;
use crate::dns::transport::{DohRequest, DohTransport};
use async_trait::async_trait;
use dohgate_application::ports::{UpstreamResolution, UpstreamResolver};
use dohgate_domain::client_subnet::ecs_subnet;
use dohgate_domain::{DnsQuery, DomainError, Resolver, ResolverInfo};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Weighted pool of DoH upstreams with fallback.
///
/// A query makes up to `len(resolvers)` independent weighted picks. The same
/// resolver may be picked more than once.
pub struct ResolverPool {
    selector: WeightedSelector,
    transport: Arc<dyn DohTransport>,
}

impl ResolverPool {
    pub fn new(
        resolvers: Vec<Resolver>,
        transport: Arc<dyn DohTransport>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            selector: WeightedSelector::new(resolvers)?,
            transport,
        })
    }

    pub fn resolvers(&self) -> &[Resolver] {
        self.selector.resolvers()
    }
}

#[async_trait]
impl UpstreamResolver for ResolverPool {
    async fn query(&self, query: &DnsQuery) -> Result<UpstreamResolution, DomainError> {
        let name = query.upstream_name();
        let client_subnet = ecs_subnet(query.client_ip);
        let request = DohRequest {
            name,
            record_type: query.record_type,
            client_subnet: client_subnet.as_deref(),
        };

        let attempts = self.selector.len();
        for attempt in 1..=attempts {
            let resolver = self.selector.select();
            debug!(
                resolver = %resolver.id,
                attempt,
                domain = %name,
                ecs = ?request.client_subnet,
                "Querying upstream"
            );

            match self.transport.fetch(resolver, &request).await {
                Ok(answer) if answer.has_records() => {
                    return Ok(UpstreamResolution {
                        answer,
                        resolver: ResolverInfo::from_resolver(resolver),
                    });
                }
                Ok(answer) => {
                    debug!(
                        resolver = %resolver.id,
                        status = answer.status,
                        attempt,
                        "Upstream returned no answer or authority data, trying next"
                    );
                }
                Err(e) if e.is_transient() => {
                    warn!(
                        resolver = %resolver.id,
                        protocol = self.transport.protocol_name(),
                        attempt,
                        error = %e,
                        "Upstream attempt failed"
                    );
                }
                Err(e) => {
                    error!(
                        resolver = %resolver.id,
                        protocol = self.transport.protocol_name(),
                        attempt,
                        error = %e,
                        "Upstream attempt failed unexpectedly"
                    );
                }
            }
        }

        Err(DomainError::ExhaustedResolvers(name.to_string()))
    }
}
