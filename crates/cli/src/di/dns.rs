use super::Repositories;
use dohgate_domain::Config;
use dohgate_infrastructure::dns::{
    DnsServerHandler, HttpsJsonTransport, RateLimiterRegistry, ResolverPool, ResponseCache,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct DnsServices {
    pub cache: Arc<ResponseCache>,
    pub handler: Arc<DnsServerHandler>,
}

impl DnsServices {
    pub fn new(config: &Config, repos: &Repositories) -> anyhow::Result<Self> {
        let transport = Arc::new(HttpsJsonTransport::new(Duration::from_millis(
            config.upstream.timeout_ms,
        ))?);
        let resolver_pool = Arc::new(ResolverPool::new(
            config.upstream.resolvers.clone(),
            transport,
        )?);

        for resolver in resolver_pool.resolvers() {
            info!(id = %resolver.id, url = %resolver.url, weight = resolver.weight, "Upstream resolver");
        }

        let cache = Arc::new(ResponseCache::new());
        let rate_limiter = Arc::new(RateLimiterRegistry::from_config(&config.rate_limit));
        info!(
            burst = config.rate_limit.burst(),
            refill_per_second = config.rate_limit.refill_per_second(),
            "Rate limiter configured"
        );

        let handler = Arc::new(DnsServerHandler::new(
            rate_limiter,
            cache.clone(),
            resolver_pool,
            repos.audit_log.clone(),
        ));

        Ok(Self { cache, handler })
    }
}
