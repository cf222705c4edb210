use super::cache::ResponseCache;
use super::rate_limit::RateLimiterRegistry;
use super::translator::ResponseTranslator;
use super::wire_response::{decode, encode, reply_to, server_failure};
use async_trait::async_trait;
use dohgate_application::ports::{AuditLogStore, UpstreamResolver};
use dohgate_domain::{cache_resolver_info, AuditRecord, DnsQuery, DomainError, ResolverInfo, UpstreamAnswer};
use hickory_proto::op::Message;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, error, info, warn};

/// Where encoded replies go. The UDP socket in production, a recorder in tests.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send_reply(&self, bytes: &[u8], target: SocketAddr) -> io::Result<()>;
}

#[async_trait]
impl ReplySink for UdpSocket {
    async fn send_reply(&self, bytes: &[u8], target: SocketAddr) -> io::Result<()> {
        self.send_to(bytes, target).await.map(|_| ())
    }
}

/// Terminal outcome of a datagram that produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleOutcome {
    Cached,
    Resolved,
    ServerFailure,
}

pub struct DnsServerHandler {
    rate_limiter: Arc<RateLimiterRegistry>,
    cache: Arc<ResponseCache>,
    resolver: Arc<dyn UpstreamResolver>,
    audit_log: Arc<dyn AuditLogStore>,
}

impl DnsServerHandler {
    pub fn new(
        rate_limiter: Arc<RateLimiterRegistry>,
        cache: Arc<ResponseCache>,
        resolver: Arc<dyn UpstreamResolver>,
        audit_log: Arc<dyn AuditLogStore>,
    ) -> Self {
        Self {
            rate_limiter,
            cache,
            resolver,
            audit_log,
        }
    }

    /// Runs one datagram to completion.
    ///
    /// `Err` means nothing was persisted: either the datagram was dropped
    /// without a reply (rate limit, undecodable) or the reply could not be
    /// built or sent.
    pub async fn handle_datagram(
        &self,
        datagram: &[u8],
        source: SocketAddr,
        sink: &dyn ReplySink,
    ) -> Result<HandleOutcome, DomainError> {
        let client_ip = source.ip();
        if !self.rate_limiter.allow(client_ip) {
            return Err(DomainError::RateLimited(client_ip.to_string()));
        }

        let request = decode(datagram)?;
        let question = request.queries().first().ok_or_else(|| {
            DomainError::MalformedClientQuery("Datagram carries no question".to_string())
        })?;

        let query = DnsQuery::new(
            question.name().to_ascii(),
            u16::from(question.query_type()),
            client_ip,
        );
        let cache_key = query.cache_key();

        info!(
            domain = %query.domain,
            record_type = query.record_type_name(),
            client = %client_ip,
            "DNS query received"
        );

        if let Some(answer) = self.cached_answer(&cache_key) {
            debug!(key = %cache_key, "Cache hit");
            let audit = self
                .reply_with(&query, &request, &answer, source, sink)
                .await?;
            self.persist(audit, &cache_resolver_info(&cache_key)).await;
            return Ok(HandleOutcome::Cached);
        }

        let resolution = match self.resolver.query(&query).await {
            Ok(resolution) => resolution,
            Err(e) => {
                warn!(domain = %query.domain, error = %e, "Resolution failed, replying SERVFAIL");
                let bytes = encode(&server_failure(&request))?;
                Self::send(sink, &bytes, source).await?;
                return Ok(HandleOutcome::ServerFailure);
            }
        };

        let ttl = resolution.answer.effective_ttl();
        let raw = resolution.answer.to_vec().map_err(|e| {
            DomainError::Serialization(format!("Failed to serialize upstream answer: {}", e))
        })?;
        self.cache.set(cache_key.as_str(), raw, ttl);
        debug!(key = %cache_key, ttl, resolver = %resolution.resolver.id, "Cached upstream answer");

        let audit = self
            .reply_with(&query, &request, &resolution.answer, source, sink)
            .await?;
        self.persist(audit, &resolution.resolver).await;
        Ok(HandleOutcome::Resolved)
    }

    /// Stored answer for `key`; an entry that no longer deserializes counts as a miss.
    fn cached_answer(&self, key: &str) -> Option<UpstreamAnswer> {
        let raw = self.cache.get(key)?;
        match UpstreamAnswer::from_slice(&raw) {
            Ok(answer) => Some(answer),
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding unreadable cache entry");
                None
            }
        }
    }

    async fn reply_with(
        &self,
        query: &DnsQuery,
        request: &Message,
        answer: &UpstreamAnswer,
        source: SocketAddr,
        sink: &dyn ReplySink,
    ) -> Result<AuditRecord, DomainError> {
        let (reply, audit) = ResponseTranslator::build_response(query, reply_to(request), answer)?;
        let bytes = encode(&reply)?;
        Self::send(sink, &bytes, source).await?;
        debug!(
            domain = %query.domain,
            answers = reply.answers().len(),
            authority = reply.name_servers().len(),
            rcode = ?reply.response_code(),
            "Reply sent"
        );
        Ok(audit)
    }

    async fn send(sink: &dyn ReplySink, bytes: &[u8], target: SocketAddr) -> Result<(), DomainError> {
        sink.send_reply(bytes, target)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to send reply to {}: {}", target, e)))
    }

    async fn persist(&self, mut audit: AuditRecord, resolver: &ResolverInfo) {
        audit.set_resolver(resolver);
        if let Err(e) = self.audit_log.put(&audit).await {
            error!(error = %e, query = %audit.query, "Failed to persist audit record");
        }
    }
}
