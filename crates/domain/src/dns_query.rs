use super::RecordType;
use std::net::IpAddr;
use std::sync::Arc;

/// One client question as seen by the gateway.
///
/// `domain` is kept exactly as it arrived on the wire (usually with the
/// trailing dot) so that cache keys stay stable between hits and misses.
#[derive(Debug, Clone)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    pub record_type: u16,
    pub client_ip: IpAddr,
}

impl DnsQuery {
    pub fn new(domain: impl Into<Arc<str>>, record_type: u16, client_ip: IpAddr) -> Self {
        Self {
            domain: domain.into(),
            record_type,
            client_ip,
        }
    }

    pub fn cache_key(&self) -> String {
        format!("{}:{}", self.domain, self.record_type)
    }

    /// Domain without the trailing root separator, as upstreams expect it.
    pub fn upstream_name(&self) -> &str {
        self.domain.strip_suffix('.').unwrap_or(&self.domain)
    }

    pub fn record_type_name(&self) -> &'static str {
        RecordType::from_code(self.record_type)
            .map(|rt| rt.as_str())
            .unwrap_or("UNKNOWN")
    }
}
