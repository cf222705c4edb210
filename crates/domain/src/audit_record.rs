use crate::{DnsQuery, ResolverInfo};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Resolver identity stamped on audit records served from the response cache.
pub const CACHE_RESOLVER_ID: &str = "Cache";

/// Width of the zero-padded timestamp prefix in store keys. Wide enough for
/// any non-negative `i64`, so lexical key order equals timestamp order.
const TIMESTAMP_KEY_WIDTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuditEntry {
    pub name: String,

    #[serde(rename = "type")]
    pub record_type: u16,

    pub class: u16,

    #[serde(rename = "TTL")]
    pub ttl: u32,

    pub data: String,
}

/// One resolved (or cache-served) query and what was sent back for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuditRecord {
    /// Unix timestamp in nanoseconds.
    pub timestamp: i64,
    pub client_ip: String,
    pub query: String,
    pub query_type: u16,
    pub resolver: String,
    pub resolver_url: String,
    #[serde(default)]
    pub response: Vec<AuditEntry>,
    #[serde(default)]
    pub comment: Vec<String>,
}

impl AuditRecord {
    pub fn new(query: &DnsQuery) -> Self {
        Self {
            timestamp: now_nanos(),
            client_ip: query.client_ip.to_string(),
            query: query.domain.to_string(),
            query_type: query.record_type,
            resolver: String::new(),
            resolver_url: String::new(),
            response: Vec::new(),
            comment: Vec::new(),
        }
    }

    pub fn push_entry(&mut self, name: &str, record_type: u16, class: u16, ttl: u32, data: &str) {
        self.response.push(AuditEntry {
            name: name.to_string(),
            record_type,
            class,
            ttl,
            data: data.to_string(),
        });
    }

    pub fn set_resolver(&mut self, info: &ResolverInfo) {
        self.resolver = info.id.to_string();
        self.resolver_url = info.url.to_string();
    }

    /// Store key: `<20-digit nanos>_<client ip>_<query>`.
    pub fn store_key(&self) -> String {
        format!(
            "{}_{}_{}",
            Self::key_prefix(self.timestamp),
            self.client_ip,
            self.query
        )
    }

    /// Zero-padded timestamp prefix used for range scans and pruning.
    pub fn key_prefix(timestamp: i64) -> String {
        format!("{:0width$}", timestamp.max(0), width = TIMESTAMP_KEY_WIDTH)
    }
}

/// Resolver identity used for answers served from the response cache.
pub fn cache_resolver_info(cache_key: &str) -> ResolverInfo {
    ResolverInfo {
        id: Arc::from(CACHE_RESOLVER_ID),
        url: Arc::from(format!("cache://{}", cache_key)),
    }
}

pub fn now_nanos() -> i64 {
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0)
}
