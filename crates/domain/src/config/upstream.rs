use crate::Resolver;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default)]
    pub resolvers: Vec<Resolver>,

    /// Per-attempt deadline for one DoH round trip.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            resolvers: vec![
                Resolver::new("cloudflare", "https://cloudflare-dns.com/dns-query", 1),
                Resolver::new("google", "https://dns.google/resolve", 1),
            ],
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    5000
}
