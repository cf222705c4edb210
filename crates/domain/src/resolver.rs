use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A DoH upstream as loaded from configuration. Immutable after startup.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Resolver {
    pub id: String,

    pub url: String,

    #[serde(default = "default_weight")]
    pub weight: u32,
}

impl Resolver {
    pub fn new(id: impl Into<String>, url: impl Into<String>, weight: u32) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            weight,
        }
    }
}

fn default_weight() -> u32 {
    1
}

/// Identity of whoever served an answer: an upstream or the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverInfo {
    pub id: Arc<str>,
    pub url: Arc<str>,
}

impl ResolverInfo {
    pub fn from_resolver(resolver: &Resolver) -> Self {
        Self {
            id: Arc::from(resolver.id.as_str()),
            url: Arc::from(resolver.url.as_str()),
        }
    }
}
