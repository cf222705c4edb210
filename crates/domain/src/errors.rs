use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Upstream attempt against {resolver} failed: {reason}")]
    TransientUpstream { resolver: String, reason: String },

    #[error("All upstream resolvers failed or returned no answer for {0}")]
    ExhaustedResolvers(String),

    #[error("Malformed client query: {0}")]
    MalformedClientQuery(String),

    #[error("Malformed upstream SOA record: {0}")]
    MalformedUpstreamSoa(String),

    #[error("Failed to serialize DNS response: {0}")]
    Serialization(String),

    #[error("Rate limit exceeded for {0}")]
    RateLimited(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// Errors that are retried against the next weighted pick.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::TransientUpstream { .. })
    }
}
