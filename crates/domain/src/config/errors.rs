#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("No upstream resolvers configured")]
    NoResolvers,

    #[error("Resolver '{id}': {reason}")]
    InvalidResolver { id: String, reason: String },

    #[error("Duplicate resolver id '{0}'")]
    DuplicateResolver(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}
