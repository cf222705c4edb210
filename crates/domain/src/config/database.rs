use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Audit records older than this are pruned. 0 keeps everything.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,

    #[serde(default = "default_retention_interval_secs")]
    pub retention_interval_secs: u64,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            retention_days: default_retention_days(),
            retention_interval_secs: default_retention_interval_secs(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_db_path() -> String {
    "./dns_logs.db".to_string()
}

fn default_retention_days() -> u32 {
    7
}

fn default_retention_interval_secs() -> u64 {
    3600
}

fn default_max_connections() -> u32 {
    5
}
