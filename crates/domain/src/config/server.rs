use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Receive buffer for a single datagram.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Upper bound on concurrently handled datagrams; overflow is dropped.
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dns_port: default_dns_port(),
            bind_address: default_bind_address(),
            buffer_size: default_buffer_size(),
            max_in_flight: default_max_in_flight(),
        }
    }
}

fn default_dns_port() -> u16 {
    53
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_buffer_size() -> usize {
    4096
}

fn default_max_in_flight() -> usize {
    1024
}
