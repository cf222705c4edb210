use serde::{Deserialize, Serialize};

/// Per-client token bucket settings.
///
/// `max_requests` is the burst; the bucket refills at
/// `max_requests / window_seconds` tokens per second.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    #[serde(default = "default_window_seconds")]
    pub window_seconds: u32,
}

impl RateLimitConfig {
    pub fn burst(&self) -> u32 {
        self.max_requests
    }

    pub fn refill_per_second(&self) -> f64 {
        if self.window_seconds == 0 {
            return self.max_requests as f64;
        }
        self.max_requests as f64 / self.window_seconds as f64
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_seconds: default_window_seconds(),
        }
    }
}

fn default_max_requests() -> u32 {
    100
}

fn default_window_seconds() -> u32 {
    1
}
