//! Per-client admission control.
//!
//! Each client IP gets its own token bucket holding up to `burst` tokens and
//! refilling continuously at `refill_per_second`. A single mutex guards the
//! registry map; bucket state has its own lock so that `allow` on one client
//! never waits on the registry.

use dohgate_domain::config::RateLimitConfig;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

#[derive(Debug)]
struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

#[derive(Debug)]
pub struct ClientLimiter {
    capacity: f64,
    refill_per_second: f64,
    state: Mutex<BucketState>,
}

impl ClientLimiter {
    pub fn new(burst: u32, refill_per_second: f64) -> Self {
        Self::new_at(burst, refill_per_second, Instant::now())
    }

    fn new_at(burst: u32, refill_per_second: f64, now: Instant) -> Self {
        let capacity = burst as f64;
        Self {
            capacity,
            refill_per_second,
            state: Mutex::new(BucketState {
                tokens: capacity,
                last_refill: now,
            }),
        }
    }

    /// Consumes one token if available.
    pub fn allow(&self) -> bool {
        self.allow_at(Instant::now())
    }

    fn allow_at(&self, now: Instant) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        let elapsed = now.saturating_duration_since(state.last_refill).as_secs_f64();
        state.tokens = (state.tokens + elapsed * self.refill_per_second).min(self.capacity);
        state.last_refill = now.max(state.last_refill);

        if state.tokens >= 1.0 {
            state.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

#[derive(Debug)]
pub struct RateLimiterRegistry {
    burst: u32,
    refill_per_second: f64,
    clients: Mutex<HashMap<IpAddr, Arc<ClientLimiter>>>,
}

impl RateLimiterRegistry {
    pub fn new(burst: u32, refill_per_second: f64) -> Self {
        Self {
            burst,
            refill_per_second,
            clients: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.burst(), config.refill_per_second())
    }

    /// Returns the client's limiter, creating a full bucket on first sight.
    pub fn get_or_create(&self, ip: IpAddr) -> Arc<ClientLimiter> {
        let mut clients = self.clients.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            clients
                .entry(ip)
                .or_insert_with(|| Arc::new(ClientLimiter::new(self.burst, self.refill_per_second))),
        )
    }

    pub fn allow(&self, ip: IpAddr) -> bool {
        self.get_or_create(ip).allow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_burst_then_deny() {
        let start = Instant::now();
        let limiter = ClientLimiter::new_at(5, 2.0, start);

        for i in 0..5 {
            assert!(limiter.allow_at(start), "call {} should be allowed", i + 1);
        }
        assert!(!limiter.allow_at(start), "call 6 should be denied");
    }

    #[test]
    fn test_refill_after_one_interval() {
        let start = Instant::now();
        let limiter = ClientLimiter::new_at(3, 2.0, start);
        for _ in 0..3 {
            assert!(limiter.allow_at(start));
        }
        assert!(!limiter.allow_at(start));

        let later = start + Duration::from_millis(500);
        assert!(limiter.allow_at(later));
        assert!(!limiter.allow_at(later));
    }

    #[test]
    fn test_refill_is_capped_at_capacity() {
        let start = Instant::now();
        let limiter = ClientLimiter::new_at(2, 10.0, start);
        assert!(limiter.allow_at(start));

        let much_later = start + Duration::from_secs(3600);
        assert!(limiter.allow_at(much_later));
        assert!(limiter.allow_at(much_later));
        assert!(!limiter.allow_at(much_later));
    }

    #[test]
    fn test_partial_refill_accumulates() {
        let start = Instant::now();
        let limiter = ClientLimiter::new_at(1, 1.0, start);
        assert!(limiter.allow_at(start));

        assert!(!limiter.allow_at(start + Duration::from_millis(400)));
        assert!(!limiter.allow_at(start + Duration::from_millis(800)));
        assert!(limiter.allow_at(start + Duration::from_millis(1000)));
    }

    #[test]
    fn test_registry_isolates_clients() {
        let registry = RateLimiterRegistry::new(1, 0.001);
        let a: IpAddr = "203.0.113.1".parse().unwrap();
        let b: IpAddr = "203.0.113.2".parse().unwrap();

        assert!(registry.allow(a));
        assert!(!registry.allow(a));
        assert!(registry.allow(b));
        assert!(!Arc::ptr_eq(&registry.get_or_create(a), &registry.get_or_create(b)));
    }

    #[test]
    fn test_registry_returns_same_limiter() {
        let registry = RateLimiterRegistry::new(1, 1.0);
        let ip: IpAddr = "::1".parse().unwrap();

        let first = registry.get_or_create(ip);
        let second = registry.get_or_create(ip);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_concurrent_allow_never_exceeds_burst() {
        let registry = Arc::new(RateLimiterRegistry::new(50, 0.0));
        let ip: IpAddr = "198.51.100.7".parse().unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || (0..20).filter(|_| registry.allow(ip)).count())
            })
            .collect();

        let allowed: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(allowed, 50);
    }
}
