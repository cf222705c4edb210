pub mod cache;
pub mod load_balancer;
pub mod rate_limit;
pub mod server;
pub mod translator;
pub mod transport;
pub mod udp_listener;
pub mod wire_response;

pub use cache::ResponseCache;
pub use load_balancer::{ResolverPool, WeightedSelector};
pub use rate_limit::{ClientLimiter, RateLimiterRegistry};
pub use server::{DnsServerHandler, HandleOutcome, ReplySink};
pub use translator::ResponseTranslator;
pub use transport::{DohRequest, DohTransport, HttpsJsonTransport};
pub use udp_listener::UdpDispatcher;
