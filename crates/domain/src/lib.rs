//! dohgate Domain Layer
pub mod audit_record;
pub mod client_subnet;
pub mod config;
pub mod dns_query;
pub mod errors;
pub mod record_type;
pub mod resolver;
pub mod upstream_answer;

pub use audit_record::{cache_resolver_info, now_nanos, AuditEntry, AuditRecord, CACHE_RESOLVER_ID};
pub use config::{CliOverrides, Config, ConfigError};
pub use dns_query::DnsQuery;
pub use errors::DomainError;
pub use record_type::RecordType;
pub use resolver::{Resolver, ResolverInfo};
pub use upstream_answer::{AnswerEntry, QuestionEntry, UpstreamAnswer};
