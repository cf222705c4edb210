use async_trait::async_trait;
use dohgate_application::ports::{AuditLogStore, UpstreamResolution, UpstreamResolver};
use dohgate_domain::{
    AnswerEntry, AuditRecord, DnsQuery, DomainError, Resolver, ResolverInfo, UpstreamAnswer,
};
use dohgate_infrastructure::dns::{DohRequest, DohTransport, ReplySink};
use std::collections::VecDeque;
use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub fn answer_a(name: &str, ttl: u32, ip: &str) -> UpstreamAnswer {
    UpstreamAnswer {
        status: 0,
        recursion_desired: true,
        recursion_available: true,
        answer: vec![AnswerEntry::new(name, 1, ttl, ip)],
        ..UpstreamAnswer::default()
    }
}

pub fn resolvers(n: usize) -> Vec<Resolver> {
    (0..n)
        .map(|i| Resolver::new(format!("r{}", i), format!("https://r{}.test/dns-query", i), 1))
        .collect()
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub resolver_id: String,
    pub name: String,
    pub record_type: u16,
    pub client_subnet: Option<String>,
}

/// Plays back one scripted result per call, in order. Once the script runs
/// out every call fails.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<UpstreamAnswer, DomainError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Result<UpstreamAnswer, DomainError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

pub fn transport_error(resolver: &str) -> Result<UpstreamAnswer, DomainError> {
    Err(DomainError::TransientUpstream {
        resolver: resolver.to_string(),
        reason: "connection refused".to_string(),
    })
}

#[async_trait]
impl DohTransport for ScriptedTransport {
    async fn fetch(
        &self,
        resolver: &Resolver,
        request: &DohRequest<'_>,
    ) -> Result<UpstreamAnswer, DomainError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            resolver_id: resolver.id.clone(),
            name: request.name.to_string(),
            record_type: request.record_type,
            client_subnet: request.client_subnet.map(str::to_string),
        });
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| transport_error(&resolver.id))
    }

    fn protocol_name(&self) -> &'static str {
        "MOCK"
    }
}

/// Upstream stand-in that always answers the same way.
pub struct MockUpstreamResolver {
    answer: Option<UpstreamAnswer>,
    info: ResolverInfo,
    calls: AtomicUsize,
    delay: Duration,
}

impl MockUpstreamResolver {
    pub fn answering(answer: UpstreamAnswer) -> Self {
        Self {
            answer: Some(answer),
            info: ResolverInfo::from_resolver(&Resolver::new(
                "google",
                "https://dns.google/resolve",
                1,
            )),
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    pub fn slow(answer: UpstreamAnswer, delay: Duration) -> Self {
        Self {
            delay,
            ..Self::answering(answer)
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            ..Self::answering(UpstreamAnswer::default())
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UpstreamResolver for MockUpstreamResolver {
    async fn query(&self, query: &DnsQuery) -> Result<UpstreamResolution, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.answer {
            Some(answer) => Ok(UpstreamResolution {
                answer: answer.clone(),
                resolver: self.info.clone(),
            }),
            None => Err(DomainError::ExhaustedResolvers(query.domain.to_string())),
        }
    }
}

pub struct MemoryAuditLogStore {
    records: Mutex<Vec<AuditRecord>>,
    should_fail: AtomicBool,
}

impl MemoryAuditLogStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditLogStore for MemoryAuditLogStore {
    async fn put(&self, record: &AuditRecord) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("mock failure".to_string()));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn scan(&self, start: i64, end: i64) -> Result<Vec<AuditRecord>, DomainError> {
        Ok(self
            .records()
            .into_iter()
            .filter(|r| r.timestamp >= start && r.timestamp < end)
            .collect())
    }

    async fn prune(&self, before: i64) -> Result<u64, DomainError> {
        let mut records = self.records.lock().unwrap();
        let len = records.len();
        records.retain(|r| r.timestamp >= before);
        Ok((len - records.len()) as u64)
    }
}

/// Captures replies instead of putting them on a socket.
pub struct RecordingSink {
    replies: Mutex<Vec<(Vec<u8>, SocketAddr)>>,
    should_fail: AtomicBool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(Vec::new()),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn failing() -> Self {
        let sink = Self::new();
        sink.should_fail.store(true, Ordering::SeqCst);
        sink
    }

    pub fn replies(&self) -> Vec<(Vec<u8>, SocketAddr)> {
        self.replies.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReplySink for RecordingSink {
    async fn send_reply(&self, bytes: &[u8], target: SocketAddr) -> io::Result<()> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "socket closed"));
        }
        self.replies.lock().unwrap().push((bytes.to_vec(), target));
        Ok(())
    }
}
