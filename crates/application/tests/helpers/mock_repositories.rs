use async_trait::async_trait;
use dohgate_application::ports::AuditLogStore;
use dohgate_domain::{AuditRecord, DnsQuery, DomainError};
use std::net::IpAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub struct MockAuditLogStore {
    records: Mutex<Vec<AuditRecord>>,
    should_fail: AtomicBool,
}

impl MockAuditLogStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::Relaxed);
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn insert_at(&self, timestamp: i64, domain: &str) {
        let query = DnsQuery::new(domain, 1, "192.0.2.10".parse::<IpAddr>().unwrap());
        let mut record = AuditRecord::new(&query);
        record.timestamp = timestamp;
        self.records.lock().unwrap().push(record);
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(DomainError::DatabaseError("mock failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl AuditLogStore for MockAuditLogStore {
    async fn put(&self, record: &AuditRecord) -> Result<(), DomainError> {
        self.check()?;
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn scan(&self, start: i64, end: i64) -> Result<Vec<AuditRecord>, DomainError> {
        self.check()?;
        let mut found: Vec<AuditRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.timestamp >= start && r.timestamp < end)
            .cloned()
            .collect();
        found.sort_by_key(|r| r.timestamp);
        Ok(found)
    }

    async fn prune(&self, before: i64) -> Result<u64, DomainError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        let initial = records.len();
        records.retain(|r| r.timestamp >= before);
        Ok((initial - records.len()) as u64)
    }
}
