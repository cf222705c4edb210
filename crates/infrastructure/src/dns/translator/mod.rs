//! DNS-JSON → wire translation.
//!
//! The answer section is filled from `Answer`; only when that yields nothing
//! is `Authority` consulted. A reply with neither becomes NXDOMAIN. Every
//! record placed on the wire is mirrored into the audit record.

mod soa;

pub use soa::parse_soa;

use dohgate_domain::{AnswerEntry, AuditRecord, DnsQuery, DomainError, RecordType, UpstreamAnswer};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA, CNAME, MX, NS, TXT};
use hickory_proto::rr::{DNSClass, Name, RData, Record};
use std::net::{Ipv4Addr, Ipv6Addr};
use tracing::debug;

/// Upstream JSON carries no MX priority.
const MX_PREFERENCE: u16 = 10;

pub struct ResponseTranslator;

impl ResponseTranslator {
    /// Fills `reply` from `answer` and builds the matching audit record.
    ///
    /// The audit record's resolver identity is left empty for the caller.
    pub fn build_response(
        query: &DnsQuery,
        mut reply: Message,
        answer: &UpstreamAnswer,
    ) -> Result<(Message, AuditRecord), DomainError> {
        let owner = fqdn(&query.domain).ok_or_else(|| {
            DomainError::InvalidDomainName(format!("Invalid query name '{}'", query.domain))
        })?;
        let mut audit = AuditRecord::new(query);
        audit.comment = answer.comment.clone();

        let mut answered = 0usize;
        for entry in &answer.answer {
            if let Some(rdata) = answer_rdata(entry) {
                reply.add_answer(Record::from_rdata(owner.clone(), entry.ttl, rdata));
                record_entry(&mut audit, &owner, entry);
                answered += 1;
            } else {
                debug!(
                    domain = %query.domain,
                    record_type = entry.record_type,
                    data = %entry.data,
                    "Skipping untranslatable answer entry"
                );
            }
        }

        if answered == 0 && !answer.authority.is_empty() {
            debug!(
                domain = %query.domain,
                authority = answer.authority.len(),
                "No answer records, using authority section"
            );
            for entry in &answer.authority {
                if let Some(rdata) = authority_rdata(entry)? {
                    reply.add_name_server(Record::from_rdata(owner.clone(), entry.ttl, rdata));
                    record_entry(&mut audit, &owner, entry);
                }
            }
        }

        if reply.answers().is_empty() && reply.name_servers().is_empty() {
            reply.set_response_code(ResponseCode::NXDomain);
        }

        Ok((reply, audit))
    }
}

fn answer_rdata(entry: &AnswerEntry) -> Option<RData> {
    match RecordType::from_code(entry.record_type)? {
        RecordType::A => entry.data.parse::<Ipv4Addr>().ok().map(|ip| RData::A(A(ip))),
        RecordType::AAAA => entry
            .data
            .parse::<Ipv6Addr>()
            .ok()
            .map(|ip| RData::AAAA(AAAA(ip))),
        RecordType::CNAME => fqdn(&entry.data).map(|target| RData::CNAME(CNAME(target))),
        RecordType::MX => fqdn(&entry.data).map(|exchange| RData::MX(MX::new(MX_PREFERENCE, exchange))),
        RecordType::TXT => Some(RData::TXT(TXT::new(vec![entry.data.clone()]))),
        RecordType::NS | RecordType::SOA => None,
    }
}

/// `Ok(None)` for entries that are skipped; `Err` only for a malformed SOA.
fn authority_rdata(entry: &AnswerEntry) -> Result<Option<RData>, DomainError> {
    match RecordType::from_code(entry.record_type) {
        Some(RecordType::NS) => Ok(fqdn(&entry.data).map(|target| RData::NS(NS(target)))),
        Some(RecordType::SOA) => parse_soa(&entry.data).map(|soa| Some(RData::SOA(soa))),
        _ => Ok(None),
    }
}

fn record_entry(audit: &mut AuditRecord, owner: &Name, entry: &AnswerEntry) {
    audit.push_entry(
        &owner.to_ascii(),
        entry.record_type,
        u16::from(DNSClass::IN),
        entry.ttl,
        &entry.data,
    );
}

/// Absolute name from DNS-JSON text, which may or may not carry the root dot.
pub(crate) fn fqdn(text: &str) -> Option<Name> {
    if text.is_empty() {
        return None;
    }
    let mut name = Name::from_ascii(text).ok()?;
    name.set_fqdn(true);
    Some(name)
}
