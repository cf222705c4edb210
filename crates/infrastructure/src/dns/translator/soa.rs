use dohgate_domain::DomainError;
use hickory_proto::rr::rdata::SOA;
use hickory_proto::rr::Name;

const SOA_FIELDS: usize = 7;

/// Parses DNS-JSON SOA text:
/// `<mname> <rname> <serial> <refresh> <retry> <expire> <minimum>`.
pub fn parse_soa(text: &str) -> Result<SOA, DomainError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != SOA_FIELDS {
        return Err(malformed(text, format!("expected {} fields, got {}", SOA_FIELDS, fields.len())));
    }

    let mname = parse_name(text, fields[0])?;
    let rname = parse_name(text, fields[1])?;
    let serial = parse_number(text, "serial", fields[2])?;
    let refresh = parse_interval(text, "refresh", fields[3])?;
    let retry = parse_interval(text, "retry", fields[4])?;
    let expire = parse_interval(text, "expire", fields[5])?;
    let minimum = parse_number(text, "minimum", fields[6])?;

    Ok(SOA::new(mname, rname, serial, refresh, retry, expire, minimum))
}

fn parse_name(text: &str, field: &str) -> Result<Name, DomainError> {
    super::fqdn(field).ok_or_else(|| malformed(text, format!("invalid name '{}'", field)))
}

fn parse_number(text: &str, label: &str, field: &str) -> Result<u32, DomainError> {
    field
        .parse::<u32>()
        .map_err(|_| malformed(text, format!("invalid {} '{}'", label, field)))
}

// hickory stores refresh, retry and expire as i32; the wire bits are the same.
fn parse_interval(text: &str, label: &str, field: &str) -> Result<i32, DomainError> {
    parse_number(text, label, field).map(|value| value as i32)
}

fn malformed(text: &str, reason: String) -> DomainError {
    DomainError::MalformedUpstreamSoa(format!("{}: {}", reason, text))
}
