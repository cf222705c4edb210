//! HTTPS transport for the DNS-JSON flavour of DoH.
//!
//! Wire format (HTTP):
//! ```text
//! GET /dns-query?name=example.com&type=1&edns_client_subnet=203.0.113.0/24 HTTP/1.1
//! Accept: application/dns-json
//! ```
//!
//! The response body is the JSON object described in
//! [`dohgate_domain::UpstreamAnswer`].

use super::{DohRequest, DohTransport};
use async_trait::async_trait;
use dohgate_domain::{DomainError, Resolver, UpstreamAnswer};
use reqwest::tls::Version;
use std::time::Duration;
use tracing::debug;

const DNS_JSON_CONTENT_TYPE: &str = "application/dns-json";

pub struct HttpsJsonTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpsJsonTransport {
    pub fn new(timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .min_tls_version(Version::TLS_1_3)
            .timeout(timeout)
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            .no_gzip()
            .build()
            .map_err(|e| DomainError::ConfigError(format!("Failed to build DoH client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    fn transient(resolver: &Resolver, reason: impl Into<String>) -> DomainError {
        DomainError::TransientUpstream {
            resolver: resolver.id.clone(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl DohTransport for HttpsJsonTransport {
    async fn fetch(
        &self,
        resolver: &Resolver,
        request: &DohRequest<'_>,
    ) -> Result<UpstreamAnswer, DomainError> {
        let record_type = request.record_type.to_string();
        let mut params: Vec<(&str, &str)> =
            vec![("name", request.name), ("type", record_type.as_str())];
        if let Some(subnet) = request.client_subnet {
            params.push(("edns_client_subnet", subnet));
        }

        debug!(
            resolver = %resolver.id,
            url = %resolver.url,
            name = %request.name,
            record_type = request.record_type,
            "Sending DoH JSON query"
        );

        let response = tokio::time::timeout(
            self.timeout,
            self.client
                .get(&resolver.url)
                .query(&params)
                .header("Accept", DNS_JSON_CONTENT_TYPE)
                .send(),
        )
        .await
        .map_err(|_| Self::transient(resolver, "timeout sending request"))?
        .map_err(|e| Self::transient(resolver, format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::transient(
                resolver,
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            ));
        }

        let body = tokio::time::timeout(self.timeout, response.bytes())
            .await
            .map_err(|_| Self::transient(resolver, "timeout reading response"))?
            .map_err(|e| Self::transient(resolver, format!("failed to read response: {}", e)))?;

        let answer = UpstreamAnswer::from_slice(&body)
            .map_err(|e| Self::transient(resolver, format!("invalid JSON body: {}", e)))?;

        debug!(
            resolver = %resolver.id,
            status = answer.status,
            answers = answer.answer.len(),
            authority = answer.authority.len(),
            "DoH JSON response received"
        );

        Ok(answer)
    }

    fn protocol_name(&self) -> &'static str {
        "HTTPS"
    }
}
