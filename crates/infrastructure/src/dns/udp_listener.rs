use super::server::{DnsServerHandler, HandleOutcome};
use dohgate_domain::DomainError;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Reads datagrams off one socket and hands each to its own task.
///
/// The number of in-flight handlers is capped; a datagram arriving with no
/// free slot is dropped the same way a rate-limited one is.
pub struct UdpDispatcher {
    socket: Arc<UdpSocket>,
    handler: Arc<DnsServerHandler>,
    permits: Arc<Semaphore>,
    buffer_size: usize,
}

impl UdpDispatcher {
    pub fn new(
        socket: Arc<UdpSocket>,
        handler: Arc<DnsServerHandler>,
        max_in_flight: usize,
        buffer_size: usize,
    ) -> Self {
        Self {
            socket,
            handler,
            permits: Arc::new(Semaphore::new(max_in_flight)),
            buffer_size,
        }
    }

    pub async fn run(&self, shutdown: CancellationToken) -> Result<(), DomainError> {
        let local = self
            .socket
            .local_addr()
            .map_err(|e| DomainError::IoError(e.to_string()))?;
        info!(address = %local, "UDP dispatcher started");

        let mut buf = vec![0u8; self.buffer_size];
        loop {
            let (len, source) = tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("UDP dispatcher: shutting down");
                    return Ok(());
                }
                received = self.socket.recv_from(&mut buf) => match received {
                    Ok(received) => received,
                    Err(e) => {
                        // ICMP port unreachable from a previous reply surfaces here on some platforms.
                        warn!(error = %e, "UDP receive failed");
                        continue;
                    }
                },
            };

            let permit = match Arc::clone(&self.permits).try_acquire_owned() {
                Ok(permit) => permit,
                Err(_) => {
                    warn!(client = %source, "Too many in-flight queries, dropping datagram");
                    continue;
                }
            };

            let datagram = buf[..len].to_vec();
            let handler = Arc::clone(&self.handler);
            let socket = Arc::clone(&self.socket);
            tokio::spawn(async move {
                let _permit = permit;
                match handler.handle_datagram(&datagram, source, socket.as_ref()).await {
                    Ok(HandleOutcome::ServerFailure) => {
                        debug!(client = %source, "Answered with SERVFAIL");
                    }
                    Ok(outcome) => {
                        debug!(client = %source, outcome = ?outcome, "Query answered");
                    }
                    Err(DomainError::RateLimited(ip)) => {
                        warn!(client = %ip, "Rate limit exceeded, dropping datagram");
                    }
                    Err(e) => {
                        error!(client = %source, error = %e, "Query dropped");
                    }
                }
            });
        }
    }
}
