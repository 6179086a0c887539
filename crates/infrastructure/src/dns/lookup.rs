use crate::dns::forwarding::{DnsResponse, MessageBuilder, ResponseParser};
use crate::dns::transport::Transport;
use async_trait::async_trait;
use bytes::Bytes;
use hickory_proto::op::ResponseCode;
use spf_flattener_application::ports::DnsLookup;
use spf_flattener_domain::validators::validate_domain_name;
use spf_flattener_domain::{DnsQuery, DomainError, MailExchanger, RecordType};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Stub resolver that sends every query to one recursive server.
///
/// Queries go out over UDP. A truncated answer is retried over TCP within
/// what is left of the timeout, unless TCP fallback is disabled.
pub struct HickoryDnsLookup {
    server_addr: SocketAddr,
    timeout: Duration,
    tcp_fallback: bool,
    udp: Transport,
    tcp: Transport,
}

impl HickoryDnsLookup {
    pub fn new(server_addr: SocketAddr, timeout: Duration) -> Self {
        Self {
            server_addr,
            timeout,
            tcp_fallback: true,
            udp: Transport::udp(server_addr),
            tcp: Transport::tcp(server_addr),
        }
    }

    pub fn with_tcp_fallback(mut self, enabled: bool) -> Self {
        self.tcp_fallback = enabled;
        self
    }

    /// Sends one query and maps the response code.
    ///
    /// NXDOMAIN is `NotFound`; SERVFAIL, REFUSED and NOTIMP are a
    /// `ResolutionFailure`. Any other non-zero rcode means the server did not
    /// understand the query and is an `InvalidDnsResponse`. NOERROR with no matching answers is `Ok` with
    /// empty record lists.
    #[instrument(skip(self, query), fields(domain = %query.domain, record_type = %query.record_type))]
    pub async fn resolve(&self, query: &DnsQuery) -> Result<DnsResponse, DomainError> {
        validate_domain_name(&query.domain)?;

        let start = Instant::now();
        let (id, query_bytes) = MessageBuilder::build(query)?;

        let mut response = self.exchange(&self.udp, id, &query_bytes, self.timeout).await?;

        if response.truncated && self.tcp_fallback {
            debug!(server = %self.server_addr, "Response truncated (TC bit), retrying via TCP");

            let remaining = self
                .timeout
                .checked_sub(start.elapsed())
                .unwrap_or(Duration::from_millis(500));

            response = self.exchange(&self.tcp, id, &query_bytes, remaining).await?;
        }

        debug!(
            status = ResponseParser::rcode_to_status(response.rcode),
            latency_ms = start.elapsed().as_millis() as u64,
            "Query answered"
        );

        if response.is_nxdomain() {
            return Err(DomainError::NotFound(format!("{}: NXDOMAIN", query.domain)));
        }
        if response.is_server_error() {
            return Err(DomainError::ResolutionFailure(format!(
                "{} {} query answered {}",
                query.domain,
                query.record_type,
                ResponseParser::rcode_to_status(response.rcode)
            )));
        }
        if response.rcode != ResponseCode::NoError {
            return Err(DomainError::InvalidDnsResponse(format!(
                "{} {} query rejected with {}",
                query.domain,
                query.record_type,
                ResponseParser::rcode_to_status(response.rcode)
            )));
        }

        Ok(response)
    }

    async fn exchange(
        &self,
        transport: &Transport,
        id: u16,
        query_bytes: &[u8],
        timeout: Duration,
    ) -> Result<DnsResponse, DomainError> {
        let raw = transport.send(query_bytes, timeout).await?;
        let response = ResponseParser::parse_bytes(Bytes::from(raw.bytes))?;

        if response.id != id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "{} answer from {} has ID {} (expected {})",
                transport.protocol_name(),
                self.server_addr,
                response.id,
                id
            )));
        }

        Ok(response)
    }

    async fn query(&self, name: &str, record_type: RecordType) -> Result<DnsResponse, DomainError> {
        self.resolve(&DnsQuery::new(name, record_type)).await
    }
}

#[async_trait]
impl DnsLookup for HickoryDnsLookup {
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, DomainError> {
        Ok(self.query(name, RecordType::TXT).await?.txt)
    }

    async fn lookup_a(&self, name: &str) -> Result<Vec<Ipv4Addr>, DomainError> {
        Ok(self.query(name, RecordType::A).await?.ipv4)
    }

    async fn lookup_aaaa(&self, name: &str) -> Result<Vec<Ipv6Addr>, DomainError> {
        Ok(self.query(name, RecordType::AAAA).await?.ipv6)
    }

    async fn lookup_mx(&self, name: &str) -> Result<Vec<MailExchanger>, DomainError> {
        Ok(self.query(name, RecordType::MX).await?.mx)
    }
}
