use async_trait::async_trait;
use spf_flattener_domain::{DomainError, MailExchanger, RecordType};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// DNS resolution collaborator.
///
/// Implementations are bound to one DNS server at construction. An empty
/// `Ok` vector means the name exists but has no records of that type.
#[async_trait]
pub trait DnsLookup: Send + Sync {
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, DomainError>;

    async fn lookup_a(&self, name: &str) -> Result<Vec<Ipv4Addr>, DomainError>;

    async fn lookup_aaaa(&self, name: &str) -> Result<Vec<Ipv6Addr>, DomainError>;

    async fn lookup_mx(&self, name: &str) -> Result<Vec<MailExchanger>, DomainError>;

    /// A or AAAA lookup selected by record type.
    async fn lookup_addresses(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<IpAddr>, DomainError> {
        match record_type {
            RecordType::A => Ok(self
                .lookup_a(name)
                .await?
                .into_iter()
                .map(IpAddr::V4)
                .collect()),
            RecordType::AAAA => Ok(self
                .lookup_aaaa(name)
                .await?
                .into_iter()
                .map(IpAddr::V6)
                .collect()),
            other => Err(DomainError::InvalidArgument(format!(
                "{other} is not an address record type"
            ))),
        }
    }
}
