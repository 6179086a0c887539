#![allow(dead_code)]

use async_trait::async_trait;
use spf_flattener_application::ports::DnsLookup;
use spf_flattener_domain::{DomainError, MailExchanger, RecordType};
use std::collections::{HashMap, HashSet};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

// ============================================================================
// Mock DnsLookup
// ============================================================================

/// In-memory DNS with per-query accounting.
///
/// Names without configured data answer NXDOMAIN (`DomainError::NotFound`);
/// names marked with `fail` answer with a resolution failure.
#[derive(Clone, Default)]
pub struct MockDnsLookup {
    txt: Arc<RwLock<HashMap<String, Vec<String>>>>,
    a: Arc<RwLock<HashMap<String, Vec<Ipv4Addr>>>>,
    aaaa: Arc<RwLock<HashMap<String, Vec<Ipv6Addr>>>>,
    mx: Arc<RwLock<HashMap<String, Vec<MailExchanger>>>>,
    failing: Arc<RwLock<HashSet<String>>>,
    queries: Arc<Mutex<Vec<(RecordType, String)>>>,
}

impl MockDnsLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_txt(&self, name: &str, records: &[&str]) {
        self.txt.write().await.insert(
            name.to_string(),
            records.iter().map(|r| r.to_string()).collect(),
        );
    }

    pub async fn set_spf(&self, name: &str, record: &str) {
        self.set_txt(name, &[record]).await;
    }

    pub async fn set_a(&self, name: &str, addresses: &[&str]) {
        self.a.write().await.insert(
            name.to_string(),
            addresses.iter().map(|a| a.parse().unwrap()).collect(),
        );
    }

    pub async fn set_aaaa(&self, name: &str, addresses: &[&str]) {
        self.aaaa.write().await.insert(
            name.to_string(),
            addresses.iter().map(|a| a.parse().unwrap()).collect(),
        );
    }

    /// Exchangers get preferences 10, 20, ... in the given order.
    pub async fn set_mx(&self, name: &str, hosts: &[&str]) {
        self.mx.write().await.insert(
            name.to_string(),
            hosts
                .iter()
                .enumerate()
                .map(|(i, host)| MailExchanger::new((i as u16 + 1) * 10, *host))
                .collect(),
        );
    }

    pub async fn fail(&self, name: &str) {
        self.failing.write().await.insert(name.to_string());
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn query_count_for(&self, record_type: RecordType, name: &str) -> usize {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .filter(|(rt, n)| *rt == record_type && n == name)
            .count()
    }

    async fn answer<T: Clone>(
        &self,
        record_type: RecordType,
        name: &str,
        table: &RwLock<HashMap<String, Vec<T>>>,
    ) -> Result<Vec<T>, DomainError> {
        self.queries
            .lock()
            .unwrap()
            .push((record_type, name.to_string()));

        if self.failing.read().await.contains(name) {
            return Err(DomainError::ResolutionFailure(format!(
                "mock server unreachable for {name}"
            )));
        }

        table
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("{name}: NXDOMAIN")))
    }
}

#[async_trait]
impl DnsLookup for MockDnsLookup {
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, DomainError> {
        self.answer(RecordType::TXT, name, &self.txt).await
    }

    async fn lookup_a(&self, name: &str) -> Result<Vec<Ipv4Addr>, DomainError> {
        self.answer(RecordType::A, name, &self.a).await
    }

    async fn lookup_aaaa(&self, name: &str) -> Result<Vec<Ipv6Addr>, DomainError> {
        self.answer(RecordType::AAAA, name, &self.aaaa).await
    }

    async fn lookup_mx(&self, name: &str) -> Result<Vec<MailExchanger>, DomainError> {
        self.answer(RecordType::MX, name, &self.mx).await
    }
}

/// Wires the three SPF use cases over one mock, with a fresh cache.
pub struct SpfTestContext {
    pub dns: MockDnsLookup,
    pub fetcher: Arc<spf_flattener_application::use_cases::FetchSpfRecordUseCase>,
    pub expander: Arc<spf_flattener_application::use_cases::ExpandSpfRecordUseCase>,
    pub flattener: Arc<spf_flattener_application::use_cases::FlattenSpfRecordUseCase>,
}

impl SpfTestContext {
    pub fn new() -> Self {
        use spf_flattener_application::services::SpfRecordCache;
        use spf_flattener_application::use_cases::{
            ExpandSpfRecordUseCase, FetchSpfRecordUseCase, FlattenSpfRecordUseCase,
        };

        let dns = MockDnsLookup::new();
        let lookup: Arc<dyn DnsLookup> = Arc::new(dns.clone());
        let fetcher = Arc::new(FetchSpfRecordUseCase::new(
            Arc::clone(&lookup),
            Arc::new(SpfRecordCache::new()),
        ));
        let expander = Arc::new(ExpandSpfRecordUseCase::new(Arc::clone(&fetcher)));
        let flattener = Arc::new(FlattenSpfRecordUseCase::new(lookup));

        Self {
            dns,
            fetcher,
            expander,
            flattener,
        }
    }
}
