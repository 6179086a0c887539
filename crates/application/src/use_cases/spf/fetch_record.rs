use spf_flattener_domain::validators::require_non_empty;
use spf_flattener_domain::{DomainError, PolicyRecord};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::ports::DnsLookup;
use crate::services::SpfRecordCache;

/// Fetches the SPF TXT record of a domain, memoized per run.
pub struct FetchSpfRecordUseCase {
    lookup: Arc<dyn DnsLookup>,
    cache: Arc<SpfRecordCache>,
}

impl FetchSpfRecordUseCase {
    pub fn new(lookup: Arc<dyn DnsLookup>, cache: Arc<SpfRecordCache>) -> Self {
        Self { lookup, cache }
    }

    /// Returns the record, or `None` when the domain has none or the lookup
    /// failed. Only an empty `domain` is an error.
    pub async fn execute(&self, domain: &str) -> Result<Option<Arc<str>>, DomainError> {
        match self.fetch(domain).await {
            Ok(record) => Ok(Some(record)),
            Err(e @ DomainError::InvalidArgument(_)) => Err(e),
            Err(_) => Ok(None),
        }
    }

    /// Like [`execute`](Self::execute) but keeps the reason a record could
    /// not be fetched. Failures are logged here and never cached.
    #[instrument(skip(self))]
    pub async fn fetch(&self, domain: &str) -> Result<Arc<str>, DomainError> {
        require_non_empty(domain, "Domain")?;

        let result = self
            .cache
            .get_or_fetch(domain, || self.fetch_from_dns(domain))
            .await;

        if let Err(e) = &result {
            match e {
                DomainError::NotFound(_) => {
                    warn!(domain = %domain, "No SPF record found")
                }
                _ => warn!(domain = %domain, error = %e, "SPF record lookup failed"),
            }
        }

        result
    }

    pub fn cache(&self) -> &SpfRecordCache {
        &self.cache
    }

    async fn fetch_from_dns(&self, domain: &str) -> Result<Arc<str>, DomainError> {
        let txt_records = self.lookup.lookup_txt(domain).await?;

        let mut spf_records = txt_records
            .iter()
            .filter(|txt| PolicyRecord::is_spf_record(txt));

        let record = spf_records.next().ok_or_else(|| {
            DomainError::NotFound(format!("{domain} has no v=spf1 TXT record"))
        })?;

        let extra = spf_records.count();
        if extra > 0 {
            warn!(
                domain = %domain,
                records = extra + 1,
                "Multiple SPF records published, using the first"
            );
        }

        debug!(domain = %domain, record = %record, "SPF record fetched");

        Ok(Arc::from(record.as_str()))
    }
}
