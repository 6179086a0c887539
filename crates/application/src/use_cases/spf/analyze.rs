use spf_flattener_domain::spf::MAX_DNS_LOOKUPS;
use spf_flattener_domain::validators::require_non_empty;
use spf_flattener_domain::{DomainError, PolicyRecord, SpfReport, SpfWarning};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{ExpandSpfRecordUseCase, FetchSpfRecordUseCase, FlattenSpfRecordUseCase};

/// Runs fetch → expand → flatten for a domain.
///
/// Only a missing argument or a domain without any SPF record fails the
/// run; everything else is reported as a warning.
pub struct AnalyzeSpfUseCase {
    fetcher: Arc<FetchSpfRecordUseCase>,
    expander: Arc<ExpandSpfRecordUseCase>,
    flattener: Arc<FlattenSpfRecordUseCase>,
}

impl AnalyzeSpfUseCase {
    pub fn new(
        fetcher: Arc<FetchSpfRecordUseCase>,
        expander: Arc<ExpandSpfRecordUseCase>,
        flattener: Arc<FlattenSpfRecordUseCase>,
    ) -> Self {
        Self {
            fetcher,
            expander,
            flattener,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, domain: &str, max_depth: u32) -> Result<SpfReport, DomainError> {
        require_non_empty(domain, "Domain")?;

        let original = self.fetcher.fetch(domain).await.map_err(|e| match e {
            DomainError::InvalidArgument(_) | DomainError::NotFound(_) => e,
            other => DomainError::NotFound(format!("{domain}: {other}")),
        })?;

        let expanded = self.expander.execute(&original, max_depth).await?;
        let flattened = self
            .flattener
            .execute(&expanded.record.to_string(), domain)
            .await?;

        let original_lookups = PolicyRecord::parse(&original)?.dns_lookup_count();
        let flattened_lookups = flattened.record.dns_lookup_count();

        let mut warnings = expanded.warnings;
        warnings.extend(flattened.warnings);

        if flattened_lookups > MAX_DNS_LOOKUPS {
            warn!(
                lookups = flattened_lookups,
                limit = MAX_DNS_LOOKUPS,
                "Flattened record exceeds the DNS lookup limit"
            );
            warnings.push(SpfWarning::TooManyLookups {
                count: flattened_lookups,
                limit: MAX_DNS_LOOKUPS,
            });
        }

        let stats = self.fetcher.cache().stats();
        debug!(
            cached_records = stats.entries,
            cache_hits = stats.hits,
            cache_misses = stats.misses,
            "SPF record cache"
        );

        info!(
            domain = %domain,
            rounds = expanded.rounds,
            original_lookups = original_lookups,
            flattened_lookups = flattened_lookups,
            warnings = warnings.len(),
            "SPF analysis complete"
        );

        Ok(SpfReport {
            domain: domain.to_string(),
            original: original.to_string(),
            expanded: expanded.record.to_string(),
            flattened: flattened.record.to_string(),
            original_lookups,
            flattened_lookups,
            warnings,
        })
    }
}
